//! HTTP client for the idea endpoint.
//!
//! Wraps `POST {base_url}/generate-idea` with a hard timeout and folds
//! every failure into a [`ClientError`]. One request per call; nothing is
//! retried.

mod error;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

pub use error::{ClientError, EndpointErrorBody, status_message};

use crate::idea::{IdeaRequest, IdeaResponse};
use error::classify_transport;

/// Wall-clock bound on one idea request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the idea endpoint.
#[derive(Debug, Clone)]
pub struct IdeaClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl IdeaClient {
    /// Build a client for the API rooted at `base_url` (e.g. `http://host/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL of the generation endpoint.
    pub fn endpoint_url(&self) -> String {
        format!("{}/generate-idea", self.base_url.trim_end_matches('/'))
    }

    /// Request one generated idea.
    ///
    /// Fails without touching the network when `mood` or `budget` is
    /// missing. If no response arrives within the timeout the in-flight
    /// request is dropped and [`ClientError::Timeout`] is returned.
    pub async fn generate_idea(&self, request: &IdeaRequest) -> Result<IdeaResponse, ClientError> {
        if !request.has_required() {
            return Err(ClientError::MissingParameters);
        }

        match tokio::time::timeout(self.timeout, self.send(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs_f64(), "idea request timed out");
                Err(ClientError::Timeout)
            }
        }
    }

    async fn send(&self, request: &IdeaRequest) -> Result<IdeaResponse, ClientError> {
        let url = self.endpoint_url();
        debug!(url = %url, "requesting idea");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<EndpointErrorBody>().await.ok();
            let message = status_message(status.as_u16(), body.as_ref(), status.canonical_reason());
            debug!(status = status.as_u16(), message = %message, "endpoint returned an error");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let idea: IdeaResponse = response.json().await.map_err(|e| {
            debug!(error = %e, "failed to read idea response body");
            classify_transport(e)
        })?;

        if idea.title.is_empty() || idea.description.is_empty() {
            return Err(ClientError::MalformedResponse);
        }

        Ok(idea)
    }
}
