//! Client-side failure classification.
//!
//! Every failure of [`super::IdeaClient::generate_idea`] becomes exactly one
//! [`ClientError`] whose `Display` is the message shown to the user.

use serde::Deserialize;
use thiserror::Error;

/// A failed idea request, already phrased for the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Mood and budget are required parameters")]
    MissingParameters,

    #[error("Request timed out. The AI is taking too long to respond. Please try again.")]
    Timeout,

    #[error(
        "Network error: Could not connect to the server. Please check your internet connection."
    )]
    Network(#[source] reqwest::Error),

    /// Non-2xx response from the endpoint.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A 2xx response without a usable `title` and `description`.
    #[error("Invalid response from server. Please try again.")]
    MalformedResponse,

    #[error("An unexpected error occurred. Please try again.")]
    Unexpected(#[source] reqwest::Error),
}

impl ClientError {
    /// HTTP status of a [`ClientError::Status`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error body returned by the endpoint: `{ "error": ..., "message"?: ... }`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct EndpointErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl EndpointErrorBody {
    fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|s| !s.is_empty())
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|s| !s.is_empty())
    }
}

/// Classify a `reqwest` failure, first match wins.
///
/// Connection, send and body-stream failures are network errors. Only a
/// body that arrived in full but is not the expected JSON is malformed.
/// Everything else (bad URL, redirect loops) is unexpected.
pub(crate) fn classify_transport(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else if err.is_connect() || err.is_request() || err.is_body() {
        ClientError::Network(err)
    } else if err.is_decode() {
        ClientError::MalformedResponse
    } else {
        ClientError::Unexpected(err)
    }
}

/// Pick the user-facing message for a non-2xx endpoint response.
///
/// `body` is the decoded error body, if the response had one; `reason` is
/// the canonical reason phrase for the status.
pub fn status_message(status: u16, body: Option<&EndpointErrorBody>, reason: Option<&str>) -> String {
    let error = body.and_then(EndpointErrorBody::error);
    let message = body.and_then(EndpointErrorBody::message);

    match status {
        400 => error
            .unwrap_or("Invalid request. Please check your inputs.")
            .to_owned(),
        401 => "API key is invalid or missing. Please configure your API key.".to_owned(),
        429 => "Too many requests. Please try again in a moment.".to_owned(),
        500 => error.unwrap_or("Server error. Please try again later.").to_owned(),
        _ => error
            .or(message)
            .or(reason)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("HTTP error! status: {status}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(error: Option<&str>, message: Option<&str>) -> EndpointErrorBody {
        EndpointErrorBody {
            error: error.map(str::to_owned),
            message: message.map(str::to_owned),
        }
    }

    #[test]
    fn bad_request_prefers_endpoint_error() {
        let b = body(Some("Mood and budget are required"), None);
        assert_eq!(
            status_message(400, Some(&b), Some("Bad Request")),
            "Mood and budget are required"
        );
        assert_eq!(
            status_message(400, None, Some("Bad Request")),
            "Invalid request. Please check your inputs."
        );
    }

    #[test]
    fn unauthorized_and_rate_limit_are_fixed() {
        let b = body(Some("whatever"), Some("details"));
        assert_eq!(
            status_message(401, Some(&b), None),
            "API key is invalid or missing. Please configure your API key."
        );
        assert_eq!(
            status_message(429, Some(&b), None),
            "Too many requests. Please try again in a moment."
        );
    }

    #[test]
    fn server_error_prefers_endpoint_error() {
        let b = body(Some("Hugging Face API key not configured"), None);
        assert_eq!(
            status_message(500, Some(&b), None),
            "Hugging Face API key not configured"
        );
        assert_eq!(
            status_message(500, Some(&body(Some(""), None)), None),
            "Server error. Please try again later."
        );
    }

    #[test]
    fn other_statuses_fall_through() {
        assert_eq!(
            status_message(405, Some(&body(Some("Method not allowed"), None)), None),
            "Method not allowed"
        );
        assert_eq!(
            status_message(502, Some(&body(None, Some("gateway down"))), None),
            "gateway down"
        );
        assert_eq!(status_message(503, None, Some("Service Unavailable")), "Service Unavailable");
        assert_eq!(status_message(599, None, None), "HTTP error! status: 599");
    }

    #[test]
    fn status_accessor() {
        let err = ClientError::Status {
            status: 429,
            message: "slow down".to_owned(),
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.to_string(), "slow down");
        assert_eq!(ClientError::Timeout.status(), None);
    }
}
