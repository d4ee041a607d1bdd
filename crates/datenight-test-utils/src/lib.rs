//! Shared test doubles for datenight integration tests.
//!
//! - [`ScriptedGenerator`]: a [`TextGenerator`] returning a canned reply or
//!   error and counting how often it was called.
//! - [`spawn_stub_endpoint`]: a real HTTP server on `127.0.0.1:0` that
//!   answers every request with a fixed status and body, optionally after a
//!   delay, and records what it received.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tokio::task::JoinHandle;

use datenight_core::provider::{Completion, ProviderError, TextGenerator};

// ---------------------------------------------------------------------------
// Scripted generator
// ---------------------------------------------------------------------------

/// A [`TextGenerator`] with a fixed outcome.
#[derive(Debug)]
pub struct ScriptedGenerator {
    reply: Result<String, ProviderError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    models: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Always reply with `text`.
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Self::with_outcome(Ok(text.into()))
    }

    /// Always fail with `err`.
    pub fn failing(err: ProviderError) -> Arc<Self> {
        Self::with_outcome(Err(err))
    }

    fn with_outcome(reply: Result<String, ProviderError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            models: Mutex::new(Vec::new()),
        })
    }

    /// Number of completions requested so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Model identifiers received, oldest first.
    pub fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn complete(&self, request: Completion<'_>) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.to_owned());
        self.models.lock().unwrap().push(request.model.to_owned());
        self.reply.clone()
    }
}

// ---------------------------------------------------------------------------
// Stub HTTP endpoint
// ---------------------------------------------------------------------------

/// A request captured by a [`StubEndpoint`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// The body decoded as JSON. Panics if it is not JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

struct StubState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A running stub server. The server stops when this value is dropped.
pub struct StubEndpoint {
    addr: SocketAddr,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubEndpoint {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://127.0.0.1:<port>`, no trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for StubEndpoint {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start a stub that answers every request with `status` and a JSON `body`.
pub async fn spawn_stub_endpoint(status: u16, body: impl Into<String>) -> StubEndpoint {
    spawn_stub_endpoint_with_delay(status, body, Duration::ZERO).await
}

/// Like [`spawn_stub_endpoint`], but sleeps for `delay` before answering.
pub async fn spawn_stub_endpoint_with_delay(
    status: u16,
    body: impl Into<String>,
    delay: Duration,
) -> StubEndpoint {
    let state = Arc::new(StubState {
        status: StatusCode::from_u16(status).expect("stub status should be valid"),
        body: body.into(),
        delay,
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .fallback(stub_handler)
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub listener");
    let addr = listener.local_addr().expect("stub listener has an address");

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubEndpoint {
        addr,
        state,
        handle,
    }
}

async fn stub_handler(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_owned(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
        .into_response()
}

/// An address on which nothing is listening.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind probe listener");
    let addr = listener.local_addr().expect("probe listener has an address");
    drop(listener);
    addr
}
