//! `datenight serve`: the idea endpoint over HTTP.
//!
//! Routes a single path, `/api/generate-idea`:
//! - `POST` runs [`IdeaService::generate`] on the JSON body
//! - `OPTIONS` answers CORS preflight for any origin with fixed allow-lists
//! - anything else is `405 {error}`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderName, Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use datenight_core::{GenerateError, IdeaRequest, IdeaResponse, IdeaService};

const ALLOW_METHODS: [Method; 6] = [
    Method::GET,
    Method::OPTIONS,
    Method::PATCH,
    Method::DELETE,
    Method::POST,
    Method::PUT,
];

const ALLOW_HEADERS: [HeaderName; 9] = [
    HeaderName::from_static("x-csrf-token"),
    HeaderName::from_static("x-requested-with"),
    header::ACCEPT,
    HeaderName::from_static("accept-version"),
    header::CONTENT_LENGTH,
    HeaderName::from_static("content-md5"),
    header::CONTENT_TYPE,
    header::DATE,
    HeaderName::from_static("x-api-version"),
];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    body: serde_json::Value,
}

impl AppError {
    fn new(status: StatusCode, body: serde_json::Value) -> Self {
        Self { status, body }
    }
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        match &err {
            GenerateError::InvalidRequest => {
                Self::new(StatusCode::BAD_REQUEST, json!({ "error": err.to_string() }))
            }
            GenerateError::Misconfigured => {
                let mut body = json!({ "error": err.to_string() });
                if let Some(hint) = err.hint() {
                    body["hint"] = json!(hint);
                }
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            GenerateError::Upstream(message) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to generate date idea", "message": message }),
            ),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Invalid request body", "message": rejection.body_text() }),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// CORS for the idea route. The layer answers every `OPTIONS` itself.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOW_METHODS)
        .allow_headers(ALLOW_HEADERS)
}

pub fn build_router(service: Arc<IdeaService>) -> Router {
    Router::new()
        .route(
            "/api/generate-idea",
            post(generate_idea).fallback(method_not_allowed),
        )
        .route_layer(cors_layer())
        .with_state(service)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(service: Arc<IdeaService>, bind: &str, port: u16) -> Result<()> {
    if service.config().api_key().is_none() {
        tracing::warn!(
            "no Hugging Face API key configured; generation requests will fail until HUGGINGFACE_API_KEY is set"
        );
    }

    let app = build_router(service);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("datenight serve listening on http://{addr}/api/generate-idea");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("datenight serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn generate_idea(
    State(service): State<Arc<IdeaService>>,
    payload: Result<Json<IdeaRequest>, JsonRejection>,
) -> Result<Json<IdeaResponse>, AppError> {
    let Json(request) = payload?;
    let idea = service.generate(&request).await?;
    Ok(Json(idea))
}

async fn method_not_allowed() -> AppError {
    AppError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        json!({ "error": "Method not allowed" }),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
