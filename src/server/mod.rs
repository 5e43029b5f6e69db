//! HTTP endpoint for content submissions

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{Admin, SubmitError};

/// Header carrying the shared admin secret (matched case-insensitively)
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Submission route
pub const CREATE_ENTRY_PATH: &str = "/create-entry";

/// Route the site's admin page has always posted to
pub const LEGACY_CREATE_ENTRY_PATH: &str = "/.netlify/functions/create-entry";

/// Largest request body read after authentication
pub const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Success body: `{ "ok": true, "path": ... }`
#[derive(Debug, Serialize)]
struct Created {
    ok: bool,
    path: String,
}

/// Build the application router
pub fn router(admin: Arc<Admin>) -> Router {
    let entry_route = post(create_entry).fallback(method_not_allowed);

    Router::new()
        .route("/health", get(health))
        .route(CREATE_ENTRY_PATH, entry_route.clone())
        .route(LEGACY_CREATE_ENTRY_PATH, entry_route)
        .layer(TraceLayer::new_for_http())
        .with_state(admin)
}

/// Start the server and run until it fails
pub async fn start(admin: Admin, addr: &str) -> Result<()> {
    for problem in admin.config.problems() {
        tracing::warn!("{}; submissions will be rejected until this is fixed", problem);
    }

    let addr = bind_addr(addr)?;
    let app = router(Arc::new(admin));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}{}", addr, CREATE_ENTRY_PATH);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse a listen address, accepting `localhost` for the loopback IP
pub fn bind_addr(addr: &str) -> Result<SocketAddr> {
    let addr = match addr.strip_prefix("localhost:") {
        Some(port) => format!("127.0.0.1:{}", port),
        None => addr.to_string(),
    };
    addr.parse::<SocketAddr>()
        .with_context(|| format!("Invalid listen address {:?}", addr))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

async fn method_not_allowed() -> SubmitError {
    SubmitError::MethodNotAllowed
}

/// POST handler: authenticate, then read, validate, render and commit
///
/// The body stays unread until the caller is authorized, so an
/// unauthenticated caller gets a 401 whatever it sends.
async fn create_entry(
    State(admin): State<Arc<Admin>>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    match handle_submission(&admin, &headers, body).await {
        Ok(path) => (StatusCode::OK, Json(Created { ok: true, path })).into_response(),
        Err(e) => {
            if e.is_client_error() {
                tracing::warn!("Rejected submission: {}", e);
            } else {
                tracing::error!("Submission failed: {}", e);
            }
            e.into_response()
        }
    }
}

async fn handle_submission(
    admin: &Admin,
    headers: &HeaderMap,
    body: Body,
) -> Result<String, SubmitError> {
    let provided = headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    admin.authorize(provided)?;

    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| SubmitError::UnreadableBody(e.to_string()))?;
    let raw = std::str::from_utf8(&bytes).map_err(|_| SubmitError::MalformedRequest)?;
    admin.submit(raw).await
}
