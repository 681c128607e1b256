//! Per-request access log

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use chrono::Utc;
use tracing::{info, warn};

/// Logs one line per `/api/v1` request; 4xx and 5xx answers go out at warn.
pub async fn request_logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Utc::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = (Utc::now() - started).num_milliseconds();
    if status >= 400 {
        warn!(%method, %path, status, elapsed_ms, "Claims request rejected");
    } else {
        info!(%method, %path, status, elapsed_ms, "Claims request served");
    }

    response
}
