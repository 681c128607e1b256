//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct Probe {
    pub status: &'static str,
    pub version: &'static str,
}

impl Probe {
    fn new(status: &'static str) -> Json<Self> {
        Json(Probe {
            status,
            version: env!("CARGO_PKG_VERSION"),
        })
    }
}

pub async fn health_check() -> Json<Probe> {
    Probe::new("healthy")
}

/// Ready once the claims database answers a trivial query
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<Probe>, StatusCode> {
    let pool = state.service.repository().pool();
    if let Err(err) = sqlx::query("SELECT 1").execute(pool).await {
        tracing::warn!(error = %err, "Readiness probe failed");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(Probe::new("ready"))
}
