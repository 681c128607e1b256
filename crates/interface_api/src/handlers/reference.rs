//! Reference data handler

use axum::Json;

use crate::dto::reference::ReferenceResponse;

/// Companies, statuses and claim types with their linking roles
pub async fn reference_data() -> Json<ReferenceResponse> {
    Json(ReferenceResponse::current())
}
