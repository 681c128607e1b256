//! Export handlers
//!
//! The request body, when present, is a `ClaimSearch` in JSON. An empty body
//! exports every claim; a body that does not decode is rejected.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use domain_claims::{Claim, ClaimFilter, ClaimSearch};

use crate::export::{claims_to_csv, export_filename, ExportError};
use crate::spreadsheet::{claims_by_status_to_xlsx, claims_to_xlsx, XLSX_CONTENT_TYPE};
use crate::{error::ApiError, AppState};

const FILE_STEM: &str = "insurance_claims";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpreadsheetOptions {
    /// One sheet per claim status instead of a single sheet with a summary
    pub group_by_status: bool,
}

/// Downloads matching claims as a CSV attachment
pub async fn export_csv(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let claims = claims_to_export(&state, &body).await?;
    let bytes = claims_to_csv(&claims).map_err(internal)?;
    Ok(attachment(
        "text/csv; charset=utf-8",
        export_filename(FILE_STEM, "csv", Utc::now()),
        claims.len(),
        bytes,
    ))
}

/// Downloads matching claims as an Excel workbook
pub async fn export_xlsx(
    State(state): State<AppState>,
    Query(options): Query<SpreadsheetOptions>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let claims = claims_to_export(&state, &body).await?;
    let now = Utc::now();
    let (bytes, stem) = if options.group_by_status {
        (claims_by_status_to_xlsx(&claims), "insurance_claims_by_status")
    } else {
        (claims_to_xlsx(&claims, now), FILE_STEM)
    };
    let bytes = bytes.map_err(internal)?;
    Ok(attachment(
        XLSX_CONTENT_TYPE,
        export_filename(stem, "xlsx", now),
        claims.len(),
        bytes,
    ))
}

async fn claims_to_export(state: &AppState, body: &Bytes) -> Result<Vec<Claim>, ApiError> {
    let filter = export_filter(body)?;
    let claims = state.service.search(&filter).await?;
    if claims.is_empty() {
        return Err(ApiError::BadRequest("No claims to export".to_string()));
    }
    Ok(claims)
}

fn export_filter(body: &Bytes) -> Result<ClaimFilter, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ClaimSearch::default().into_filter()?);
    }
    let Json(search) = Json::<ClaimSearch>::from_bytes(body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    Ok(search.into_filter()?)
}

fn attachment(content_type: &'static str, filename: String, count: usize, bytes: Vec<u8>) -> Response {
    info!(count, %filename, "Claims exported");
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        bytes,
    )
        .into_response()
}

fn internal(error: ExportError) -> ApiError {
    ApiError::Internal(error.to_string())
}
