//! Claims handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use core_kernel::ClaimId;
use domain_claims::{ClaimForm, ClaimSearch, ClaimStatistics, MainClaimSearch};

use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Lists claims matching the query filters, newest entry first
pub async fn list_claims(
    State(state): State<AppState>,
    Query(search): Query<ClaimSearch>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let filter = search.into_filter()?;
    let claims = state.service.search(&filter).await?;
    Ok(Json(claims.into_iter().map(ClaimResponse::from).collect()))
}

/// Creates a claim
pub async fn create_claim(
    State(state): State<AppState>,
    Json(form): Json<ClaimForm>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let claim = state.service.create(form).await?;
    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimResponse>, ApiError> {
    Ok(Json(state.service.get(id).await?.into()))
}

/// Replaces a claim
pub async fn update_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
    Json(form): Json<ClaimForm>,
) -> Result<Json<ClaimResponse>, ApiError> {
    Ok(Json(state.service.update(id, form).await?.into()))
}

/// Deletes a claim and every claim linked under it
pub async fn delete_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let linked_removed = state.service.delete(id).await?;
    Ok(Json(DeleteResponse {
        deleted_id: id,
        linked_removed,
    }))
}

pub async fn linked_claims(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.service.linked_claims(id).await?;
    Ok(Json(claims.into_iter().map(ClaimResponse::from).collect()))
}

/// Candidate parents for a linkable claim
pub async fn main_claims(
    State(state): State<AppState>,
    Query(search): Query<MainClaimSearch>,
) -> Result<Json<Vec<MainClaimOption>>, ApiError> {
    let filter = search.into_filter()?;
    let claims = state.service.main_claims(&filter).await?;
    Ok(Json(claims.iter().map(MainClaimOption::from).collect()))
}

/// Runs the rule engine without saving
pub async fn validate_claim(
    State(state): State<AppState>,
    Json(form): Json<ClaimForm>,
) -> Json<ValidationResponse> {
    Json(state.service.validate(form).into())
}

pub async fn statistics(State(state): State<AppState>) -> Result<Json<ClaimStatistics>, ApiError> {
    Ok(Json(state.service.statistics().await?))
}
