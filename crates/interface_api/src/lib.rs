//! REST surface of the claims desk
//!
//! Handlers stay thin: decoding and encoding live in `dto`, the
//! validate-link-persist pipeline in `service`, and the status mapping in
//! `error`. `export` and `spreadsheet` render CSV and Excel downloads.
//!
//! ```rust,ignore
//! let pool = infra_db::create_pool(infra_db::DatabaseConfig::default()).await?;
//! infra_db::initialize_schema(&pool).await?;
//! axum::serve(listener, interface_api::create_router(pool, ApiConfig::default())).await?;
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod service;
pub mod spreadsheet;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use infra_db::{ClaimsRepository, DatabasePool};

use crate::config::ApiConfig;
use crate::handlers::{claims, export as export_handlers, health, reference};
use crate::middleware::request_logging_middleware;
use crate::service::ClaimService;

#[derive(Clone)]
pub struct AppState {
    pub service: ClaimService,
    pub config: ApiConfig,
}

/// Builds the router over a pool whose schema is already initialised.
///
/// Probes sit at the root; everything else lives under `/api/v1`.
pub fn create_router(pool: DatabasePool, config: ApiConfig) -> Router {
    let state = AppState {
        service: ClaimService::new(ClaimsRepository::new(pool)),
        config,
    };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", get(claims::list_claims).post(claims::create_claim))
        .route("/validate", post(claims::validate_claim))
        .route(
            "/:id",
            get(claims::get_claim)
                .put(claims::update_claim)
                .delete(claims::delete_claim),
        )
        .route("/:id/linked", get(claims::linked_claims));

    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .route("/main-claims", get(claims::main_claims))
        .route("/statistics", get(claims::statistics))
        .route("/reference", get(reference::reference_data))
        .route("/export/csv", post(export_handlers::export_csv))
        .route("/export/xlsx", post(export_handlers::export_xlsx))
        .layer(axum_middleware::from_fn(request_logging_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
