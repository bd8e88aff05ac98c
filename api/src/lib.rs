//! HTTP service for uploading, organizing and serving training materials.

use crate::auth::{guards::allow_authenticated, middleware::log_request};
use axum::{
    Router,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn,
};
use tower_http::{cors::CorsLayer, services::ServeDir};
use util::{paths::UPLOADS_URL_PREFIX, state::AppState};

pub mod auth;
pub mod response;
pub mod routes;
pub mod uploads;

/// Builds the full application: `/api/...` plus the stored files under `/uploads/`.
pub fn app(app_state: AppState) -> Router {
    let files = Router::new()
        .fallback_service(ServeDir::new(app_state.upload_root()))
        .layer(from_fn(allow_authenticated));

    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes::routes(&app_state))
        .nest_service(UPLOADS_URL_PREFIX.trim_end_matches('/'), files)
        .layer(from_fn(log_request))
        .layer(cors)
        .with_state(app_state)
}
