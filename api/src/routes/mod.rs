//! HTTP route entry point for `/api/...`.
//!
//! - `/health` health check (public)
//! - `/trainings` training materials (authenticated; writes are admin only)

use crate::auth::guards::allow_authenticated;
use crate::routes::{health::health_routes, trainings::training_routes};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod health;
pub mod trainings;

/// Builds the router mounted under `/api`.
pub fn routes(app_state: &AppState) -> Router<AppState> {
    Router::new().nest("/health", health_routes()).nest(
        "/trainings",
        training_routes(app_state).route_layer(from_fn(allow_authenticated)),
    )
}
