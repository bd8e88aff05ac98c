//! Training material routes.
//!
//! Mounted at `/api/trainings` behind `allow_authenticated`.
//!
//! - `GET /` grouped list of visible materials
//! - `GET /{training_id}` one material
//! - `POST /` create (admin)
//! - `PUT /{training_id}` update (admin)
//! - `DELETE /{training_id}` delete (admin)

use crate::{auth::guards::allow_admin, uploads};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub use delete::delete_training;
pub use get::{get_training, list_trainings};
pub use post::create_training;
pub use put::update_training;

pub fn training_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_trainings))
        .route("/{training_id}", get(get_training))
        .route("/", post(create_training).route_layer(from_fn(allow_admin)))
        .route(
            "/{training_id}",
            put(update_training).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{training_id}",
            delete(delete_training).route_layer(from_fn(allow_admin)),
        )
        .layer(DefaultBodyLimit::max(uploads::body_limit(
            app_state.uploads(),
        )))
}
