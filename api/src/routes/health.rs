use crate::response::ApiResponse;
use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use sea_orm::ConnectionTrait;
use serde::Serialize;
use util::{config, state::AppState};

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub service: String,
    pub database: &'static str,
}

/// GET /api/health
///
/// Liveness probe. Public.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "service": "training-materials", "database": "up" },
///   "message": "Health check passed"
/// }
/// ```
/// - `503 Service Unavailable` when the database does not answer, with `"database": "down"`
async fn health_check(State(app_state): State<AppState>) -> impl IntoResponse {
    let db_up = app_state
        .db()
        .execute_unprepared("SELECT 1")
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Health check could not reach the database"))
        .is_ok();

    let report = HealthReport {
        service: config::project_name(),
        database: if db_up { "up" } else { "down" },
    };

    if db_up {
        (
            StatusCode::OK,
            Json(ApiResponse::success(report, "Health check passed")),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse {
                success: false,
                data: report,
                message: "Database unavailable".to_string(),
            }),
        )
    }
}
