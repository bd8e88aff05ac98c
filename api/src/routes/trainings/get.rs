use super::common::{
    GroupedTrainings, NOT_FOUND_MESSAGE, TrainingId, TrainingResponse, error_response,
    group_trainings,
};
use crate::{
    auth::{
        AuthUser,
        policy::{Decision, Resource, authorize},
    },
    response::ApiResponse,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::training::Model as TrainingModel;
use util::state::AppState;

/// GET /api/trainings
///
/// Lists the training materials visible to the caller, grouped by section and module.
/// Admins see every record; any other role sees the records shared with it.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "Safety": {
///       "Basics": [ { "id": 1, "title": "Fire drill", "submodule": null, "...": "..." } ]
///     }
///   },
///   "message": "Training materials retrieved successfully"
/// }
/// ```
/// - `500 Internal Server Error`
pub async fn list_trainings(State(app_state): State<AppState>, user: AuthUser) -> Response {
    let role = match authorize(user.role(), Resource::Collection) {
        Decision::Allow => None,
        Decision::Filtered(role) => Some(role),
        Decision::Deny => return error_response(StatusCode::FORBIDDEN, "Access denied"),
    };

    match TrainingModel::list_visible(app_state.db(), role.as_deref()).await {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::<GroupedTrainings>::success(
                group_trainings(records),
                "Training materials retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list trainings");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve training materials",
            )
        }
    }
}

/// GET /api/trainings/{training_id}
///
/// ### Responses
/// - `200 OK` with the record
/// - `403 Forbidden` the caller's role is not listed on the record
/// - `404 Not Found` unknown or non-numeric id
/// - `500 Internal Server Error`
pub async fn get_training(
    State(app_state): State<AppState>,
    TrainingId(training_id): TrainingId,
    user: AuthUser,
) -> Response {
    let record = match TrainingModel::find_with_roles(app_state.db(), training_id).await {
        Ok(Some(record)) => record,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        Err(e) => {
            tracing::error!(error = %e, training_id, "Failed to load training");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve training material",
            );
        }
    };

    if authorize(user.role(), Resource::Training(&record.roles)) != Decision::Allow {
        return error_response(
            StatusCode::FORBIDDEN,
            "You do not have permission to view this training material",
        );
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            TrainingResponse::from(record),
            "Training material retrieved successfully",
        )),
    )
        .into_response()
}
