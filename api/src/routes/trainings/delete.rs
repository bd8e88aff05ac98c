use super::common::{NOT_FOUND_MESSAGE, TrainingId, error_response};
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::training::Model as TrainingModel;
use util::{paths, state::AppState};

/// DELETE /api/trainings/{training_id}
///
/// Deletes the record, its roles and its stored file. Admin only.
/// A file that is already gone from disk is not an error.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// { "success": true, "data": null, "message": "Training material deleted successfully" }
/// ```
/// - `404 Not Found` unknown or non-numeric id; no file is touched
/// - `500 Internal Server Error` database failure, or the file could not be removed
pub async fn delete_training(
    State(app_state): State<AppState>,
    TrainingId(training_id): TrainingId,
) -> Response {
    let deleted = match TrainingModel::delete_by_id(app_state.db(), training_id).await {
        Ok(Some(deleted)) => deleted,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        Err(e) => {
            tracing::error!(error = %e, training_id, "Failed to delete training");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to delete training material",
            );
        }
    };

    match paths::remove_stored_file(app_state.upload_root(), &deleted.file_url) {
        Ok(removed) => {
            tracing::info!(training_id, file_removed = removed, "Deleted training material");
            (
                StatusCode::OK,
                Json(ApiResponse::<Empty>::success(
                    Empty,
                    "Training material deleted successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, training_id, url = %deleted.file_url, "Failed to remove stored file");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Training material deleted but its file could not be removed",
            )
        }
    }
}
