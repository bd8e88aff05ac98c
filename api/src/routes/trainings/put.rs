use super::{
    common::{NOT_FOUND_MESSAGE, TrainingId, TrainingResponse, error_response},
    post::DUPLICATE_MESSAGE,
};
use crate::{response::ApiResponse, uploads::TrainingForm};
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::training::{Model as TrainingModel, StoredFileRef, is_unique_violation};
use util::{paths, state::AppState};

/// PUT /api/trainings/{training_id}
///
/// Updates a training material from a multipart form. Admin only.
///
/// `title`, `description`, `type` and `roles` keep their current value when
/// omitted or sent empty. `section`, `module` and `submodule` keep theirs only
/// when omitted; sending them empty clears them. A new `file` replaces the
/// stored one, which is removed once the record points at the new file.
///
/// ### Responses
/// - `200 OK` with the updated record
/// - `400 Bad Request` disallowed file type, or the change collides with another record
/// - `404 Not Found` unknown or non-numeric id
/// - `413 Payload Too Large`
/// - `500 Internal Server Error` including failure to remove the replaced file
pub async fn update_training(
    State(app_state): State<AppState>,
    TrainingId(training_id): TrainingId,
    multipart: Multipart,
) -> Response {
    let root = app_state.upload_root();

    let mut form = match TrainingForm::from_multipart(multipart, app_state.uploads()).await {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    let current = match TrainingModel::find_with_roles(app_state.db(), training_id).await {
        Ok(Some(record)) => record.training,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        Err(e) => {
            tracing::error!(error = %e, training_id, "Failed to load training");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update training material",
            );
        }
    };

    let replacement = match form.file.take() {
        Some(upload) => match upload.commit().await {
            Ok(stored) => Some(stored),
            Err(e) => return e.into_response(),
        },
        None => None,
    };

    let old_url = current.file_url.clone();
    let changes = form.into_changes(replacement.as_ref().map(|stored| StoredFileRef {
        file_url: stored.url.clone(),
        original_file_name: stored.original_name.clone(),
    }));

    let updated = match TrainingModel::apply_changes(app_state.db(), current, changes).await {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(stored) = &replacement {
                if let Err(io) = paths::remove_stored_file(root, &stored.url) {
                    tracing::warn!(error = %io, file = %stored.filename, "Failed to discard stored file");
                }
            }
            if is_unique_violation(&e) {
                return error_response(StatusCode::BAD_REQUEST, DUPLICATE_MESSAGE);
            }
            tracing::error!(error = %e, training_id, "Failed to update training");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update training material",
            );
        }
    };

    if replacement.is_some() {
        if let Err(e) = paths::remove_stored_file(root, &old_url) {
            tracing::error!(error = %e, training_id, url = %old_url, "Failed to remove replaced file");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Training material updated but the previous file could not be removed",
            );
        }
    }

    tracing::info!(training_id, "Updated training material");
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            TrainingResponse::from(updated),
            "Training material updated successfully",
        )),
    )
        .into_response()
}
