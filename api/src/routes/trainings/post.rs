use super::common::{TrainingResponse, error_response};
use crate::{
    response::ApiResponse,
    uploads::{TrainingForm, UploadError},
};
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::training::{Model as TrainingModel, StoredFileRef, is_unique_violation};
use util::{paths, state::AppState};

pub(super) const DUPLICATE_MESSAGE: &str =
    "A training material with the same title, section and module already exists";

/// POST /api/trainings
///
/// Creates a training material from a multipart form. Admin only.
///
/// ### Request Body (Multipart Form Data)
/// - `file` (file, required): `.pdf`, `.docx`, `.pptx` or `.mp4`, at most 20 MiB by default
/// - `title` (string, required)
/// - `description`, `type` (string, optional)
/// - `roles` (string, optional): repeatable or comma separated
/// - `section`, `module`, `submodule` (string, optional, default `""`)
///
/// ### Responses
/// - `201 Created` with the new record
/// - `400 Bad Request` missing file or title, disallowed file type, duplicate title/section/module
/// - `413 Payload Too Large` file over the size limit
/// - `500 Internal Server Error`
pub async fn create_training(
    State(app_state): State<AppState>,
    multipart: Multipart,
) -> Response {
    let root = app_state.upload_root();

    let mut form = match TrainingForm::from_multipart(multipart, app_state.uploads()).await {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    let Some(upload) = form.file.take() else {
        return UploadError::MissingFile.into_response();
    };

    let Some(title) = form.title().map(str::to_string) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing required field: title");
    };

    let (section, module, _) = form.grouping();
    match TrainingModel::find_by_triple(app_state.db(), &title, &section, &module).await {
        Ok(Some(_)) => return error_response(StatusCode::BAD_REQUEST, DUPLICATE_MESSAGE),
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to check for an existing training");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create training material",
            );
        }
    }

    let stored = match upload.commit().await {
        Ok(stored) => stored,
        Err(e) => return e.into_response(),
    };

    let new = form.into_new_training(
        title,
        StoredFileRef {
            file_url: stored.url.clone(),
            original_file_name: stored.original_name.clone(),
        },
    );

    match TrainingModel::create(app_state.db(), new).await {
        Ok(created) => {
            tracing::info!(
                id = created.training.id,
                file = %stored.filename,
                size = stored.size,
                "Created training material"
            );
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    TrainingResponse::from(created),
                    "Training material created successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            if let Err(io) = paths::remove_stored_file(root, &stored.url) {
                tracing::warn!(error = %io, file = %stored.filename, "Failed to discard stored file");
            }
            if is_unique_violation(&e) {
                return error_response(StatusCode::BAD_REQUEST, DUPLICATE_MESSAGE);
            }
            tracing::error!(error = %e, "Failed to insert training");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create training material",
            )
        }
    }
}
