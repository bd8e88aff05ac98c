//! Multipart upload handling for training files.
//!
//! A file field is validated by extension, streamed into a hidden staging file
//! inside the upload directory while its size is counted, and only becomes
//! visible under its final name once the caller commits it. A staged upload
//! that is dropped without being committed deletes its staging file, so every
//! rejected request leaves the upload directory as it found it.

pub mod form;

use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    extract::multipart::{Field, MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use util::{paths, state::UploadSettings};
use uuid::Uuid;

pub use form::TrainingForm;

/// Lower-case extensions accepted for training files.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "pptx", "mp4"];

/// Room left in the request body limit for the text fields and multipart framing.
pub const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("A file must be uploaded")]
    MissingFile,
    #[error("File type not allowed")]
    DisallowedType,
    #[error("File exceeds the maximum upload size")]
    TooLarge,
    #[error("Only one file may be uploaded per request")]
    MultipleFiles,
    #[error("Invalid multipart body: {0}")]
    Malformed(String),
    #[error("Failed to store file")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge
        } else {
            UploadError::Malformed(err.body_text())
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        if let UploadError::Io(e) = &self {
            tracing::error!(error = %e, "Upload could not be written to disk");
        }
        (
            self.status(),
            Json(ApiResponse::<Empty>::error(self.to_string())),
        )
            .into_response()
    }
}

/// Request body limit for routes that accept an upload.
pub fn body_limit(settings: &UploadSettings) -> usize {
    usize::try_from(settings.max_file_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(FORM_OVERHEAD_BYTES)
}

/// The lower-cased extension of `original_name` if it is on the allow-list.
pub fn allowed_extension(original_name: &str) -> Option<String> {
    let ext = Path::new(original_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();

    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// `{uuid}.{ext}`
pub fn generate_stored_name(ext: &str) -> String {
    format!("{}.{ext}", Uuid::new_v4())
}

/// A file that has been committed to the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Generated name on disk.
    pub filename: String,
    pub path: PathBuf,
    pub original_name: String,
    pub size: u64,
    /// `/uploads/{filename}`
    pub url: String,
}

/// A received file waiting for [`StagedUpload::commit`].
#[derive(Debug)]
pub struct StagedUpload {
    temp_path: PathBuf,
    final_path: PathBuf,
    stored_name: String,
    original_name: String,
    size: u64,
    committed: bool,
}

impl StagedUpload {
    /// Validates and streams one multipart file field into the staging area.
    ///
    /// The extension is checked before any byte is written; the size limit is
    /// enforced chunk by chunk.
    pub async fn receive(
        mut field: Field<'_>,
        settings: &UploadSettings,
    ) -> Result<Self, UploadError> {
        let original_name = field.file_name().unwrap_or_default().to_string();
        let ext = allowed_extension(&original_name).ok_or(UploadError::DisallowedType)?;

        tokio::fs::create_dir_all(&settings.root).await?;

        let stored_name = generate_stored_name(&ext);
        let mut staged = StagedUpload {
            temp_path: settings.root.join(format!(".{stored_name}.part")),
            final_path: settings.root.join(&stored_name),
            stored_name,
            original_name,
            size: 0,
            committed: false,
        };

        let mut file = tokio::fs::File::create(&staged.temp_path).await?;
        while let Some(chunk) = field.chunk().await? {
            staged.size += chunk.len() as u64;
            if staged.size > settings.max_file_bytes {
                tracing::info!(
                    original_name = %staged.original_name,
                    limit = settings.max_file_bytes,
                    "Rejected oversized upload"
                );
                return Err(UploadError::TooLarge);
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(staged)
    }

    /// Moves the staged bytes to their final name.
    pub async fn commit(mut self) -> Result<StoredFile, UploadError> {
        tokio::fs::rename(&self.temp_path, &self.final_path).await?;
        self.committed = true;

        Ok(StoredFile {
            filename: self.stored_name.clone(),
            path: self.final_path.clone(),
            original_name: self.original_name.clone(),
            size: self.size,
            url: paths::file_url(&self.stored_name),
        })
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_file(&self.temp_path);
        }
    }
}
