//! Application state container shared across Axum route handlers.
//!
//! This struct holds shared resources such as the database connection and the
//! upload settings. It is cloned into route handlers via Axum's `State<T>` extractor.

use crate::config;
use sea_orm::DatabaseConnection;
use std::{path::Path, path::PathBuf, sync::Arc};

/// Where uploaded training files live and how large they may be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub root: PathBuf,
    pub max_file_bytes: u64,
}

impl UploadSettings {
    pub fn new(root: impl Into<PathBuf>, max_file_bytes: u64) -> Self {
        Self {
            root: root.into(),
            max_file_bytes,
        }
    }

    /// Settings taken from the global configuration.
    pub fn from_config() -> Self {
        Self::new(crate::paths::upload_root(), config::max_upload_bytes())
    }
}

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - The upload directory and size limit, injected so tests can point them at a temp dir.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    uploads: Arc<UploadSettings>,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection and upload settings.
    pub fn new(db: DatabaseConnection, uploads: UploadSettings) -> Self {
        Self {
            db,
            uploads: Arc::new(uploads),
        }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn uploads(&self) -> &UploadSettings {
        &self.uploads
    }

    pub fn upload_root(&self) -> &Path {
        &self.uploads.root
    }
}
