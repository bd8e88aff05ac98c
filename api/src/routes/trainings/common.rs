//! Response shapes shared by the training endpoints.

use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use db::models::training::TrainingWithRoles;
use serde::Serialize;
use std::collections::BTreeMap;

pub const NOT_FOUND_MESSAGE: &str = "Training material not found";

/// An error envelope with `status`.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<Empty>::error(message))).into_response()
}

/// The `{training_id}` path segment.
///
/// An id that is not an integer cannot name a record, so it is rejected
/// with the same JSON 404 as an unknown id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingId(pub i64);

impl<S> FromRequestParts<S> for TrainingId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| TrainingId(id))
            .map_err(|_| error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE))
    }
}

/// A training material as returned to clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub training_type: Option<String>,
    pub file_url: String,
    pub original_file_name: String,
    pub roles: Vec<String>,
    pub section: String,
    pub module: String,
    pub submodule: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TrainingWithRoles> for TrainingResponse {
    fn from(record: TrainingWithRoles) -> Self {
        let t = record.training;
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            training_type: t.training_type,
            file_url: t.file_url,
            original_file_name: t.original_file_name,
            roles: record.roles,
            section: t.section,
            module: t.module,
            submodule: Some(t.submodule),
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

/// `section -> module -> trainings`
pub type GroupedTrainings = BTreeMap<String, BTreeMap<String, Vec<TrainingResponse>>>;

/// Groups records by section, then module, keeping their order inside each
/// module. An empty submodule is reported as `null`.
pub fn group_trainings(records: Vec<TrainingWithRoles>) -> GroupedTrainings {
    let mut grouped = GroupedTrainings::new();

    for record in records {
        let mut training = TrainingResponse::from(record);
        training.submodule = training.submodule.filter(|s| !s.is_empty());

        grouped
            .entry(training.section.clone())
            .or_default()
            .entry(training.module.clone())
            .or_default()
            .push(training);
    }

    grouped
}
