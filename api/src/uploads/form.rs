//! The multipart form shared by the create and update endpoints.

use super::{StagedUpload, UploadError};
use axum::extract::{Multipart, multipart::Field};
use db::models::training::{NewTraining, StoredFileRef, TrainingChanges, normalize_roles};
use util::state::UploadSettings;

/// Text fields and the optional file of a create/update request.
///
/// Each text field is `None` when the client did not send it at all and
/// `Some("")` when it was sent empty; update relies on that difference.
#[derive(Debug, Default)]
pub struct TrainingForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub training_type: Option<String>,
    pub roles: Option<Vec<String>>,
    pub section: Option<String>,
    pub module: Option<String>,
    pub submodule: Option<String>,
    pub file: Option<StagedUpload>,
}

async fn read_text(field: Field<'_>) -> Result<String, UploadError> {
    Ok(field.text().await?)
}

/// Splits a `roles` value on commas; repeated fields accumulate.
pub fn split_roles(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

/// `None` for absent or empty values.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TrainingForm {
    /// Reads every field of the request.
    ///
    /// Unknown fields are skipped. A second `file` field fails the request.
    pub async fn from_multipart(
        mut multipart: Multipart,
        settings: &UploadSettings,
    ) -> Result<Self, UploadError> {
        let mut form = TrainingForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                "file" => {
                    if form.file.is_some() {
                        return Err(UploadError::MultipleFiles);
                    }
                    form.file = Some(StagedUpload::receive(field, settings).await?);
                }
                "roles" | "roles[]" => {
                    let value = read_text(field).await?;
                    form.roles
                        .get_or_insert_with(Vec::new)
                        .extend(split_roles(&value));
                }
                "title" => form.title = Some(read_text(field).await?),
                "description" => form.description = Some(read_text(field).await?),
                "type" => form.training_type = Some(read_text(field).await?),
                "section" => form.section = Some(read_text(field).await?),
                "module" => form.module = Some(read_text(field).await?),
                "submodule" => form.submodule = Some(read_text(field).await?),
                _ => continue,
            }
        }

        Ok(form)
    }

    /// The title, if one was sent and is not blank.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// `(section, module, submodule)` with absent values as `""`.
    pub fn grouping(&self) -> (String, String, String) {
        (
            self.section.clone().unwrap_or_default(),
            self.module.clone().unwrap_or_default(),
            self.submodule.clone().unwrap_or_default(),
        )
    }

    /// Record fields for a create request whose file is already stored.
    pub fn into_new_training(self, title: String, file: StoredFileRef) -> NewTraining {
        let (section, module, submodule) = self.grouping();

        NewTraining {
            title,
            description: non_empty(self.description),
            training_type: non_empty(self.training_type),
            file_url: file.file_url,
            original_file_name: file.original_file_name,
            roles: normalize_roles(self.roles.unwrap_or_default()),
            section,
            module,
            submodule,
        }
    }

    /// Changes for an update request.
    ///
    /// `title`, `description`, `type` and `roles` keep their previous value
    /// when absent or empty. `section`, `module` and `submodule` keep it only
    /// when absent; an empty value clears them.
    pub fn into_changes(self, file: Option<StoredFileRef>) -> TrainingChanges {
        let title = self.title().map(str::to_string);
        let roles = self
            .roles
            .map(normalize_roles)
            .filter(|roles| !roles.is_empty());

        TrainingChanges {
            title,
            description: non_empty(self.description),
            training_type: non_empty(self.training_type),
            roles,
            section: self.section,
            module: self.module,
            submodule: self.submodule,
            file,
        }
    }
}
