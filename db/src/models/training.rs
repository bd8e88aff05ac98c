use super::training_role::{self, Model as TrainingRole};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Query;
use sea_orm::{ActiveValue::Set, QueryOrder, SqlErr, TransactionTrait};

/// A training material: descriptive metadata plus exactly one stored file.
///
/// `section`, `module` and `submodule` are stored as empty strings when unset.
/// `(title, section, module)` is unique (`idx_trainings_title_section_module`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trainings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,

    pub description: Option<String>,

    /// Free-form category label.
    #[sea_orm(column_name = "type")]
    pub training_type: Option<String>,

    /// `/uploads/{stored_name}`
    pub file_url: String,

    /// File name as supplied by the uploading client.
    pub original_file_name: String,

    pub section: String,
    pub module: String,
    pub submodule: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::training_role::Entity")]
    Roles,
}

impl Related<super::training_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A training row together with the roles allowed to view it.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingWithRoles {
    pub training: Model,
    pub roles: Vec<String>,
}

/// Everything needed to insert a new training material.
#[derive(Clone, Debug, Default)]
pub struct NewTraining {
    pub title: String,
    pub description: Option<String>,
    pub training_type: Option<String>,
    pub file_url: String,
    pub original_file_name: String,
    pub roles: Vec<String>,
    pub section: String,
    pub module: String,
    pub submodule: String,
}

/// A replacement file for an existing training.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredFileRef {
    pub file_url: String,
    pub original_file_name: String,
}

/// Field-by-field changes for an update. `None` leaves a field untouched.
#[derive(Clone, Debug, Default)]
pub struct TrainingChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub training_type: Option<String>,
    pub roles: Option<Vec<String>>,
    pub section: Option<String>,
    pub module: Option<String>,
    pub submodule: Option<String>,
    pub file: Option<StoredFileRef>,
}

/// Trims, drops blanks and de-duplicates while keeping first-seen order.
pub fn normalize_roles<I, S>(roles: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for role in roles {
        let role = role.as_ref().trim();
        if !role.is_empty() && !out.iter().any(|r| r == role) {
            out.push(role.to_string());
        }
    }
    out
}

/// True when `err` was raised by a unique index, e.g. a duplicate triple.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl Model {
    /// Inserts the training and its roles in one transaction.
    pub async fn create(
        db: &DatabaseConnection,
        new: NewTraining,
    ) -> Result<TrainingWithRoles, DbErr> {
        let now = Utc::now();
        let roles = normalize_roles(&new.roles);

        let txn = db.begin().await?;

        let training = ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            training_type: Set(new.training_type),
            file_url: Set(new.file_url),
            original_file_name: Set(new.original_file_name),
            section: Set(new.section),
            module: Set(new.module),
            submodule: Set(new.submodule),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        TrainingRole::replace_for(&txn, training.id, &roles).await?;
        txn.commit().await?;

        Ok(TrainingWithRoles { training, roles })
    }

    pub async fn find_by_triple(
        db: &DatabaseConnection,
        title: &str,
        section: &str,
        module: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Title.eq(title))
            .filter(Column::Section.eq(section))
            .filter(Column::Module.eq(module))
            .one(db)
            .await
    }

    pub async fn find_with_roles(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<TrainingWithRoles>, DbErr> {
        let Some(training) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let roles = TrainingRole::roles_for(db, id).await?;
        Ok(Some(TrainingWithRoles { training, roles }))
    }

    /// Lists trainings in insertion order.
    ///
    /// With `Some(role)` only trainings whose roles contain exactly that role
    /// are returned; with `None` every training is returned.
    pub async fn list_visible(
        db: &DatabaseConnection,
        role: Option<&str>,
    ) -> Result<Vec<TrainingWithRoles>, DbErr> {
        let mut query = Entity::find().order_by_asc(Column::Id);

        if let Some(role) = role {
            query = query.filter(
                Column::Id.in_subquery(
                    Query::select()
                        .column(training_role::Column::TrainingId)
                        .from(training_role::Entity)
                        .and_where(training_role::Column::Role.eq(role))
                        .to_owned(),
                ),
            );
        }

        let trainings = query.all(db).await?;
        let ids = trainings.iter().map(|t| t.id).collect();
        let mut roles = TrainingRole::roles_for_many(db, ids).await?;

        Ok(trainings
            .into_iter()
            .map(|training| {
                let roles = roles.remove(&training.id).unwrap_or_default();
                TrainingWithRoles { training, roles }
            })
            .collect())
    }

    /// Writes `changes` over `current` (fields and roles in one transaction).
    pub async fn apply_changes(
        db: &DatabaseConnection,
        current: Model,
        changes: TrainingChanges,
    ) -> Result<TrainingWithRoles, DbErr> {
        let id = current.id;
        let mut active: ActiveModel = current.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(training_type) = changes.training_type {
            active.training_type = Set(Some(training_type));
        }
        if let Some(section) = changes.section {
            active.section = Set(section);
        }
        if let Some(module) = changes.module {
            active.module = Set(module);
        }
        if let Some(submodule) = changes.submodule {
            active.submodule = Set(submodule);
        }
        if let Some(file) = changes.file {
            active.file_url = Set(file.file_url);
            active.original_file_name = Set(file.original_file_name);
        }
        active.updated_at = Set(Utc::now());

        let txn = db.begin().await?;
        let training = active.update(&txn).await?;

        let roles = match changes.roles {
            Some(roles) => {
                let roles = normalize_roles(&roles);
                TrainingRole::replace_for(&txn, id, &roles).await?;
                roles
            }
            None => TrainingRole::roles_for(&txn, id).await?,
        };
        txn.commit().await?;

        Ok(TrainingWithRoles { training, roles })
    }

    /// Deletes the training and its roles; returns the removed row, if any.
    pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        let txn = db.begin().await?;

        let Some(training) = Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        training_role::Entity::delete_many()
            .filter(training_role::Column::TrainingId.eq(id))
            .exec(&txn)
            .await?;
        Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(Some(training))
    }
}
