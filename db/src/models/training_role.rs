use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait, QueryOrder};
use std::collections::HashMap;

/// One role allowed to view a training material.
///
/// `position` keeps the order in which the roles were submitted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "training_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub training_id: i64,

    #[sea_orm(primary_key, auto_increment = false)]
    pub role: String,

    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::training::Entity",
        from = "Column::TrainingId",
        to = "super::training::Column::Id",
        on_delete = "Cascade"
    )]
    Training,
}

impl Related<super::training::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Training.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Replaces every role row of `training_id` with `roles`, in order.
    pub async fn replace_for<C: ConnectionTrait>(
        db: &C,
        training_id: i64,
        roles: &[String],
    ) -> Result<(), DbErr> {
        Entity::delete_many()
            .filter(Column::TrainingId.eq(training_id))
            .exec(db)
            .await?;

        if roles.is_empty() {
            return Ok(());
        }

        let rows = roles.iter().enumerate().map(|(position, role)| ActiveModel {
            training_id: Set(training_id),
            role: Set(role.clone()),
            position: Set(position as i32),
        });

        Entity::insert_many(rows).exec(db).await?;
        Ok(())
    }

    pub async fn roles_for<C: ConnectionTrait>(
        db: &C,
        training_id: i64,
    ) -> Result<Vec<String>, DbErr> {
        let rows = Entity::find()
            .filter(Column::TrainingId.eq(training_id))
            .order_by_asc(Column::Position)
            .all(db)
            .await?;

        Ok(rows.into_iter().map(|r| r.role).collect())
    }

    /// Loads the roles of several trainings at once, keyed by training id.
    ///
    /// Trainings without roles are absent from the returned map.
    pub async fn roles_for_many<C: ConnectionTrait>(
        db: &C,
        training_ids: Vec<i64>,
    ) -> Result<HashMap<i64, Vec<String>>, DbErr> {
        let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
        if training_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = Entity::find()
            .filter(Column::TrainingId.is_in(training_ids))
            .order_by_asc(Column::TrainingId)
            .order_by_asc(Column::Position)
            .all(db)
            .await?;

        for row in rows {
            grouped.entry(row.training_id).or_default().push(row.role);
        }
        Ok(grouped)
    }
}
