use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202610160001_create_trainings::Migration),
            Box::new(migrations::m202610160002_create_training_roles::Migration),
        ]
    }
}
