//! Database migrations for translation service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250110_000001_create_supported_languages::Migration),
            Box::new(m20250110_000002_create_translations::Migration),
        ]
    }
}

mod m20250110_000001_create_supported_languages;

mod m20250110_000002_create_translations;
