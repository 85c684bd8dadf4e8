//! Storage layer - database entities and repositories

pub mod defaults;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

pub use defaults::{DefaultColumnWriter, DefaultColumns, TableColumnWriter};
pub use migrations::Migrator;
pub use repositories::{SeaOrmLanguageRepository, SeaOrmTranslationRepository};
