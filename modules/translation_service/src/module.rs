//! Module declaration and lifecycle implementation

use crate::config::{Config, DefaultColumnConfig};
use crate::contract::{OwnerKind, TranslationApi};
use crate::domain::{LoggingEventPublisher, Service};
use crate::infra::storage::{
    DefaultColumns, Migrator, SeaOrmLanguageRepository, SeaOrmTranslationRepository,
    TableColumnWriter,
};
use anyhow::{anyhow, bail, Result};
use parking_lot::RwLock;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Translation service module
pub struct TranslationServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for TranslationServiceModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl TranslationServiceModule {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            service: RwLock::new(None),
        }
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    /// Open a connection pool for the configured database
    pub async fn connect(&self) -> Result<DatabaseConnection> {
        let cfg = self.config();

        let mut options = ConnectOptions::new(cfg.database_url.clone());
        options
            .max_connections(cfg.max_connections)
            .sqlx_logging(false);
        let db = Database::connect(options).await?;
        tracing::info!(max_connections = cfg.max_connections, "translation database connected");
        Ok(db)
    }

    /// Connect to the configured database and build the service
    pub async fn init(&self) -> Result<()> {
        let db = self.connect().await?;
        self.init_with_connection(Arc::new(db)).await
    }

    /// Build the service on an existing connection
    pub async fn init_with_connection(&self, db: Arc<DatabaseConnection>) -> Result<()> {
        let cfg = self.config();

        if cfg.run_migrations {
            Self::migrate(&db).await?;
        }

        let defaults = default_columns(&cfg.default_columns)?;

        // Build repositories
        let translation_repo = Arc::new(SeaOrmTranslationRepository::with_defaults(
            db.clone(),
            defaults,
        ));
        let language_repo = Arc::new(SeaOrmLanguageRepository::new(db));

        let event_publisher = Arc::new(LoggingEventPublisher);

        // Build domain service
        let service = Arc::new(Service::new(
            translation_repo,
            language_repo,
            event_publisher,
            cfg.limits(),
        ));
        *self.service.write() = Some(service);

        tracing::info!(
            default_columns = cfg.default_columns.len(),
            strict_locales = cfg.strict_locale_validation,
            "Translation service initialized"
        );
        Ok(())
    }

    /// Apply pending migrations
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Translation service migrations completed");
        Ok(())
    }

    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow!("Service not initialized"))
    }

    /// In-process client over the initialized service
    pub fn client(&self) -> Result<Arc<dyn TranslationApi>> {
        let service = self.service()?;
        Ok(Arc::new(crate::api::native::NativeClient::new(service)))
    }
}

/// Build base-column writers from configuration
fn default_columns(entries: &[DefaultColumnConfig]) -> Result<DefaultColumns> {
    let mut defaults = DefaultColumns::new();
    for entry in entries {
        let kind = OwnerKind::from_tag(&entry.owner)
            .ok_or_else(|| anyhow!("default_columns: unknown owner kind '{}'", entry.owner))?;
        if let Some(key) = entry.columns.keys().find(|key| !kind.is_translatable(key)) {
            bail!("default_columns: '{}' is not a translatable field of {}", key, kind);
        }
        if defaults.contains(kind) {
            bail!("default_columns: {} is configured twice", kind);
        }

        let writer = TableColumnWriter::new(
            entry.table.clone(),
            entry.id_column.clone(),
            entry.columns.clone(),
        );
        defaults.register(kind, Arc::new(writer));
    }
    Ok(defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn store_columns(owner: &str, key: &str) -> DefaultColumnConfig {
        DefaultColumnConfig {
            owner: owner.to_string(),
            table: "stores".to_string(),
            id_column: "id".to_string(),
            columns: HashMap::from([(key.to_string(), key.to_string())]),
        }
    }

    #[test]
    fn default_columns_are_checked_against_owner_kinds() {
        let defaults = default_columns(&[store_columns("store", "name")]).unwrap();
        assert!(defaults.contains(OwnerKind::Store));
        assert!(!defaults.contains(OwnerKind::Item));

        assert!(default_columns(&[store_columns("shop", "name")]).is_err());
        assert!(default_columns(&[store_columns("store", "slug")]).is_err());
        assert!(default_columns(&[store_columns("store", "name"), store_columns("store", "address")])
            .is_err());
    }

    #[test]
    fn service_is_unavailable_before_init() {
        let module = TranslationServiceModule::default();
        assert!(module.service().is_err());
        assert!(module.client().is_err());
    }
}
