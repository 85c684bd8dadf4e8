//! Configuration for translation service module

use crate::domain::BatchLimits;
use anyhow::Context;
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Prefix of environment overrides, e.g. `TRANSLATIONS_DATABASE_URL`
pub const ENV_PREFIX: &str = "TRANSLATIONS_";

/// Translation service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SeaORM connection string
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Apply pending migrations during init
    #[serde(default = "default_true")]
    pub run_migrations: bool,

    /// Reject locales that are not active supported languages
    #[serde(default = "default_true")]
    pub strict_locale_validation: bool,

    /// Maximum number of entries in one batch
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Maximum translated value size in bytes
    #[serde(default = "default_max_value_size")]
    pub max_value_size: usize,

    /// Base-column targets for `default` locale writes
    #[serde(default)]
    pub default_columns: Vec<DefaultColumnConfig>,
}

/// Where an owner kind keeps its untranslated values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultColumnConfig {
    /// Owner kind tag, e.g. `store`
    pub owner: String,
    pub table: String,
    #[serde(default = "default_id_column")]
    pub id_column: String,
    /// Translation key -> column name
    pub columns: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            run_migrations: true,
            strict_locale_validation: true,
            max_batch_size: default_max_batch_size(),
            max_value_size: default_max_value_size(),
            default_columns: Vec::new(),
        }
    }
}

impl Config {
    /// Layered sources: defaults, then the YAML file, then the environment
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
        }
        Self::figment(path)
            .extract()
            .context("failed to load translation service config")
    }

    pub fn limits(&self) -> BatchLimits {
        BatchLimits {
            max_batch_size: self.max_batch_size,
            max_value_size: self.max_value_size,
            strict_locales: self.strict_locale_validation,
        }
    }
}

fn default_database_url() -> String {
    "sqlite://translations.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_max_batch_size() -> usize {
    500
}

fn default_max_value_size() -> usize {
    1024 * 1024 // 1MB
}

fn default_id_column() -> String {
    "id".to_string()
}
