//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{BatchOutcome, OwnerKind, OwnerRef, SupportedLanguage, Translation, TranslationEntry};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Failure of one entry inside a batch write
///
/// Repositories wrap this in the returned `anyhow::Error` so the service can
/// report which entry aborted the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to write {key}/{locale}: {reason}")]
pub struct EntryWriteError {
    pub key: String,
    pub locale: String,
    pub reason: String,
}

/// Repository for translation rows
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// All rows of one owner, ordered by key, locale, id
    async fn find_by_owner(&self, owner: OwnerRef) -> Result<Vec<Translation>>;

    /// All rows of many owners of one kind
    async fn find_by_owners(&self, kind: OwnerKind, ids: &[i64]) -> Result<Vec<Translation>>;

    /// Write a prepared batch in one transaction
    ///
    /// Entries with the `default` locale go to the owner's base column, all
    /// others are upserted on (owner, locale, key). Either every entry is
    /// committed or none is.
    async fn upsert_batch(&self, owner: OwnerRef, entries: &[TranslationEntry]) -> Result<BatchOutcome>;

    /// Delete every row of one owner, returning the count removed
    async fn delete_by_owner(&self, owner: OwnerRef) -> Result<u64>;

    /// Whether `default` entries can be written for this owner kind
    fn accepts_default(&self, kind: OwnerKind) -> bool;
}

/// Repository for supported-language reference data
#[async_trait]
pub trait LanguageRepository: Send + Sync {
    /// Every language ordered by sort order
    async fn list_all(&self) -> Result<Vec<SupportedLanguage>>;

    /// Insert a new language
    async fn create(&self, language: &SupportedLanguage) -> Result<SupportedLanguage>;

    /// Toggle the active flag
    async fn set_active(&self, code: &str, active: bool) -> Result<Option<SupportedLanguage>>;
}

/// Group rows by owner id, keeping their order
pub fn group_by_owner(rows: Vec<Translation>) -> HashMap<i64, Vec<Translation>> {
    let mut grouped: HashMap<i64, Vec<Translation>> = HashMap::new();
    for row in rows {
        grouped.entry(row.owner.id).or_default().push(row);
    }
    grouped
}
