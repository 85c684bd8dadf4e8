//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with translation service.
//! NO HTTP - direct function calls for performance.

use super::{
    error::TranslationError,
    model::{BatchOutcome, OwnerKind, OwnerRef, SupportedLanguage, Translation, TranslationEntry},
};
use async_trait::async_trait;
use std::collections::HashMap;

/// Translation service API for inter-module communication
#[async_trait]
pub trait TranslationApi: Send + Sync {
    // ===== Translation Operations =====

    /// Load every translation row of one owner, unfiltered by locale
    async fn load_translations(&self, owner: OwnerRef)
        -> Result<Vec<Translation>, TranslationError>;

    /// Load translation rows for many owners of one kind, grouped by owner id
    async fn load_translations_for(
        &self,
        kind: OwnerKind,
        ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Translation>>, TranslationError>;

    /// Write a batch of entries atomically
    async fn upsert_translations(
        &self,
        owner: OwnerRef,
        entries: Vec<TranslationEntry>,
    ) -> Result<BatchOutcome, TranslationError>;

    /// Remove every translation of an owner (cascade on entity delete)
    async fn delete_owner_translations(&self, owner: OwnerRef) -> Result<u64, TranslationError>;

    // ===== Language Operations =====

    /// List supported languages ordered by sort order
    async fn list_languages(
        &self,
        active_only: bool,
    ) -> Result<Vec<SupportedLanguage>, TranslationError>;

    /// Get a language by code or alias
    async fn get_language(&self, code: &str) -> Result<SupportedLanguage, TranslationError>;

    /// Register a new supported language
    async fn register_language(
        &self,
        language: SupportedLanguage,
    ) -> Result<SupportedLanguage, TranslationError>;

    /// Toggle whether a language is accepted for writes
    async fn set_language_active(
        &self,
        code: &str,
        active: bool,
    ) -> Result<SupportedLanguage, TranslationError>;
}
