//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    BatchOutcome, OwnerKind, OwnerRef, SupportedLanguage, Translation, TranslationApi,
    TranslationEntry, TranslationError,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Native client that calls the domain service directly
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl TranslationApi for NativeClient {
    async fn load_translations(
        &self,
        owner: OwnerRef,
    ) -> Result<Vec<Translation>, TranslationError> {
        self.service.load_translations(owner).await
    }

    async fn load_translations_for(
        &self,
        kind: OwnerKind,
        ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Translation>>, TranslationError> {
        self.service.load_translations_for(kind, ids).await
    }

    async fn upsert_translations(
        &self,
        owner: OwnerRef,
        entries: Vec<TranslationEntry>,
    ) -> Result<BatchOutcome, TranslationError> {
        self.service.upsert_translations(owner, entries).await
    }

    async fn delete_owner_translations(&self, owner: OwnerRef) -> Result<u64, TranslationError> {
        self.service.delete_owner_translations(owner).await
    }

    async fn list_languages(
        &self,
        active_only: bool,
    ) -> Result<Vec<SupportedLanguage>, TranslationError> {
        self.service.list_languages(active_only).await
    }

    async fn get_language(&self, code: &str) -> Result<SupportedLanguage, TranslationError> {
        self.service.get_language(code).await
    }

    async fn register_language(
        &self,
        language: SupportedLanguage,
    ) -> Result<SupportedLanguage, TranslationError> {
        self.service.register_language(language).await
    }

    async fn set_language_active(
        &self,
        code: &str,
        active: bool,
    ) -> Result<SupportedLanguage, TranslationError> {
        self.service.set_language_active(code, active).await
    }
}
