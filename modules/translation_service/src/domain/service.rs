//! Domain service - business logic orchestration

use super::events::{EventPublisher, TranslationEvent};
use super::languages::LanguageRegistry;
use super::repository::{group_by_owner, EntryWriteError, LanguageRepository, TranslationRepository};
use super::resolver::{Translatable, WithTranslations};
use super::validation::{self, BatchLimits};
use crate::contract::{
    BatchOutcome, OwnerKind, OwnerRef, SupportedLanguage, Translation, TranslationEntry,
    TranslationError,
};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Domain service for translation management
pub struct Service {
    translations: Arc<dyn TranslationRepository>,
    languages: Arc<dyn LanguageRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    limits: BatchLimits,
    /// Cached language snapshot, dropped whenever a language changes
    registry: RwLock<Option<Arc<LanguageRegistry>>>,
    /// Bumped on every language change; a load started under an older
    /// generation is not cached
    registry_generation: AtomicU64,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        translations: Arc<dyn TranslationRepository>,
        languages: Arc<dyn LanguageRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        limits: BatchLimits,
    ) -> Self {
        Self {
            translations,
            languages,
            event_publisher,
            limits,
            registry: RwLock::new(None),
            registry_generation: AtomicU64::new(0),
        }
    }

    // ===== Loading =====

    /// Load every translation of one owner, unfiltered by locale
    pub async fn load_translations(
        &self,
        owner: OwnerRef,
    ) -> Result<Vec<Translation>, TranslationError> {
        let rows = self
            .translations
            .find_by_owner(owner)
            .await
            .map_err(internal)?;
        tracing::debug!(%owner, rows = rows.len(), "loaded translations");
        Ok(rows)
    }

    /// Load translations for many owners of one kind, grouped by owner id
    ///
    /// Owners without rows are absent from the map.
    pub async fn load_translations_for(
        &self,
        kind: OwnerKind,
        ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Translation>>, TranslationError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = self
            .translations
            .find_by_owners(kind, ids)
            .await
            .map_err(internal)?;
        tracing::debug!(%kind, owners = ids.len(), rows = rows.len(), "loaded translations");
        Ok(group_by_owner(rows))
    }

    /// Pair an entity with its translations
    pub async fn attach<E: Translatable>(
        &self,
        entity: E,
    ) -> Result<WithTranslations<E>, TranslationError> {
        let rows = self.load_translations(entity.owner()).await?;
        Ok(WithTranslations::new(entity, rows))
    }

    /// Pair many entities with their translations, one query per owner kind
    pub async fn attach_many<E: Translatable>(
        &self,
        entities: Vec<E>,
    ) -> Result<Vec<WithTranslations<E>>, TranslationError> {
        let mut ids_by_kind: BTreeMap<OwnerKind, Vec<i64>> = BTreeMap::new();
        for entity in &entities {
            let owner = entity.owner();
            let ids = ids_by_kind.entry(owner.kind).or_default();
            if !ids.contains(&owner.id) {
                ids.push(owner.id);
            }
        }

        let mut loaded: HashMap<OwnerKind, HashMap<i64, Vec<Translation>>> = HashMap::new();
        for (kind, ids) in ids_by_kind {
            loaded.insert(kind, self.load_translations_for(kind, &ids).await?);
        }

        Ok(entities
            .into_iter()
            .map(|entity| {
                let owner = entity.owner();
                let rows = loaded
                    .get(&owner.kind)
                    .and_then(|by_id| by_id.get(&owner.id))
                    .cloned()
                    .unwrap_or_default();
                WithTranslations::new(entity, rows)
            })
            .collect())
    }

    // ===== Writing =====

    /// Upsert a batch of entries for one owner
    ///
    /// Input is validated in full before storage is touched. The batch is
    /// then written in a single transaction.
    pub async fn upsert_translations(
        &self,
        owner: OwnerRef,
        entries: Vec<TranslationEntry>,
    ) -> Result<BatchOutcome, TranslationError> {
        let registry = self.languages().await?;
        let accepts_default = self.translations.accepts_default(owner.kind);
        let prepared =
            validation::prepare_batch(owner, entries, &registry, &self.limits, accepts_default)?;

        if prepared.is_empty() {
            return Ok(BatchOutcome {
                owner,
                translations: Vec::new(),
                defaults_written: Vec::new(),
            });
        }

        let outcome = self
            .translations
            .upsert_batch(owner, &prepared)
            .await
            .map_err(|err| match err.downcast_ref::<EntryWriteError>() {
                Some(failed) => {
                    tracing::error!(%owner, key = %failed.key, locale = %failed.locale, reason = %failed.reason, "translation batch rolled back");
                    TranslationError::BatchFailed {
                        key: failed.key.clone(),
                        locale: failed.locale.clone(),
                        reason: failed.reason.clone(),
                    }
                }
                None => internal(err),
            })?;

        tracing::info!(
            %owner,
            translations = outcome.translations.len(),
            defaults = outcome.defaults_written.len(),
            "translation batch committed"
        );

        if let Err(e) = self
            .event_publisher
            .publish(TranslationEvent::batch_written(&outcome))
            .await
        {
            // Log error but don't fail the operation
            tracing::warn!(%owner, error = %e, "failed to publish batch event");
        }

        Ok(outcome)
    }

    /// Remove every translation of an owner
    pub async fn delete_owner_translations(&self, owner: OwnerRef) -> Result<u64, TranslationError> {
        validation::validate_owner(owner)?;

        let removed = self
            .translations
            .delete_by_owner(owner)
            .await
            .map_err(internal)?;
        tracing::info!(%owner, removed, "owner translations purged");

        if let Err(e) = self
            .event_publisher
            .publish(TranslationEvent::owner_purged(owner, removed))
            .await
        {
            tracing::warn!(%owner, error = %e, "failed to publish purge event");
        }

        Ok(removed)
    }

    // ===== Language Operations =====

    /// Current language registry, loaded on first use
    pub async fn languages(&self) -> Result<Arc<LanguageRegistry>, TranslationError> {
        let cached = self.registry.read().clone();
        if let Some(registry) = cached {
            return Ok(registry);
        }

        let generation = self.registry_generation.load(Ordering::Acquire);
        let languages = self.languages.list_all().await.map_err(internal)?;
        let registry = Arc::new(LanguageRegistry::new(languages));

        let mut slot = self.registry.write();
        if self.registry_generation.load(Ordering::Acquire) == generation {
            *slot = Some(registry.clone());
        } else {
            tracing::debug!("languages changed during load, snapshot not cached");
        }
        Ok(registry)
    }

    /// List supported languages in tab order
    pub async fn list_languages(
        &self,
        active_only: bool,
    ) -> Result<Vec<SupportedLanguage>, TranslationError> {
        let registry = self.languages().await?;
        Ok(if active_only {
            registry.active().cloned().collect()
        } else {
            registry.all().to_vec()
        })
    }

    /// Get a language by code or alias
    pub async fn get_language(&self, code: &str) -> Result<SupportedLanguage, TranslationError> {
        let registry = self.languages().await?;
        registry
            .canonicalize(code)
            .cloned()
            .ok_or_else(|| TranslationError::NotFound {
                resource: "language".to_string(),
                id: code.to_string(),
            })
    }

    /// Register a new supported language
    pub async fn register_language(
        &self,
        mut language: SupportedLanguage,
    ) -> Result<SupportedLanguage, TranslationError> {
        language.code = language.code.trim().to_ascii_lowercase();
        validation::validate_language(&language)?;

        let registry = self.languages().await?;
        if let Some(existing) = registry.canonicalize(&language.code) {
            return Err(TranslationError::Conflict {
                reason: format!(
                    "language code '{}' is already registered as '{}'",
                    language.code, existing.code
                ),
            });
        }
        for alias in &language.aliases {
            if let Some(existing) = registry.canonicalize(alias) {
                return Err(TranslationError::Conflict {
                    reason: format!(
                        "alias '{}' of '{}' already names '{}'",
                        alias, language.code, existing.code
                    ),
                });
            }
        }

        let created = self
            .languages
            .create(&language)
            .await
            .map_err(internal)?;
        self.invalidate_languages();
        tracing::info!(code = %created.code, "language registered");
        Ok(created)
    }

    /// Toggle whether a language is accepted for writes
    pub async fn set_language_active(
        &self,
        code: &str,
        active: bool,
    ) -> Result<SupportedLanguage, TranslationError> {
        let language = self.get_language(code).await?;
        if language.is_default && !active {
            return Err(TranslationError::Conflict {
                reason: format!("default language '{}' cannot be deactivated", language.code),
            });
        }

        let updated = self
            .languages
            .set_active(&language.code, active)
            .await
            .map_err(internal)?
            .ok_or_else(|| TranslationError::NotFound {
                resource: "language".to_string(),
                id: language.code.clone(),
            })?;
        self.invalidate_languages();
        tracing::info!(code = %updated.code, active, "language activation changed");
        Ok(updated)
    }

    fn invalidate_languages(&self) {
        let mut slot = self.registry.write();
        self.registry_generation.fetch_add(1, Ordering::AcqRel);
        slot.take();
    }
}

fn internal(err: anyhow::Error) -> TranslationError {
    tracing::error!(error = ?err, "translation storage failure");
    TranslationError::Internal
}
