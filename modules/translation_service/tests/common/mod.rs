//! Common test utilities: a sample translatable entity, seed languages and
//! in-memory repositories

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use translation_service::contract::*;
use translation_service::domain::repository::{
    EntryWriteError, LanguageRepository, TranslationRepository,
};
use translation_service::domain::{BatchLimits, EventPublisher, Service, Translatable, TranslationEvent};

/// Store record as the owning module would hold it
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
}

impl Store {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            address: None,
        }
    }
}

impl Translatable for Store {
    fn owner(&self) -> OwnerRef {
        OwnerRef::new(OwnerKind::Store, self.id)
    }

    fn default_value(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(self.name.as_str()),
            "address" => self.address.as_deref(),
            _ => None,
        }
    }
}

/// en (default), ar (rtl) and ckb (rtl, Kurdish group)
pub fn seed_languages() -> Vec<SupportedLanguage> {
    let mut en = SupportedLanguage::new("en", "English");
    en.is_default = true;
    en.sort_order = 1;
    en.aliases = vec!["eng".into(), "english".into()];

    let mut ar = SupportedLanguage::new("ar", "Arabic");
    ar.direction = TextDirection::Rtl;
    ar.sort_order = 2;
    ar.aliases = vec!["ara".into(), "arabic".into(), "ar_IQ".into()];

    let mut ckb = SupportedLanguage::new("ckb", "Kurdish Sorani");
    ckb.direction = TextDirection::Rtl;
    ckb.is_fallback = true;
    ckb.sort_order = 3;
    ckb.aliases = vec!["kurdish".into(), "sorani".into(), "ckb_IQ".into()];

    vec![en, ar, ckb]
}

pub fn limits() -> BatchLimits {
    BatchLimits {
        max_batch_size: 50,
        max_value_size: 1024,
        strict_locales: true,
    }
}

pub fn entry(locale: &str, key: &str, value: &str) -> TranslationEntry {
    TranslationEntry::new(locale, key, value)
}

// ===== Mock repositories =====

#[derive(Default)]
struct TranslationState {
    rows: Vec<Translation>,
    defaults: HashMap<(OwnerRef, String), String>,
    next_id: i32,
}

/// In-memory translation repository with all-or-nothing batches
#[derive(Clone, Default)]
pub struct MockTranslationRepo {
    state: Arc<RwLock<TranslationState>>,
    /// Key whose write fails, to simulate a storage error mid-batch
    fail_on_key: Arc<RwLock<Option<String>>>,
    accepts_default: bool,
    pub batch_calls: Arc<Mutex<usize>>,
}

impl MockTranslationRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_columns() -> Self {
        Self {
            accepts_default: true,
            ..Self::default()
        }
    }

    pub fn fail_on(&self, key: &str) {
        *self.fail_on_key.write() = Some(key.to_string());
    }

    pub fn count(&self) -> usize {
        self.state.read().rows.len()
    }

    pub fn default_of(&self, owner: OwnerRef, key: &str) -> Option<String> {
        self.state
            .read()
            .defaults
            .get(&(owner, key.to_string()))
            .cloned()
    }

    pub fn batches(&self) -> usize {
        *self.batch_calls.lock()
    }
}

#[async_trait]
impl TranslationRepository for MockTranslationRepo {
    async fn find_by_owner(&self, owner: OwnerRef) -> anyhow::Result<Vec<Translation>> {
        let mut rows: Vec<_> = self
            .state
            .read()
            .rows
            .iter()
            .filter(|t| t.owner == owner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (&a.key, &a.locale, a.id).cmp(&(&b.key, &b.locale, b.id)));
        Ok(rows)
    }

    async fn find_by_owners(&self, kind: OwnerKind, ids: &[i64]) -> anyhow::Result<Vec<Translation>> {
        Ok(self
            .state
            .read()
            .rows
            .iter()
            .filter(|t| t.owner.kind == kind && ids.contains(&t.owner.id))
            .cloned()
            .collect())
    }

    async fn upsert_batch(
        &self,
        owner: OwnerRef,
        entries: &[TranslationEntry],
    ) -> anyhow::Result<BatchOutcome> {
        *self.batch_calls.lock() += 1;
        let fail_on = self.fail_on_key.read().clone();

        let mut state = self.state.write();
        // Work on a copy and swap it in only when every entry succeeded
        let mut staged_rows = state.rows.clone();
        let mut staged_defaults = state.defaults.clone();
        let mut next_id = state.next_id;
        let mut written = Vec::new();
        let mut defaults_written = Vec::new();

        for entry in entries {
            if fail_on.as_deref() == Some(entry.key.as_str()) {
                return Err(EntryWriteError {
                    key: entry.key.clone(),
                    locale: entry.locale.clone(),
                    reason: "simulated storage failure".to_string(),
                }
                .into());
            }

            if entry.is_default() {
                staged_defaults.insert((owner, entry.key.clone()), entry.value.clone());
                defaults_written.push(entry.key.clone());
                continue;
            }

            let now = Utc::now();
            let existing = staged_rows
                .iter_mut()
                .find(|t| t.owner == owner && t.locale == entry.locale && t.key == entry.key);
            match existing {
                Some(row) => {
                    row.value = Some(entry.value.clone());
                    row.updated_at = now;
                    written.push(row.clone());
                }
                None => {
                    next_id += 1;
                    let row = Translation {
                        id: next_id,
                        owner,
                        locale: entry.locale.clone(),
                        key: entry.key.clone(),
                        value: Some(entry.value.clone()),
                        created_at: now,
                        updated_at: now,
                    };
                    staged_rows.push(row.clone());
                    written.push(row);
                }
            }
        }

        state.rows = staged_rows;
        state.defaults = staged_defaults;
        state.next_id = next_id;

        Ok(BatchOutcome {
            owner,
            translations: written,
            defaults_written,
        })
    }

    async fn delete_by_owner(&self, owner: OwnerRef) -> anyhow::Result<u64> {
        let mut state = self.state.write();
        let before = state.rows.len();
        state.rows.retain(|t| t.owner != owner);
        Ok((before - state.rows.len()) as u64)
    }

    fn accepts_default(&self, _kind: OwnerKind) -> bool {
        self.accepts_default
    }
}

/// In-memory language repository
#[derive(Clone)]
pub struct MockLanguageRepo {
    data: Arc<RwLock<Vec<SupportedLanguage>>>,
    pub list_calls: Arc<Mutex<usize>>,
}

impl MockLanguageRepo {
    pub fn seeded() -> Self {
        Self {
            data: Arc::new(RwLock::new(seed_languages())),
            list_calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn list_count(&self) -> usize {
        *self.list_calls.lock()
    }
}

#[async_trait]
impl LanguageRepository for MockLanguageRepo {
    async fn list_all(&self) -> anyhow::Result<Vec<SupportedLanguage>> {
        *self.list_calls.lock() += 1;
        Ok(self.data.read().clone())
    }

    async fn create(&self, language: &SupportedLanguage) -> anyhow::Result<SupportedLanguage> {
        self.data.write().push(language.clone());
        Ok(language.clone())
    }

    async fn set_active(
        &self,
        code: &str,
        active: bool,
    ) -> anyhow::Result<Option<SupportedLanguage>> {
        let mut data = self.data.write();
        Ok(data.iter_mut().find(|l| l.code == code).map(|l| {
            l.is_active = active;
            l.clone()
        }))
    }
}

/// Publisher that keeps every event it receives
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    events: Arc<Mutex<Vec<TranslationEvent>>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<TranslationEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: TranslationEvent) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("event sink unavailable");
        }
        self.events.lock().push(event);
        Ok(())
    }
}

/// Service wired to the given mocks
pub fn service_with(
    translations: MockTranslationRepo,
    languages: MockLanguageRepo,
    publisher: RecordingPublisher,
) -> Arc<Service> {
    Arc::new(Service::new(
        Arc::new(translations),
        Arc::new(languages),
        Arc::new(publisher),
        limits(),
    ))
}
