//! Domain events for translation service
//!
//! Events describe committed writes only:
//! - `BatchWritten`: an upsert batch was committed for one owner
//! - `OwnerPurged`: every translation of an owner was removed

use crate::contract::{BatchOutcome, OwnerRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain event types for translations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum TranslationEvent {
    /// A batch was upserted
    BatchWritten(BatchWrittenEvent),
    /// All rows of an owner were deleted
    OwnerPurged(OwnerPurgedEvent),
}

/// Event data for a committed batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchWrittenEvent {
    /// Owner kind tag
    pub owner_type: String,
    /// Owner id
    pub owner_id: i64,
    /// Distinct locales written, in submission order
    pub locales: Vec<String>,
    /// Distinct keys written, in submission order
    pub keys: Vec<String>,
    /// Number of base-column writes
    pub defaults_written: usize,
    /// Timestamp of the event
    pub timestamp: DateTime<Utc>,
}

/// Event data for an owner purge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerPurgedEvent {
    /// Owner kind tag
    pub owner_type: String,
    /// Owner id
    pub owner_id: i64,
    /// Rows removed
    pub removed: u64,
    /// Timestamp of the event
    pub timestamp: DateTime<Utc>,
}

impl TranslationEvent {
    /// Create a batch event from a committed outcome
    pub fn batch_written(outcome: &BatchOutcome) -> Self {
        let mut locales: Vec<String> = Vec::new();
        let mut keys: Vec<String> = Vec::new();
        for t in &outcome.translations {
            if !locales.contains(&t.locale) {
                locales.push(t.locale.clone());
            }
            if !keys.contains(&t.key) {
                keys.push(t.key.clone());
            }
        }
        for key in &outcome.defaults_written {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }

        Self::BatchWritten(BatchWrittenEvent {
            owner_type: outcome.owner.kind.tag().to_string(),
            owner_id: outcome.owner.id,
            locales,
            keys,
            defaults_written: outcome.defaults_written.len(),
            timestamp: Utc::now(),
        })
    }

    /// Create a purge event
    pub fn owner_purged(owner: OwnerRef, removed: u64) -> Self {
        Self::OwnerPurged(OwnerPurgedEvent {
            owner_type: owner.kind.tag().to_string(),
            owner_id: owner.id,
            removed,
            timestamp: Utc::now(),
        })
    }
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one event
    async fn publish(&self, event: TranslationEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: TranslationEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Publisher that writes each event to the log as JSON
pub struct LoggingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: TranslationEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(target: "translation_service::events", %payload, "translation event");
        Ok(())
    }
}
