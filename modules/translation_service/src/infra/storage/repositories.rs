//! SeaORM repository implementations

use super::defaults::DefaultColumns;
use super::entity;
use super::mapper::translations_from;
use crate::contract::{
    BatchOutcome, OwnerKind, OwnerRef, SupportedLanguage, Translation, TranslationEntry,
};
use crate::domain::repository::{EntryWriteError, LanguageRepository, TranslationRepository};
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use std::sync::Arc;

// ===== Translation Repository =====

pub struct SeaOrmTranslationRepository {
    db: Arc<DatabaseConnection>,
    defaults: DefaultColumns,
}

impl SeaOrmTranslationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self::with_defaults(db, DefaultColumns::new())
    }

    pub fn with_defaults(db: Arc<DatabaseConnection>, defaults: DefaultColumns) -> Self {
        Self { db, defaults }
    }
}

/// Insert or update one row on its unique tuple
///
/// Last writer wins. `created_at` keeps its first value.
async fn upsert_row<C: ConnectionTrait>(
    conn: &C,
    owner: OwnerRef,
    entry: &TranslationEntry,
) -> Result<entity::Model, DbErr> {
    use sea_orm::ActiveValue::Set;

    let now = chrono::Utc::now();
    let row = entity::ActiveModel {
        owner_type: Set(owner.kind.tag().to_string()),
        owner_id: Set(owner.id),
        locale: Set(entry.locale.clone()),
        key: Set(entry.key.clone()),
        value: Set(Some(entry.value.clone())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    entity::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                entity::Column::OwnerType,
                entity::Column::OwnerId,
                entity::Column::Locale,
                entity::Column::Key,
            ])
            .update_columns([entity::Column::Value, entity::Column::UpdatedAt])
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    entity::Entity::find()
        .filter(entity::Column::OwnerType.eq(owner.kind.tag()))
        .filter(entity::Column::OwnerId.eq(owner.id))
        .filter(entity::Column::Locale.eq(entry.locale.as_str()))
        .filter(entity::Column::Key.eq(entry.key.as_str()))
        .one(conn)
        .await?
        .ok_or_else(|| {
            DbErr::RecordNotFound(format!("{}/{} for {}", entry.key, entry.locale, owner))
        })
}

fn entry_failure(entry: &TranslationEntry, err: DbErr) -> anyhow::Error {
    EntryWriteError {
        key: entry.key.clone(),
        locale: entry.locale.clone(),
        reason: err.to_string(),
    }
    .into()
}

#[async_trait]
impl TranslationRepository for SeaOrmTranslationRepository {
    async fn find_by_owner(&self, owner: OwnerRef) -> Result<Vec<Translation>> {
        let rows = entity::Entity::find()
            .filter(entity::Column::OwnerType.eq(owner.kind.tag()))
            .filter(entity::Column::OwnerId.eq(owner.id))
            .order_by_asc(entity::Column::Key)
            .order_by_asc(entity::Column::Locale)
            .order_by_asc(entity::Column::Id)
            .all(&*self.db)
            .await?;

        translations_from(rows)
    }

    async fn find_by_owners(&self, kind: OwnerKind, ids: &[i64]) -> Result<Vec<Translation>> {
        let rows = entity::Entity::find()
            .filter(entity::Column::OwnerType.eq(kind.tag()))
            .filter(entity::Column::OwnerId.is_in(ids.iter().copied()))
            .order_by_asc(entity::Column::OwnerId)
            .order_by_asc(entity::Column::Key)
            .order_by_asc(entity::Column::Locale)
            .order_by_asc(entity::Column::Id)
            .all(&*self.db)
            .await?;

        translations_from(rows)
    }

    async fn upsert_batch(&self, owner: OwnerRef, entries: &[TranslationEntry]) -> Result<BatchOutcome> {
        let txn = self.db.begin().await?;
        let mut rows = Vec::with_capacity(entries.len());
        let mut defaults_written = Vec::new();

        for entry in entries {
            if entry.is_default() {
                let writer = self.defaults.get(owner.kind).ok_or_else(|| {
                    entry_failure(
                        entry,
                        DbErr::Custom(format!("no default column writer for {}", owner.kind)),
                    )
                })?;
                writer
                    .write_default(&txn, owner.id, &entry.key, &entry.value)
                    .await
                    .map_err(|e| entry_failure(entry, e))?;
                defaults_written.push(entry.key.clone());
            } else {
                let row = upsert_row(&txn, owner, entry)
                    .await
                    .map_err(|e| entry_failure(entry, e))?;
                rows.push(row);
            }
        }

        // Dropping the transaction on an early return above rolls it back
        txn.commit().await?;

        Ok(BatchOutcome {
            owner,
            translations: translations_from(rows)?,
            defaults_written,
        })
    }

    async fn delete_by_owner(&self, owner: OwnerRef) -> Result<u64> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::OwnerType.eq(owner.kind.tag()))
            .filter(entity::Column::OwnerId.eq(owner.id))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected)
    }

    fn accepts_default(&self, kind: OwnerKind) -> bool {
        self.defaults.contains(kind)
    }
}

// ===== Language Repository =====

pub struct SeaOrmLanguageRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmLanguageRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LanguageRepository for SeaOrmLanguageRepository {
    async fn list_all(&self) -> Result<Vec<SupportedLanguage>> {
        let results = entity::language::Entity::find()
            .order_by_asc(entity::language::Column::SortOrder)
            .order_by_asc(entity::language::Column::Code)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(|e| e.try_into())
            .collect::<Result<Vec<_>>>()
    }

    async fn create(&self, language: &SupportedLanguage) -> Result<SupportedLanguage> {
        let active_model: entity::language::ActiveModel = language.into();
        let result = active_model.insert(&*self.db).await?;

        result.try_into()
    }

    async fn set_active(&self, code: &str, active: bool) -> Result<Option<SupportedLanguage>> {
        use sea_orm::ActiveValue::Set;

        let Some(existing) = entity::language::Entity::find()
            .filter(entity::language::Column::Code.eq(code))
            .one(&*self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.is_active = Set(active);
        model.updated_at = Set(chrono::Utc::now());
        let updated = model.update(&*self.db).await?;

        Ok(Some(updated.try_into()?))
    }
}
