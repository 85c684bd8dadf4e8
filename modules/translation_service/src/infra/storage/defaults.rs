//! Base-column writers for `default` locale entries
//!
//! Owning entity tables live outside this module. Each owner kind that accepts
//! default-locale writes registers a writer that updates its own table inside
//! the batch transaction.

use crate::contract::OwnerKind;
use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::{ConnectionTrait, DatabaseTransaction, DbErr};
use std::collections::HashMap;
use std::sync::Arc;

/// Writes an owner's untranslated base column
#[async_trait]
pub trait DefaultColumnWriter: Send + Sync {
    /// Store `value` as the base value of `key` for owner `owner_id`
    async fn write_default(
        &self,
        txn: &DatabaseTransaction,
        owner_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), DbErr>;
}

/// Writer that issues `UPDATE table SET column = value WHERE id_column = owner_id`
#[derive(Debug, Clone)]
pub struct TableColumnWriter {
    table: String,
    id_column: String,
    /// Translation key -> column name
    columns: HashMap<String, String>,
}

impl TableColumnWriter {
    pub fn new(
        table: impl Into<String>,
        id_column: impl Into<String>,
        columns: HashMap<String, String>,
    ) -> Self {
        Self {
            table: table.into(),
            id_column: id_column.into(),
            columns,
        }
    }

    /// Column for `key`, if the key is writable
    pub fn column_for(&self, key: &str) -> Option<&str> {
        self.columns.get(key).map(String::as_str)
    }
}

#[async_trait]
impl DefaultColumnWriter for TableColumnWriter {
    async fn write_default(
        &self,
        txn: &DatabaseTransaction,
        owner_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), DbErr> {
        let column = self.column_for(key).ok_or_else(|| {
            DbErr::Custom(format!("no base column mapped for key '{}' on {}", key, self.table))
        })?;

        let stmt = Query::update()
            .table(Alias::new(self.table.as_str()))
            .value(Alias::new(column), value)
            .and_where(Expr::col(Alias::new(self.id_column.as_str())).eq(owner_id))
            .to_owned();

        let result = txn.execute(txn.get_database_backend().build(&stmt)).await?;
        if result.rows_affected() == 0 {
            return Err(DbErr::RecordNotFound(format!(
                "{} row with {} = {}",
                self.table, self.id_column, owner_id
            )));
        }
        Ok(())
    }
}

/// Registry of base-column writers keyed by owner kind
#[derive(Clone, Default)]
pub struct DefaultColumns {
    writers: HashMap<OwnerKind, Arc<dyn DefaultColumnWriter>>,
}

impl DefaultColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the writer for `kind`
    pub fn register(&mut self, kind: OwnerKind, writer: Arc<dyn DefaultColumnWriter>) -> &mut Self {
        self.writers.insert(kind, writer);
        self
    }

    pub fn get(&self, kind: OwnerKind) -> Option<&Arc<dyn DefaultColumnWriter>> {
        self.writers.get(&kind)
    }

    pub fn contains(&self, kind: OwnerKind) -> bool {
        self.writers.contains_key(&kind)
    }
}

impl std::fmt::Debug for DefaultColumns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.writers.keys().collect();
        kinds.sort();
        f.debug_struct("DefaultColumns").field("kinds", &kinds).finish()
    }
}
