use async_trait::async_trait;
use diesel::prelude::*;

use moneta_core::errors::Result;
use moneta_core::ledger::{LedgerEntry, LedgerFilter, LedgerRepositoryTrait, NewLedgerEntry};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::ledger_entries;
use crate::schema::ledger_entries::dsl::*;

use super::model::LedgerEntryDB;

/// Repository for managing ledger entries in the database.
/// Entries are immutable: there is no update path.
pub struct LedgerRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl LedgerRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    async fn create(&self, new_entry: NewLedgerEntry) -> Result<LedgerEntry> {
        self.writer
            .exec(move |conn| {
                let mut entry_db: LedgerEntryDB = new_entry.into();
                entry_db.id = uuid::Uuid::new_v4().to_string();

                diesel::insert_into(ledger_entries::table)
                    .values(&entry_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(entry_db.into())
            })
            .await
    }

    async fn delete(&self, entry_id: &str) -> Result<usize> {
        let id_owned = entry_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(ledger_entries.find(id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, entry_id: &str) -> Result<LedgerEntry> {
        let mut conn = get_connection(&self.pool)?;

        let entry = ledger_entries
            .select(LedgerEntryDB::as_select())
            .find(entry_id)
            .first::<LedgerEntryDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(entry.into())
    }

    fn list(&self, filter: &LedgerFilter) -> Result<Vec<LedgerEntry>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = ledger_entries::table.into_boxed();

        if let Some(from) = filter.from {
            query = query.filter(entry_date.ge(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(entry_date.le(to));
        }
        if let Some(dir) = filter.direction {
            query = query.filter(direction.eq(dir.as_str()));
        }
        if let Some(ref cat) = filter.category_id {
            query = query.filter(category_id.eq(cat.clone()));
        }
        if let Some(ref h) = filter.holding_id {
            query = query.filter(holding_id.eq(h.clone()));
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let results = query
            .select(LedgerEntryDB::as_select())
            .order((entry_date.desc(), created_at.desc()))
            .load::<LedgerEntryDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(LedgerEntry::from).collect())
    }
}
