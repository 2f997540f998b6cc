use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use moneta_core::errors::Result;
use moneta_core::holdings::{
    Holding, HoldingKind, HoldingRepositoryTrait, HoldingUpdate, NewHolding, SettlementWrite,
};
use moneta_core::ledger::{LedgerEntry, NewLedgerEntry};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::ledger::model::LedgerEntryDB;
use crate::schema::holdings::dsl::*;
use crate::schema::{holdings, ledger_entries};

use super::model::HoldingDB;

/// Repository for managing holding data in the database
pub struct HoldingRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl HoldingRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_holding(conn: &mut SqliteConnection, holding_id: &str) -> Result<HoldingDB> {
    holdings
        .select(HoldingDB::as_select())
        .find(holding_id)
        .first::<HoldingDB>(conn)
        .map_err(|e| StorageError::from(e).into())
}

#[async_trait]
impl HoldingRepositoryTrait for HoldingRepository {
    async fn create(&self, new_holding: NewHolding) -> Result<Holding> {
        self.writer
            .exec(move |conn| {
                let mut holding_db: HoldingDB = new_holding.into();
                holding_db.id = uuid::Uuid::new_v4().to_string();

                diesel::insert_into(holdings::table)
                    .values(&holding_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(holding_db.into())
            })
            .await
    }

    async fn update(&self, holding_update: HoldingUpdate) -> Result<Holding> {
        self.writer
            .exec(move |conn| {
                let mut holding_db: HoldingDB = holding_update.into();

                let existing = load_holding(conn, &holding_db.id)?;
                holding_db.currency = existing.currency;
                holding_db.created_at = existing.created_at;

                diesel::update(holdings.find(&holding_db.id))
                    .set(&holding_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(holding_db.into())
            })
            .await
    }

    async fn delete(&self, holding_id: &str) -> Result<usize> {
        let id_owned = holding_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(holdings.find(id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, holding_id: &str) -> Result<Holding> {
        let mut conn = get_connection(&self.pool)?;
        Ok(load_holding(&mut conn, holding_id)?.into())
    }

    /// Lists holdings, largest value first. Values are stored as text, so
    /// the ordering happens after conversion rather than in SQL.
    fn list(&self, kind_filter: Option<HoldingKind>) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = holdings::table.into_boxed();
        if let Some(k) = kind_filter {
            query = query.filter(kind.eq(k.as_str()));
        }

        let results = query
            .select(HoldingDB::as_select())
            .load::<HoldingDB>(&mut conn)
            .map_err(StorageError::from)?;

        let mut holdings_list: Vec<Holding> = results.into_iter().map(Holding::from).collect();
        holdings_list.sort_by(|a, b| b.value.cmp(&a.value).then(a.name.cmp(&b.name)));
        Ok(holdings_list)
    }

    /// Both writes run inside the writer actor's transaction: the holding
    /// update and the ledger insert commit together or not at all.
    async fn apply_settlement(
        &self,
        write: SettlementWrite,
        entry: Option<NewLedgerEntry>,
    ) -> Result<(Holding, Option<LedgerEntry>)> {
        self.writer
            .exec(move |conn| {
                let now = chrono::Utc::now().naive_utc();

                diesel::update(holdings.find(&write.holding_id))
                    .set((
                        value.eq(write.new_value.to_string()),
                        quantity.eq(write.new_quantity.map(|q| q.to_string())),
                        updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let updated = load_holding(conn, &write.holding_id)?;

                let inserted_entry = match entry {
                    Some(new_entry) => {
                        let mut entry_db: LedgerEntryDB = new_entry.into();
                        entry_db.id = uuid::Uuid::new_v4().to_string();

                        diesel::insert_into(ledger_entries::table)
                            .values(&entry_db)
                            .execute(conn)
                            .map_err(StorageError::from)?;

                        Some(entry_db.into())
                    }
                    None => None,
                };

                Ok((updated.into(), inserted_entry))
            })
            .await
    }
}
