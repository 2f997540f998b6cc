//! Database model for ledger entries.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use moneta_core::ledger::{LedgerDirection, LedgerEntry, NewLedgerEntry};

use crate::utils::parse_decimal;

/// Database model for ledger entries
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::ledger_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LedgerEntryDB {
    pub id: String,
    pub direction: String,
    pub amount: String,
    pub category_id: Option<String>,
    pub holding_id: Option<String>,
    pub description: Option<String>,
    pub entry_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl From<LedgerEntryDB> for LedgerEntry {
    fn from(db: LedgerEntryDB) -> Self {
        let direction = LedgerDirection::from_str(&db.direction).unwrap_or_else(|_| {
            log::error!(
                "Unknown ledger direction '{}' for {}; reading as expense",
                db.direction,
                db.id
            );
            LedgerDirection::Expense
        });
        Self {
            direction,
            amount: parse_decimal(&db.amount, "ledger amount"),
            id: db.id,
            category_id: db.category_id,
            holding_id: db.holding_id,
            description: db.description,
            date: db.entry_date,
            created_at: db.created_at,
        }
    }
}

impl From<NewLedgerEntry> for LedgerEntryDB {
    fn from(domain: NewLedgerEntry) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            direction: domain.direction.as_str().to_string(),
            amount: domain.amount.to_string(),
            category_id: domain.category_id,
            holding_id: domain.holding_id,
            description: domain.description,
            entry_date: domain.date,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
