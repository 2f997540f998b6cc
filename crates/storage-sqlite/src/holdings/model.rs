//! Database model for holdings.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use moneta_core::constants::BASE_CURRENCY;
use moneta_core::holdings::{Holding, HoldingKind, HoldingUpdate, NewHolding};

use crate::utils::{parse_decimal, parse_opt_decimal};

/// Database model for holdings
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
// Clearing a unit field (e.g. quantity after switching to manual mode)
// must persist as NULL, not be skipped.
#[diesel(treat_none_as_null = true)]
pub struct HoldingDB {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub value: String,
    pub quantity: Option<String>,
    pub buy_price: Option<String>,
    pub current_price: Option<String>,
    pub coin_ref: Option<String>,
    pub unit_denominated: bool,
    pub currency: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<HoldingDB> for Holding {
    fn from(db: HoldingDB) -> Self {
        let kind = HoldingKind::from_str(&db.kind).unwrap_or_else(|_| {
            log::error!("Unknown holding kind '{}' for {}; reading as other", db.kind, db.id);
            HoldingKind::Other
        });
        Self {
            kind,
            value: parse_decimal(&db.value, "holding value"),
            quantity: parse_opt_decimal(db.quantity.as_deref(), "holding quantity"),
            buy_price: parse_opt_decimal(db.buy_price.as_deref(), "holding buy price"),
            current_price: parse_opt_decimal(db.current_price.as_deref(), "holding current price"),
            id: db.id,
            name: db.name,
            coin_ref: db.coin_ref,
            unit_denominated: db.unit_denominated,
            currency: db.currency,
            description: db.description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewHolding> for HoldingDB {
    fn from(domain: NewHolding) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            kind: domain.kind.as_str().to_string(),
            value: domain.value.to_string(),
            quantity: domain.quantity.map(|d| d.to_string()),
            buy_price: domain.buy_price.map(|d| d.to_string()),
            current_price: domain.current_price.map(|d| d.to_string()),
            coin_ref: domain.coin_ref,
            unit_denominated: domain.unit_denominated,
            currency: BASE_CURRENCY.to_string(),
            description: domain.description,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<HoldingUpdate> for HoldingDB {
    fn from(domain: HoldingUpdate) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            kind: domain.kind.as_str().to_string(),
            value: domain.value.to_string(),
            quantity: domain.quantity.map(|d| d.to_string()),
            buy_price: domain.buy_price.map(|d| d.to_string()),
            current_price: domain.current_price.map(|d| d.to_string()),
            coin_ref: domain.coin_ref,
            unit_denominated: domain.unit_denominated,
            currency: String::new(), // filled from the existing record
            description: domain.description,
            created_at: NaiveDateTime::default(), // filled from the existing record
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
