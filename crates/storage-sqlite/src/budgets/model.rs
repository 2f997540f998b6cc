//! Database model for budgets.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use moneta_core::budgets::{Budget, BudgetPeriod, NewBudget};

use crate::utils::parse_decimal;

/// Database model for budgets
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
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub category_id: String,
    pub amount: String,
    pub period: String,
    pub created_at: NaiveDateTime,
}

impl From<BudgetDB> for Budget {
    fn from(db: BudgetDB) -> Self {
        let period = BudgetPeriod::from_str(&db.period).unwrap_or_else(|_| {
            log::error!("Unknown budget period '{}' for {}; reading as monthly", db.period, db.id);
            BudgetPeriod::Monthly
        });
        Self {
            period,
            amount: parse_decimal(&db.amount, "budget amount"),
            id: db.id,
            category_id: db.category_id,
            created_at: db.created_at,
        }
    }
}

impl From<NewBudget> for BudgetDB {
    fn from(domain: NewBudget) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            category_id: domain.category_id,
            amount: domain.amount.to_string(),
            period: domain.period.as_str().to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
