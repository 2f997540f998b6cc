//! Ledger domain models.
//!
//! Ledger entries are immutable once created: the repository exposes
//! create, read, and delete only.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{Error, Result};

/// Direction of money flow for a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerDirection {
    Income,
    Expense,
}

impl LedgerDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerDirection::Income => "income",
            LedgerDirection::Expense => "expense",
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "income" => Ok(LedgerDirection::Income),
            "expense" => Ok(LedgerDirection::Expense),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown ledger direction '{}'",
                other
            )))),
        }
    }
}

impl std::fmt::Display for LedgerDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing an income or expense record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub direction: LedgerDirection,
    /// Non-negative amount in the base currency.
    pub amount: Decimal,
    pub category_id: Option<String>,
    /// The funding/receiving holding, when linked.
    pub holding_id: Option<String>,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub direction: LedgerDirection,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub holding_id: Option<String>,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl NewLedgerEntry {
    /// Validates the new entry data. Settlement-generated entries may
    /// legitimately carry a zero amount (full payment of an already-zero
    /// balance), so only negative amounts are rejected here.
    pub fn validate(&self) -> Result<()> {
        if self.amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Amount cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Read filter for listing ledger entries.
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub direction: Option<LedgerDirection>,
    pub category_id: Option<String>,
    pub holding_id: Option<String>,
    /// Most-recent-first cap on the result size.
    pub limit: Option<i64>,
}

impl LedgerFilter {
    pub fn range(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }
}
