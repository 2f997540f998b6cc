//! Budget domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{Error, Result};

/// Declared budgeting period. Informational: progress is always measured
/// against the current calendar month (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "weekly" => Ok(BudgetPeriod::Weekly),
            "monthly" => Ok(BudgetPeriod::Monthly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown budget period '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a spending budget for one expense category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub period: BudgetPeriod,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        if self.category_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "categoryId".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Budget amount must be positive".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub id: Option<String>,
    pub amount: Decimal,
    pub period: BudgetPeriod,
}

impl BudgetUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Budget ID is required for updates".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Budget amount must be positive".to_string(),
            )));
        }
        Ok(())
    }
}

/// Read model: a budget with the current month's spending against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    #[serde(flatten)]
    pub budget: Budget,
    pub category_name: String,
    pub spent: Decimal,
    /// `amount − spent`; negative when overspent.
    pub remaining: Decimal,
    /// Percentage of the budget consumed, unclamped.
    pub pct_used: f64,
}
