//! Category domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::ledger::LedgerDirection;
use crate::{Error, Result};

/// Whether a category classifies income or expense entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown category kind '{}'",
                other
            )))),
        }
    }
}

impl From<LedgerDirection> for CategoryKind {
    fn from(direction: LedgerDirection) -> Self {
        match direction {
            LedgerDirection::Income => CategoryKind::Income,
            LedgerDirection::Expense => CategoryKind::Expense,
        }
    }
}

/// Domain model representing a transaction category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub kind: CategoryKind,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub kind: CategoryKind,
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for renaming an existing category. The kind is fixed at
/// creation; changing it would silently re-classify historic entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub id: Option<String>,
    pub name: String,
}

impl CategoryUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category ID is required for updates".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}
