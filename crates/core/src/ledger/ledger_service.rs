use log::debug;
use std::sync::Arc;

use super::ledger_model::{LedgerEntry, LedgerFilter, NewLedgerEntry};
use super::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::categories::{CategoryKind, CategoryRepositoryTrait};
use crate::errors::{Result, ValidationError};
use crate::holdings::HoldingRepositoryTrait;
use crate::Error;

/// Service for managing ledger entries.
pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
}

impl LedgerService {
    pub fn new(
        repository: Arc<dyn LedgerRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            category_repository,
            holding_repository,
        }
    }
}

#[async_trait::async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn create_entry(&self, new_entry: NewLedgerEntry) -> Result<LedgerEntry> {
        new_entry.validate()?;

        // Manual entries require a positive amount, a category of the
        // matching kind, and the funding/receiving holding.
        if new_entry.amount.is_zero() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Amount must be positive".to_string(),
            )));
        }
        let category_id = new_entry
            .category_id
            .as_deref()
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("categoryId".into())))?;
        let category = self.category_repository.get_by_id(category_id)?;
        if category.kind != CategoryKind::from(new_entry.direction) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Category '{}' cannot classify {} entries",
                category.name, new_entry.direction
            ))));
        }
        let holding_id = new_entry
            .holding_id
            .as_deref()
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("holdingId".into())))?;
        self.holding_repository.get_by_id(holding_id)?;

        debug!(
            "Recording {} entry of {} in category {}",
            new_entry.direction, new_entry.amount, category.name
        );
        self.repository.create(new_entry).await
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<()> {
        self.repository.delete(entry_id).await?;
        Ok(())
    }

    fn get_entry(&self, entry_id: &str) -> Result<LedgerEntry> {
        self.repository.get_by_id(entry_id)
    }

    fn list_entries(&self, filter: &LedgerFilter) -> Result<Vec<LedgerEntry>> {
        self.repository.list(filter)
    }
}
