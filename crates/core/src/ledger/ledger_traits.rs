//! Ledger repository and service traits.
//!
//! Entries are never updated after creation; neither trait exposes an
//! update operation.

use async_trait::async_trait;

use super::ledger_model::{LedgerEntry, LedgerFilter, NewLedgerEntry};
use crate::errors::Result;

/// Trait defining the contract for ledger repository operations.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Creates a new ledger entry.
    async fn create(&self, new_entry: NewLedgerEntry) -> Result<LedgerEntry>;

    /// Deletes an entry by its ID. Returns the number of deleted records.
    async fn delete(&self, entry_id: &str) -> Result<usize>;

    /// Retrieves an entry by its ID.
    fn get_by_id(&self, entry_id: &str) -> Result<LedgerEntry>;

    /// Lists entries matching the filter, most recent first.
    fn list(&self, filter: &LedgerFilter) -> Result<Vec<LedgerEntry>>;
}

/// Trait defining the contract for ledger service operations.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    /// Creates a manually entered ledger entry with business validation:
    /// positive amount, an existing category whose kind matches the
    /// entry direction, and an existing funding/receiving holding.
    async fn create_entry(&self, new_entry: NewLedgerEntry) -> Result<LedgerEntry>;

    /// Deletes an entry by its ID.
    async fn delete_entry(&self, entry_id: &str) -> Result<()>;

    /// Retrieves an entry by its ID.
    fn get_entry(&self, entry_id: &str) -> Result<LedgerEntry>;

    /// Lists entries matching the filter, most recent first.
    fn list_entries(&self, filter: &LedgerFilter) -> Result<Vec<LedgerEntry>>;
}
