//! Holding repository and service traits.
//!
//! These traits define the contract for holding operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::holdings_model::{Holding, HoldingKind, HoldingUpdate, NewHolding};
use super::settlement::{SettlementOutcome, SettlementRequest, SettlementWrite};
use crate::errors::Result;
use crate::ledger::{LedgerEntry, NewLedgerEntry};

/// Trait defining the contract for Holding repository operations.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    /// Creates a new holding.
    async fn create(&self, new_holding: NewHolding) -> Result<Holding>;

    /// Updates an existing holding.
    async fn update(&self, holding_update: HoldingUpdate) -> Result<Holding>;

    /// Deletes a holding by its ID. Returns the number of deleted records.
    async fn delete(&self, holding_id: &str) -> Result<usize>;

    /// Retrieves a holding by its ID.
    fn get_by_id(&self, holding_id: &str) -> Result<Holding>;

    /// Lists holdings, optionally filtered by kind, largest value first.
    fn list(&self, kind_filter: Option<HoldingKind>) -> Result<Vec<Holding>>;

    /// Applies a settlement as one transaction: the holding write and the
    /// optional ledger insert either both commit or neither does.
    async fn apply_settlement(
        &self,
        write: SettlementWrite,
        entry: Option<NewLedgerEntry>,
    ) -> Result<(Holding, Option<LedgerEntry>)>;
}

/// Trait defining the contract for Holding service operations.
#[async_trait]
pub trait HoldingServiceTrait: Send + Sync {
    /// Creates a new holding with business validation and normalization.
    async fn create_holding(&self, new_holding: NewHolding) -> Result<Holding>;

    /// Updates an existing holding with business validation and
    /// normalization.
    async fn update_holding(&self, holding_update: HoldingUpdate) -> Result<Holding>;

    /// Deletes a holding by its ID.
    async fn delete_holding(&self, holding_id: &str) -> Result<()>;

    /// Retrieves a holding by its ID.
    fn get_holding(&self, holding_id: &str) -> Result<Holding>;

    /// Lists holdings, optionally filtered by kind, largest value first.
    fn list_holdings(&self, kind_filter: Option<HoldingKind>) -> Result<Vec<Holding>>;

    /// Fetches the current unit price for the holding's `coin_ref` from
    /// the price feed, recomputes the derived value, and persists both.
    /// A feed failure leaves the stored holding untouched.
    async fn refresh_price(&self, holding_id: &str) -> Result<Holding>;

    /// Applies a full or partial settlement against a debt/receivable
    /// holding, optionally recording the payment as a ledger entry.
    async fn settle_holding(
        &self,
        holding_id: &str,
        request: SettlementRequest,
    ) -> Result<SettlementOutcome>;
}
