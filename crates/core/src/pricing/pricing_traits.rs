//! Price-feed provider contract.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::PriceFeedError;

/// An external price feed, keyed by coin identifier, quoting in the base
/// currency. Best-effort and non-authoritative: callers must treat every
/// failure as non-fatal and never let it corrupt stored holding state.
#[async_trait]
pub trait PriceProviderTrait: Send + Sync {
    /// Returns the current unit price for the given coin identifier.
    async fn fetch_price(&self, coin_ref: &str) -> Result<Decimal, PriceFeedError>;
}
