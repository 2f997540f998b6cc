//! Price-feed module - external collaborator for unit prices.

mod pricing_traits;
pub mod providers;

use thiserror::Error;

pub use pricing_traits::PriceProviderTrait;
pub use providers::CoinGeckoProvider;

/// Errors from the external price feed. Always non-fatal: stored holding
/// state must remain untouched when one of these surfaces.
#[derive(Error, Debug)]
pub enum PriceFeedError {
    #[error("Provider request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),

    #[error("No price returned for '{0}'")]
    MissingPrice(String),
}
