//! CoinGecko-style simple-price provider.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::pricing::{PriceFeedError, PriceProviderTrait};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Fetches spot prices from the CoinGecko `simple/price` endpoint,
/// quoted in the configured vs-currency.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    vs_currency: String,
}

impl CoinGeckoProvider {
    pub fn new(base_url: impl Into<String>, vs_currency: impl Into<String>) -> Self {
        CoinGeckoProvider {
            client: Client::new(),
            base_url: base_url.into(),
            vs_currency: vs_currency.into().to_lowercase(),
        }
    }
}

#[async_trait]
impl PriceProviderTrait for CoinGeckoProvider {
    async fn fetch_price(&self, coin_ref: &str) -> Result<Decimal, PriceFeedError> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url, coin_ref, self.vs_currency
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PriceFeedError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PriceFeedError::RequestFailed(format!(
                "provider returned HTTP {}",
                response.status()
            )));
        }

        // Response shape: {"ethereum": {"idr": 30000000.0}}
        let body: HashMap<String, HashMap<String, Decimal>> = response
            .json()
            .await
            .map_err(|e| PriceFeedError::InvalidResponse(e.to_string()))?;

        body.get(coin_ref)
            .and_then(|quotes| quotes.get(&self.vs_currency))
            .copied()
            .ok_or_else(|| PriceFeedError::MissingPrice(coin_ref.to_string()))
    }
}
