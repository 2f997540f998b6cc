pub mod coingecko_provider;

pub use coingecko_provider::CoinGeckoProvider;
