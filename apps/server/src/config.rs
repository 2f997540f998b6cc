//! Server configuration from environment variables.

use moneta_core::pricing::providers::coingecko_provider::DEFAULT_BASE_URL;

pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Path of the SQLite database file.
    pub db_path: String,
    /// Base URL of the external price feed.
    pub price_feed_url: String,
    /// Allowed CORS origin for browser clients, if any.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            listen_addr: std::env::var("MONETA_LISTEN_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8420".to_string()),
            db_path: std::env::var("MONETA_DB_PATH")
                .unwrap_or_else(|_| "data/moneta.db".to_string()),
            price_feed_url: std::env::var("MONETA_PRICE_FEED_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            cors_origin: std::env::var("MONETA_CORS_ORIGIN").ok(),
        }
    }
}
