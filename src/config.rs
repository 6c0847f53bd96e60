// Configuration structure for:
// - tonapi endpoint, API key and target jetton (from environment variables)
// - Database connection string
// - Holder pagination and fetch concurrency
// - Snapshot polling interval

use dotenv::dotenv;
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub tonapi_base_url: String,
    pub tonapi_key: String,
    pub jetton_address: String,
    pub holders_page_size: u64,
    pub fetch_concurrency: usize,
    pub api_timeout_secs: u64,
    pub poll_interval: Duration,
}

impl Config {
    /// Missing credentials or the jetton identifier are fatal; everything
    /// else falls back to a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let tonapi_key =
            env::var("TON_API_KEY").map_err(|_| ConfigError::MissingVar("TON_API_KEY"))?;
        let jetton_address = env::var("TON_JETTON_ADDRESS")
            .map_err(|_| ConfigError::MissingVar("TON_JETTON_ADDRESS"))?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:jetton_holders.db".to_string());
        let tonapi_base_url =
            env::var("TONAPI_BASE_URL").unwrap_or_else(|_| "https://tonapi.io".to_string());
        let holders_page_size = env::var("HOLDERS_PAGE_SIZE")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or(1000);
        let fetch_concurrency = env::var("FETCH_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(num_cpus::get);
        let api_timeout_secs = env::var("API_TIMEOUT_SECS")
            .map(|v| v.parse().unwrap_or(30))
            .unwrap_or(30);
        let poll_interval = env::var("SNAPSHOT_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(3600));

        Ok(Self {
            database_url,
            tonapi_base_url,
            tonapi_key,
            jetton_address,
            holders_page_size,
            fetch_concurrency,
            api_timeout_secs,
            poll_interval,
        })
    }
}
