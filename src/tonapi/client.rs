use crate::config::Config;
use crate::tonapi::models::{JettonHoldersPage, JettonInfo};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("tonapi returned status {status}: {message}")]
    Api { status: u16, message: String },
}

/// Thin client for the tonapi v2 jetton endpoints.
///
/// Only get-info and get-holders style calls are issued; this service
/// never writes upstream. The per-request timeout bounds worst-case pass
/// latency.
pub struct TonapiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TonapiClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        info!(
            "Initializing tonapi client for {} (timeout {}s)",
            config.tonapi_base_url, config.api_timeout_secs
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.tonapi_base_url.trim_end_matches('/').to_string(),
            api_key: config.tonapi_key.clone(),
        })
    }

    /// Jetton master metadata, supply and declared holder count.
    pub async fn get_jetton_info(&self, account_id: &str) -> Result<JettonInfo, ClientError> {
        let url = format!("{}/v2/jettons/{}", self.base_url, account_id);
        self.get_json(&url, &[]).await
    }

    /// One page of the jetton holder list.
    pub async fn get_jetton_holders(
        &self,
        account_id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<JettonHoldersPage, ClientError> {
        let url = format!("{}/v2/jettons/{}/holders", self.base_url, account_id);
        debug!("fetching holders page limit={} offset={}", limit, offset);
        self.get_json(&url, &[("limit", limit), ("offset", offset)])
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, u64)],
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
