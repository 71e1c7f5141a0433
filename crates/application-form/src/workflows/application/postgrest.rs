use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::gateway::{ApplicationStore, StoreError, StoreRow};
use crate::config::{ConfigError, StoreConfig};

/// Client for a hosted Postgres REST endpoint (`{url}/rest/v1/{table}`).
#[derive(Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
}

impl PostgrestStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Build from config; `None` when no hosted store is configured.
    pub fn from_config(config: &StoreConfig) -> Result<Option<Self>, ConfigError> {
        let (Some(url), Some(api_key)) = (&config.url, &config.api_key) else {
            return match config.url {
                Some(_) => Err(ConfigError::MissingStoreKey),
                None => Ok(None),
            };
        };
        Self::new(url.clone(), api_key.clone(), config.timeout).map(Some)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

impl fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgrestStore")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ApplicationStore for PostgrestStore {
    async fn insert(&self, table: &str, rows: Vec<StoreRow>) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await
            .map_err(|err| StoreError::rejected(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<PostgrestErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.message)
            .filter(|message| !message.trim().is_empty());

        let error = match message {
            Some(message) => StoreError::rejected(message),
            None => StoreError::silent(),
        };
        Err(error.with_status(status.as_u16()))
    }
}
