//! REST backend implementation of [`FormDataSource`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use formbase_core::defaults::{FIELD_RESOURCE, FORM_ID_COLUMN, SLOW_REQUEST_MS};
use formbase_core::{base_query, encode, Error, Field, FilterSet, FormDataSource, Record, Result};

use crate::config::ClientConfig;

/// Client for a PostgREST-style form backend.
pub struct RestBackend {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl RestBackend {
    /// Create a backend from a validated configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing REST backend: url={}, timeout={}s",
            config.base_url, config.timeout_secs
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a path-and-query produced by the encoder.
    pub fn url_for(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    async fn get_json<T: DeserializeOwned>(&self, form_id: i64, path_and_query: &str) -> Result<T> {
        let start = Instant::now();
        let url = self.url_for(path_and_query);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .timeout(Duration::from_secs(self.timeout_secs))
            .send()
            .await
            .map_err(|e| Error::Request(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::FormNotFound(form_id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Request(format!(
                "Backend returned {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Request(format!("Failed to read response: {}", e)))?;
        let parsed = serde_json::from_str(&body)
            .map_err(|e| Error::Serialization(format!("Failed to parse response: {}", e)))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(duration_ms = elapsed, "Request complete");
        if elapsed > SLOW_REQUEST_MS {
            warn!(
                duration_ms = elapsed,
                form_id,
                slow = true,
                "Slow backend request"
            );
        }
        Ok(parsed)
    }
}

#[async_trait]
impl FormDataSource for RestBackend {
    #[instrument(skip(self), fields(subsystem = "client", component = "rest", op = "fetch_fields"))]
    async fn fetch_fields(&self, form_id: i64) -> Result<Vec<Field>> {
        let path = format!("{}?{}=eq.{}", FIELD_RESOURCE, FORM_ID_COLUMN, form_id);
        let fields: Vec<Field> = self.get_json(form_id, &path).await?;
        debug!(field_count = fields.len(), "Fields fetched");
        Ok(fields)
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "rest", op = "fetch_records"))]
    async fn fetch_records(&self, form_id: i64) -> Result<Vec<Record>> {
        let records: Vec<Record> = self.get_json(form_id, &base_query(form_id)).await?;
        debug!(record_count = records.len(), "Records fetched");
        Ok(records)
    }

    #[instrument(skip(self, filters), fields(subsystem = "client", component = "rest", op = "fetch_filtered", clause_count = filters.len()))]
    async fn fetch_filtered(&self, form_id: i64, filters: &FilterSet) -> Result<Vec<Record>> {
        let query = encode(form_id, filters);
        let records: Vec<Record> = self.get_json(form_id, &query).await?;
        debug!(result_count = records.len(), "Filtered records fetched");
        Ok(records)
    }
}
