//! Storage client for the hosted backend
//!
//! Issues time-limited signed URLs for objects in the analysis-media bucket
//! and performs best-effort media prefetches.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::common::errors::{EngineError, Result};
use crate::common::traits::{MediaFetcher, SignedUrlIssuer};
use crate::config::types::SupabaseConfig;

/// Request body for signed URL creation
#[derive(Debug, Serialize)]
struct SignRequest {
    #[serde(rename = "expiresIn")]
    expires_in: u64,
}

/// Response body of signed URL creation; the URL is relative to the
/// storage root
#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

/// Storage API client
#[derive(Debug, Clone)]
pub struct SupabaseStorageClient {
    /// HTTP client
    client: Client,
    /// Project base URL
    base_url: String,
    /// Bucket holding analysis media
    bucket: String,
    /// API key for the apikey/bearer headers
    api_key: Option<String>,
}

impl SupabaseStorageClient {
    /// Create a new storage client
    pub fn new(base_url: &str, bucket: &str, api_key: Option<String>) -> Result<Self> {
        Self::with_timeout(base_url, bucket, api_key, Duration::from_secs(30))
    }

    /// Create a new storage client with custom timeout
    pub fn with_timeout(
        base_url: &str,
        bucket: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            api_key,
        })
    }

    /// Create a storage client from configuration
    pub fn from_config(config: &SupabaseConfig, timeout: Duration) -> Result<Self> {
        Self::with_timeout(
            &config.url,
            &config.storage_bucket,
            config.api_key.clone(),
            timeout,
        )
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request
                .header("apikey", key)
                .bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl SignedUrlIssuer for SupabaseStorageClient {
    #[instrument(skip(self))]
    async fn create_signed_url(&self, path: &str, ttl: Duration) -> Result<String> {
        let url = format!(
            "{}/storage/v1/object/sign/{}/{}",
            self.base_url, self.bucket, path
        );
        debug!("Requesting signed URL from: {}", url);

        let response = self
            .with_auth(self.client.post(&url))
            .json(&SignRequest {
                expires_in: ttl.as_secs(),
            })
            .send()
            .await
            .map_err(EngineError::from_reqwest)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::from_status(status, body));
        }

        let sign_response: SignResponse = response.json().await?;
        Ok(format!(
            "{}/storage/v1{}",
            self.base_url, sign_response.signed_url
        ))
    }
}

#[async_trait]
impl MediaFetcher for SupabaseStorageClient {
    #[instrument(skip(self))]
    async fn prefetch(&self, url: &str) -> Result<()> {
        debug!("Prefetching media from: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(EngineError::from_reqwest)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(EngineError::from_status(status, "media fetch failed"));
        }

        // Drain the body so the bytes actually travel into warm caches
        response.bytes().await?;
        Ok(())
    }
}
