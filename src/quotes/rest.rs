//! REST client for the live quote API

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::common::errors::{EngineError, Result};
use crate::common::traits::QuoteSource;
use crate::common::types::Quote;
use crate::config::types::QuoteApiConfig;

/// Quote endpoint response shape
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    price: f64,
    quoted_at: DateTime<Utc>,
}

/// REST API client for live quotes
#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    /// HTTP client
    client: Client,
    /// Base URL for the quote API
    base_url: String,
    /// Optional API key sent as a bearer token
    api_key: Option<String>,
}

impl HttpQuoteSource {
    /// Create a new quote client
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(30))
    }

    /// Create a new quote client with custom timeout
    pub fn with_timeout(
        base_url: &str,
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
            api_key,
        })
    }

    /// Create a quote client from configuration
    pub fn from_config(config: &QuoteApiConfig, timeout: Duration) -> Result<Self> {
        Self::with_timeout(&config.base_url, config.api_key.clone(), timeout)
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    #[instrument(skip(self))]
    async fn latest_quote(&self, symbol: &str) -> Result<Quote> {
        let encoded: String = form_urlencoded::byte_serialize(symbol.as_bytes()).collect();
        let url = format!("{}/quote?symbol={}", self.base_url, encoded);
        debug!("Fetching quote from: {}", url);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(EngineError::from_reqwest)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::from_status(status, body));
        }

        let quote: QuoteResponse = response.json().await?;

        if !quote.price.is_finite() {
            return Err(EngineError::InvalidResponse(format!(
                "non-finite price for {}",
                symbol
            )));
        }

        Ok(Quote {
            price: quote.price,
            quoted_at: quote.quoted_at,
        })
    }
}
