//! PostgREST client for the hosted backend's keyed lookups
//!
//! Two lookups back the symbol-resolution chain: the quote recorded at
//! signal entry, and the explicit pair/category symbol mapping. An empty
//! result set is a definitive miss (`Ok(None)`), never an error.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::common::errors::{EngineError, Result};
use crate::common::traits::SymbolMappingStore;
use crate::common::types::{SignalCategory, SymbolMapping};
use crate::config::types::SupabaseConfig;

/// Row shape of the recorded entry-quote lookup
#[derive(Debug, Deserialize)]
struct QuoteSymbolRow {
    symbol: String,
}

/// Row shape of the symbol-mapping lookup
#[derive(Debug, Deserialize)]
struct SymbolMappingRow {
    symbol: String,
    pair: String,
    category: SignalCategory,
    is_active: bool,
}

/// PostgREST API client
#[derive(Debug, Clone)]
pub struct SupabaseRestClient {
    /// HTTP client
    client: Client,
    /// Project base URL
    base_url: String,
    /// API key for the apikey/bearer headers
    api_key: Option<String>,
}

impl SupabaseRestClient {
    /// Create a new REST client
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(30))
    }

    /// Create a new REST client with custom timeout
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

    /// Create a REST client from configuration
    pub fn from_config(config: &SupabaseConfig, timeout: Duration) -> Result<Self> {
        Self::with_timeout(&config.url, config.api_key.clone(), timeout)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }

    /// Fetch at most one row from a filtered table query
    async fn fetch_single_row<T: for<'de> Deserialize<'de>>(
        &self,
        table: &str,
        filters: &str,
    ) -> Result<Option<T>> {
        let url = format!(
            "{}/rest/v1/{}?{}&limit=1",
            self.base_url, table, filters
        );
        debug!("Fetching from: {}", url);

        let response = self
            .with_auth(self.client.get(&url))
            .send()
            .await
            .map_err(EngineError::from_reqwest)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::from_status(status, body));
        }

        let mut rows: Vec<T> = response.json().await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }
}

/// Encode a value for use inside a PostgREST filter expression
fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[async_trait]
impl SymbolMappingStore for SupabaseRestClient {
    #[instrument(skip(self))]
    async fn recorded_quote_symbol(&self, quote_id: &str) -> Result<Option<String>> {
        let filters = format!("id=eq.{}&select=symbol", encode(quote_id));
        let row: Option<QuoteSymbolRow> = self.fetch_single_row("signal_quotes", &filters).await?;
        Ok(row.map(|r| r.symbol))
    }

    #[instrument(skip(self))]
    async fn active_symbol_mapping(
        &self,
        pair: &str,
        category: SignalCategory,
    ) -> Result<Option<SymbolMapping>> {
        let filters = format!(
            "pair=eq.{}&category=eq.{}&is_active=eq.true&select=symbol,pair,category,is_active",
            encode(pair),
            category
        );
        let row: Option<SymbolMappingRow> =
            self.fetch_single_row("symbol_mappings", &filters).await?;
        Ok(row.map(|r| SymbolMapping {
            symbol: r.symbol,
            pair: r.pair,
            category: r.category,
            is_active: r.is_active,
        }))
    }
}
