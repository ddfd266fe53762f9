//! Configuration types

use serde::{Deserialize, Serialize};

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Hosted backend (storage + keyed lookups) configuration
    pub supabase: SupabaseConfig,
    /// Live quote API configuration
    #[serde(default)]
    pub quotes: QuoteApiConfig,
    /// General engine settings
    #[serde(default)]
    pub settings: EngineSettings,
}

/// Hosted backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL (e.g. https://xyzcompany.supabase.co)
    pub url: String,
    /// API key used for both the `apikey` header and bearer auth
    #[serde(default)]
    pub api_key: Option<String>,
    /// Storage bucket holding analysis media
    #[serde(default = "default_storage_bucket")]
    pub storage_bucket: String,
    /// Validity window for issued signed URLs, in seconds
    #[serde(default = "default_signed_url_ttl")]
    pub signed_url_ttl_seconds: u64,
}

fn default_storage_bucket() -> String {
    "analysis-media".to_string()
}

fn default_signed_url_ttl() -> u64 {
    3600
}

/// Live quote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteApiConfig {
    /// Base URL for the quote REST API
    #[serde(default = "default_quote_api_url")]
    pub base_url: String,
    /// Optional API key sent as a bearer token
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for QuoteApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_quote_api_url(),
            api_key: None,
        }
    }
}

fn default_quote_api_url() -> String {
    "https://quotes.tradesignals.app".to_string()
}

/// General engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Request timeout in seconds for collaborator HTTP calls
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
