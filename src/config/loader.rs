//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::{EngineConfig, QuoteApiConfig, SupabaseConfig};
use crate::common::errors::{EngineError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with ENGINE_)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<EngineConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("ENGINE")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| EngineError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| EngineError::Configuration(e.to_string()))
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<EngineConfig> {
    // Try to load from .env file
    dotenvy::dotenv().ok();

    let supabase = SupabaseConfig {
        url: std::env::var("SUPABASE_URL")
            .map_err(|_| EngineError::Configuration("SUPABASE_URL is not set".to_string()))?,
        api_key: std::env::var("SUPABASE_ANON_KEY").ok(),
        storage_bucket: std::env::var("SUPABASE_STORAGE_BUCKET")
            .unwrap_or_else(|_| "analysis-media".to_string()),
        signed_url_ttl_seconds: std::env::var("SIGNED_URL_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600),
    };

    let quotes = QuoteApiConfig {
        base_url: std::env::var("QUOTE_API_URL")
            .unwrap_or_else(|_| "https://quotes.tradesignals.app".to_string()),
        api_key: std::env::var("QUOTE_API_KEY").ok(),
    };

    Ok(EngineConfig {
        supabase,
        quotes,
        settings: Default::default(),
    })
}
