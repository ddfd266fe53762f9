//! Trait definitions for the engine's external collaborators
//!
//! The engine owns no persistence, auth, or UI; everything it needs from the
//! rest of the platform comes through these narrow contracts. Lookup traits
//! return `Ok(None)` for a definitive miss, distinct from a transport
//! error, which propagates so callers never mistake an outage for "not
//! found".

use async_trait::async_trait;
use std::time::Duration;

use super::errors::Result;
use super::types::{Quote, SignalCategory, SymbolMapping};

/// Source of live price quotes, keyed by quote symbol
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the latest quote for a symbol
    ///
    /// Failures propagate to the caller: there is no safe numeric default
    /// for a missing price.
    async fn latest_quote(&self, symbol: &str) -> Result<Quote>;
}

/// Issuer of time-limited signed URLs for storage objects
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignedUrlIssuer: Send + Sync {
    /// Create a signed URL for a bucket-relative object path
    ///
    /// # Arguments
    /// * `path` - Canonical bucket-relative object path
    /// * `ttl` - Validity window of the issued URL
    async fn create_signed_url(&self, path: &str, ttl: Duration) -> Result<String>;
}

/// Keyed lookups against the platform's symbol-mapping records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SymbolMappingStore: Send + Sync {
    /// Symbol recorded with the quote captured at signal entry
    async fn recorded_quote_symbol(&self, quote_id: &str) -> Result<Option<String>>;

    /// Active symbol mapping for a pair/category combination
    async fn active_symbol_mapping(
        &self,
        pair: &str,
        category: SignalCategory,
    ) -> Result<Option<SymbolMapping>>;
}

/// Best-effort media prefetch into the image pipeline
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Fetch a resolved URL so subsequent loads hit warm caches
    async fn prefetch(&self, url: &str) -> Result<()>;
}
