//! Signal Engine Library
//!
//! Outcome derivation and signed media resolution for the trading-signal
//! platform: direction-aware, epsilon-tolerant win/loss/breakeven
//! classification from live price ticks, and time-limited signed-URL
//! resolution with in-flight request deduplication and TTL-bounded caching.

pub mod common;
pub mod config;
pub mod media;
pub mod outcome;
pub mod quotes;
pub mod supabase;

// Re-export commonly used types
pub use common::errors::{EngineError, Result};
pub use common::traits::{MediaFetcher, QuoteSource, SignedUrlIssuer, SymbolMappingStore};
pub use common::types::{
    Direction, LiveCloseOutcome, LiveCloseSnapshot, OutcomeStatus, Quote, Signal, SignalCategory,
    SignalParams, SymbolMapping, TradeRecord, TradeResult,
};
pub use config::types::EngineConfig;
pub use media::resolver::MediaResolver;
pub use outcome::engine::OutcomeEngine;
pub use quotes::rest::HttpQuoteSource;
pub use supabase::rest::SupabaseRestClient;
pub use supabase::storage::SupabaseStorageClient;

// Outcome math
pub use outcome::math::{
    displayed_potential_profit, signal_rr, signal_rr_for_target, win_rate_percent, PRICE_EPSILON,
};
pub use outcome::live::derive_live_close_outcome;
