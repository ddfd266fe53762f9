//! Live outcome engine
//!
//! Composes symbol resolution, the live quote fetch and outcome derivation
//! into one atomic read. No internal retry: a failure in either sub-call
//! surfaces to the caller untouched.

use std::sync::Arc;
use tracing::{debug, instrument};

use super::live::derive_live_close_outcome;
use super::symbol::derive_symbol_from_pair;
use crate::common::errors::Result;
use crate::common::traits::{QuoteSource, SymbolMappingStore};
use crate::common::types::{LiveCloseSnapshot, Signal};

/// Engine evaluating signals against live prices
#[derive(Clone)]
pub struct OutcomeEngine {
    /// Live quote source
    quotes: Arc<dyn QuoteSource>,
    /// Symbol-mapping lookups
    mappings: Arc<dyn SymbolMappingStore>,
}

impl OutcomeEngine {
    /// Create a new engine over the given collaborators
    pub fn new(quotes: Arc<dyn QuoteSource>, mappings: Arc<dyn SymbolMappingStore>) -> Self {
        Self { quotes, mappings }
    }

    /// Resolve the live-quote symbol for a signal
    ///
    /// Strict priority chain:
    /// 1. symbol recorded with the signal's entry quote
    /// 2. active mapping for the signal's pair + category
    /// 3. algorithmic derivation from the raw pair string
    ///
    /// A definitive miss (`Ok(None)`) falls through to the next step; a
    /// transport error propagates immediately rather than silently
    /// degrading to a worse symbol.
    #[instrument(skip(self), fields(signal_id = %signal.id))]
    pub async fn resolve_live_quote_symbol(&self, signal: &Signal) -> Result<String> {
        if let Some(quote_id) = &signal.entry_quote_id {
            if let Some(symbol) = self.mappings.recorded_quote_symbol(quote_id).await? {
                debug!(%symbol, "resolved symbol from recorded entry quote");
                return Ok(symbol);
            }
        }

        if let Some(mapping) = self
            .mappings
            .active_symbol_mapping(&signal.pair, signal.category)
            .await?
        {
            debug!(symbol = %mapping.symbol, "resolved symbol from active mapping");
            return Ok(mapping.symbol);
        }

        let symbol = derive_symbol_from_pair(&signal.pair, signal.category);
        debug!(%symbol, "derived symbol from raw pair");
        Ok(symbol)
    }

    /// Resolve symbol, fetch the live quote and derive the outcome
    #[instrument(skip(self), fields(signal_id = %signal.id))]
    pub async fn live_close_snapshot(&self, signal: &Signal) -> Result<LiveCloseSnapshot> {
        let symbol = self.resolve_live_quote_symbol(signal).await?;
        let quote = self.quotes.latest_quote(&symbol).await?;
        let outcome = derive_live_close_outcome(&signal.params, quote.price);

        Ok(LiveCloseSnapshot {
            symbol,
            close_price: quote.price,
            close_quoted_at: quote.quoted_at,
            status: outcome.status,
            rr: outcome.rr,
        })
    }
}
