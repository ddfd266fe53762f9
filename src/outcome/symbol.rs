//! Algorithmic quote-symbol derivation
//!
//! Last resort of the symbol-resolution chain: when neither a recorded
//! entry quote nor an explicit mapping exists, derive a queryable symbol
//! from the raw pair string alone.

use crate::common::types::SignalCategory;

/// Quote currencies recognized as already present on a crypto pair
const CRYPTO_QUOTE_SUFFIXES: &[&str] = &["USDT", "USDC", "USD", "EUR", "BTC", "ETH"];

/// Derive a quote symbol from a raw pair string
///
/// Uppercases the pair and strips separators ("EUR/USD" -> "EURUSD",
/// "btc-usdt" -> "BTCUSDT"). Crypto pairs without a recognizable quote
/// currency get "USD" appended, so a bare "BTC" still resolves to a
/// queryable symbol.
pub fn derive_symbol_from_pair(pair: &str, category: SignalCategory) -> String {
    let mut symbol: String = pair
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_uppercase();

    if category == SignalCategory::Crypto
        && !symbol.is_empty()
        && !CRYPTO_QUOTE_SUFFIXES
            .iter()
            .any(|suffix| symbol.len() > suffix.len() && symbol.ends_with(suffix))
    {
        symbol.push_str("USD");
    }

    symbol
}
