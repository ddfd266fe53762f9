//! Unified domain types used across the engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trade direction of a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Buy => write!(f, "BUY"),
            Direction::Sell => write!(f, "SELL"),
        }
    }
}

/// Instrument category a signal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalCategory {
    Forex,
    Crypto,
    Indices,
    Commodities,
}

impl std::fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalCategory::Forex => write!(f, "forex"),
            SignalCategory::Crypto => write!(f, "crypto"),
            SignalCategory::Indices => write!(f, "indices"),
            SignalCategory::Commodities => write!(f, "commodities"),
        }
    }
}

/// Immutable numeric snapshot of a tradable instruction
///
/// Prices are optional: signals may be published before all levels are set,
/// and the engine must degrade to defined defaults rather than fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalParams {
    /// Trade direction
    pub direction: Direction,
    /// Entry price level
    pub entry_price: Option<f64>,
    /// Stop-loss price level
    pub stop_loss: Option<f64>,
    /// Take-profit price level
    pub take_profit: Option<f64>,
}

impl SignalParams {
    pub fn new(
        direction: Direction,
        entry_price: Option<f64>,
        stop_loss: Option<f64>,
        take_profit: Option<f64>,
    ) -> Self {
        Self {
            direction,
            entry_price,
            stop_loss,
            take_profit,
        }
    }
}

/// A published trading signal as seen by the engine
///
/// The engine only reads this; the signal's originator owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Signal identifier
    pub id: String,
    /// Instrument pair as entered by the analyst (e.g. "EUR/USD", "BTC/USDT")
    pub pair: String,
    /// Instrument category
    pub category: SignalCategory,
    /// Numeric trade parameters
    #[serde(flatten)]
    pub params: SignalParams,
    /// Reference to the quote recorded when the signal was entered
    #[serde(default)]
    pub entry_quote_id: Option<String>,
    /// Raw analysis media reference (path or URL), possibly malformed
    #[serde(default)]
    pub analysis_media: Option<String>,
}

/// Classification of a live close against a signal's levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    TpHit,
    SlHit,
    Breakeven,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeStatus::TpHit => write!(f, "tp_hit"),
            OutcomeStatus::SlHit => write!(f, "sl_hit"),
            OutcomeStatus::Breakeven => write!(f, "breakeven"),
        }
    }
}

/// Derived outcome of a signal at an observed close price
///
/// Ephemeral: created per call and discarded by the caller after use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveCloseOutcome {
    /// Outcome classification
    pub status: OutcomeStatus,
    /// Realized risk/reward ratio; 0 when risk is degenerate
    pub rr: f64,
}

/// A live price quote from the quote source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Last observed price
    pub price: f64,
    /// When the price was quoted
    pub quoted_at: DateTime<Utc>,
}

/// Atomic read of symbol, live price and derived outcome for a signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveCloseSnapshot {
    /// Quote symbol the price was fetched for
    pub symbol: String,
    /// Observed close price
    pub close_price: f64,
    /// When the close price was quoted
    pub close_quoted_at: DateTime<Utc>,
    /// Outcome classification
    pub status: OutcomeStatus,
    /// Realized risk/reward ratio
    pub rr: f64,
}

/// An explicit pair/category → quote-symbol mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMapping {
    /// Quote symbol to query
    pub symbol: String,
    /// Instrument pair the mapping applies to
    pub pair: String,
    /// Instrument category the mapping applies to
    pub category: SignalCategory,
    /// Whether the mapping is currently active
    pub is_active: bool,
}

/// Result state of a recorded trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeResult {
    Pending,
    Win,
    Loss,
    Breakeven,
}

/// A user's recorded trade against a signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Current result state
    pub result: TradeResult,
    /// Amount the user risked on the trade
    #[serde(default)]
    pub risk_amount: Option<f64>,
    /// Realized profit/loss, set once the trade is closed
    #[serde(default)]
    pub pnl: Option<f64>,
    /// Signal parameters the trade was taken against
    #[serde(flatten)]
    pub params: SignalParams,
}
