//! Common test utilities and fixtures

use signal_engine::{Direction, Signal, SignalCategory, SignalParams};

/// Bucket used across the integration tests
pub const TEST_BUCKET: &str = "analysis-media";

/// BUY signal with entry 100, stop 90, take-profit 120 (RR 2.0)
pub fn buy_signal() -> Signal {
    Signal {
        id: "sig_test_001".to_string(),
        pair: "EUR/USD".to_string(),
        category: SignalCategory::Forex,
        params: SignalParams::new(Direction::Buy, Some(100.0), Some(90.0), Some(120.0)),
        entry_quote_id: None,
        analysis_media: None,
    }
}

/// Same fixture with a recorded entry-quote reference
pub fn buy_signal_with_entry_quote(quote_id: &str) -> Signal {
    Signal {
        entry_quote_id: Some(quote_id.to_string()),
        ..buy_signal()
    }
}
