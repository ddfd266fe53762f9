//! Live close outcome derivation
//!
//! Classifies an observed close price against a signal's levels. Never
//! fails: malformed inputs collapse to a breakeven outcome with rr 0.

use super::math::{risk_per_unit, PRICE_EPSILON};
use crate::common::types::{Direction, LiveCloseOutcome, OutcomeStatus, SignalParams};

/// Derive the outcome of a signal at an observed close price
///
/// Normal path: rr is the signed multiple of the risked distance the close
/// has moved in the trade's favor; `tp_hit` above +epsilon, `sl_hit` below
/// -epsilon, `breakeven` in between.
///
/// Degenerate risk (entry within epsilon of stop, or non-finite): RR is
/// mathematically undefined, so classification falls back to the sign of
/// the directional move off entry, with rr fixed at 0.
pub fn derive_live_close_outcome(signal: &SignalParams, close_price: f64) -> LiveCloseOutcome {
    let (entry, stop) = match (signal.entry_price, signal.stop_loss) {
        (Some(entry), Some(stop)) => (entry, stop),
        _ => return breakeven(),
    };

    if !entry.is_finite() || !stop.is_finite() || !close_price.is_finite() {
        return breakeven();
    }

    let risk = risk_per_unit(signal, entry, stop);

    if !risk.is_finite() || risk.abs() < PRICE_EPSILON {
        let directional_diff = match signal.direction {
            Direction::Buy => close_price - entry,
            Direction::Sell => entry - close_price,
        };
        let status = classify(directional_diff);
        return LiveCloseOutcome { status, rr: 0.0 };
    }

    let rr = match signal.direction {
        Direction::Buy => (close_price - entry) / risk,
        Direction::Sell => (entry - close_price) / risk,
    };

    LiveCloseOutcome {
        status: classify(rr),
        rr,
    }
}

fn classify(value: f64) -> OutcomeStatus {
    if value > PRICE_EPSILON {
        OutcomeStatus::TpHit
    } else if value < -PRICE_EPSILON {
        OutcomeStatus::SlHit
    } else {
        OutcomeStatus::Breakeven
    }
}

fn breakeven() -> LiveCloseOutcome {
    LiveCloseOutcome {
        status: OutcomeStatus::Breakeven,
        rr: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buy_signal() -> SignalParams {
        SignalParams::new(Direction::Buy, Some(100.0), Some(90.0), Some(120.0))
    }

    #[test]
    fn test_close_within_epsilon_is_breakeven() {
        let outcome = derive_live_close_outcome(&buy_signal(), 100.000_000_000_1);
        assert_eq!(outcome.status, OutcomeStatus::Breakeven);
        assert!(outcome.rr.abs() < PRICE_EPSILON);
    }

    #[test]
    fn test_favorable_close_is_tp_hit() {
        // Moved 5 in favor on a risk of 10
        let outcome = derive_live_close_outcome(&buy_signal(), 105.0);
        assert_eq!(outcome.status, OutcomeStatus::TpHit);
        assert_eq!(outcome.rr, 0.5);
    }

    #[test]
    fn test_adverse_close_is_sl_hit() {
        // Moved 15 against on a risk of 10
        let outcome = derive_live_close_outcome(&buy_signal(), 85.0);
        assert_eq!(outcome.status, OutcomeStatus::SlHit);
        assert_eq!(outcome.rr, -1.5);
    }

    #[test]
    fn test_sell_direction_flips_sign() {
        let signal = SignalParams::new(Direction::Sell, Some(100.0), Some(110.0), Some(80.0));
        let outcome = derive_live_close_outcome(&signal, 95.0);
        assert_eq!(outcome.status, OutcomeStatus::TpHit);
        assert_eq!(outcome.rr, 0.5);

        let outcome = derive_live_close_outcome(&signal, 112.0);
        assert_eq!(outcome.status, OutcomeStatus::SlHit);
        assert_eq!(outcome.rr, -1.2);
    }

    #[test]
    fn test_degenerate_risk_uses_directional_diff() {
        let signal = SignalParams::new(Direction::Buy, Some(100.0), Some(100.0), Some(120.0));

        let outcome = derive_live_close_outcome(&signal, 101.0);
        assert_eq!(outcome.status, OutcomeStatus::TpHit);
        assert_eq!(outcome.rr, 0.0);

        let outcome = derive_live_close_outcome(&signal, 99.0);
        assert_eq!(outcome.status, OutcomeStatus::SlHit);
        assert_eq!(outcome.rr, 0.0);

        let outcome = derive_live_close_outcome(&signal, 100.0);
        assert_eq!(outcome.status, OutcomeStatus::Breakeven);
        assert_eq!(outcome.rr, 0.0);
    }

    #[test]
    fn test_missing_levels_fail_safe() {
        let signal = SignalParams::new(Direction::Buy, None, Some(90.0), None);
        let outcome = derive_live_close_outcome(&signal, 105.0);
        assert_eq!(outcome.status, OutcomeStatus::Breakeven);
        assert_eq!(outcome.rr, 0.0);
    }

    #[test]
    fn test_non_finite_close_fails_safe() {
        let outcome = derive_live_close_outcome(&buy_signal(), f64::NAN);
        assert_eq!(outcome.status, OutcomeStatus::Breakeven);

        let outcome = derive_live_close_outcome(&buy_signal(), f64::INFINITY);
        assert_eq!(outcome.status, OutcomeStatus::Breakeven);
    }
}
