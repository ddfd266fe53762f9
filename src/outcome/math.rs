//! Pure trade math over signal parameters
//!
//! All functions here are total: missing or non-finite inputs degrade to 0
//! rather than failing the caller. Comparisons against zero use
//! [`PRICE_EPSILON`] so that floating-point noise between independently
//! sourced prices never flips a classification.

use crate::common::types::{Direction, SignalParams, TradeRecord, TradeResult};

/// Tolerance for price comparisons
///
/// Far below realistic price-tick granularity, above accumulated IEEE-754
/// error for the magnitudes involved.
pub const PRICE_EPSILON: f64 = 1e-9;

/// Risk/reward ratio of a signal against its fixed take-profit
///
/// RR = |take_profit - entry| / |entry - stop|, direction-aware.
/// Returns 0 when any level is missing or the risked distance is
/// indistinguishable from zero.
///
/// # Example
/// BUY with entry 100, stop 90, take-profit 120 risks 10 to make 20: RR = 2.
pub fn signal_rr(signal: &SignalParams) -> f64 {
    match signal.take_profit {
        Some(tp) => signal_rr_for_target(signal, tp),
        None => 0.0,
    }
}

/// Risk/reward ratio of a signal against an arbitrary target price
///
/// Same formula as [`signal_rr`] with the target substituted for the fixed
/// take-profit; used to project RR against a moving target. Produces
/// identical results to [`signal_rr`] when `target == take_profit`.
pub fn signal_rr_for_target(signal: &SignalParams, target: f64) -> f64 {
    let (entry, stop) = match (signal.entry_price, signal.stop_loss) {
        (Some(entry), Some(stop)) => (entry, stop),
        _ => return 0.0,
    };

    if !entry.is_finite() || !stop.is_finite() || !target.is_finite() {
        return 0.0;
    }

    let risk = risk_per_unit(signal, entry, stop);
    if !risk.is_finite() || risk.abs() < PRICE_EPSILON {
        return 0.0;
    }

    let reward = match signal.direction {
        Direction::Buy => target - entry,
        Direction::Sell => entry - target,
    };

    (reward / risk).abs()
}

/// Signed risk per unit: positive when the stop is on the losing side.
pub(crate) fn risk_per_unit(signal: &SignalParams, entry: f64, stop: f64) -> f64 {
    match signal.direction {
        Direction::Buy => entry - stop,
        Direction::Sell => stop - entry,
    }
}

/// Potential profit displayed to the user for a trade
///
/// Open trades project `risk_amount * RR` using the fixed take-profit RR.
/// Closed trades show the realized pnl when available, floored at 0: a
/// losing trade never displays a negative "potential profit". A closed
/// trade with no recorded pnl falls back to the floored projection.
pub fn displayed_potential_profit(trade: &TradeRecord) -> f64 {
    let risk_amount = trade.risk_amount.filter(|r| r.is_finite()).unwrap_or(0.0);
    let projected = risk_amount * signal_rr(&trade.params);

    match trade.result {
        TradeResult::Pending => projected,
        _ => trade
            .pnl
            .filter(|p| p.is_finite())
            .unwrap_or(projected)
            .max(0.0),
    }
}

/// Win rate as a percentage of decided trades
///
/// Returns 0 when there are no decided trades.
pub fn win_rate_percent(wins: u64, losses: u64) -> f64 {
    let decided = wins + losses;
    if decided == 0 {
        return 0.0;
    }
    wins as f64 / decided as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::Direction;

    fn buy_fixture() -> SignalParams {
        SignalParams::new(Direction::Buy, Some(100.0), Some(90.0), Some(120.0))
    }

    fn sell_fixture() -> SignalParams {
        SignalParams::new(Direction::Sell, Some(100.0), Some(110.0), Some(80.0))
    }

    fn trade(result: TradeResult, risk_amount: Option<f64>, pnl: Option<f64>) -> TradeRecord {
        TradeRecord {
            result,
            risk_amount,
            pnl,
            params: buy_fixture(),
        }
    }

    #[test]
    fn test_buy_rr() {
        // Risk 10 to make 20
        assert_eq!(signal_rr(&buy_fixture()), 2.0);
    }

    #[test]
    fn test_sell_rr() {
        // Symmetric SELL case
        assert_eq!(signal_rr(&sell_fixture()), 2.0);
    }

    #[test]
    fn test_rr_for_moving_target() {
        // Target 115 on the BUY fixture: risk 10 to make 15
        assert_eq!(signal_rr_for_target(&buy_fixture(), 115.0), 1.5);
    }

    #[test]
    fn test_rr_for_target_matches_fixed_tp() {
        let signal = buy_fixture();
        assert_eq!(signal_rr_for_target(&signal, 120.0), signal_rr(&signal));

        let signal = sell_fixture();
        assert_eq!(signal_rr_for_target(&signal, 80.0), signal_rr(&signal));
    }

    #[test]
    fn test_rr_zero_risk() {
        let signal = SignalParams::new(Direction::Buy, Some(100.0), Some(100.0), Some(120.0));
        assert_eq!(signal_rr(&signal), 0.0);
    }

    #[test]
    fn test_rr_missing_levels() {
        let signal = SignalParams::new(Direction::Buy, None, Some(90.0), Some(120.0));
        assert_eq!(signal_rr(&signal), 0.0);

        let signal = SignalParams::new(Direction::Buy, Some(100.0), Some(90.0), None);
        assert_eq!(signal_rr(&signal), 0.0);
    }

    #[test]
    fn test_rr_non_finite_input() {
        let signal = SignalParams::new(Direction::Sell, Some(f64::NAN), Some(110.0), Some(80.0));
        assert_eq!(signal_rr(&signal), 0.0);
        assert_eq!(signal_rr_for_target(&signal, f64::INFINITY), 0.0);
    }

    #[test]
    fn test_open_trade_potential() {
        // risk 100 at RR 2.0
        let t = trade(TradeResult::Pending, Some(100.0), None);
        assert_eq!(displayed_potential_profit(&t), 200.0);
    }

    #[test]
    fn test_closed_win_shows_realized_pnl() {
        let t = trade(TradeResult::Win, Some(100.0), Some(84.5));
        assert_eq!(displayed_potential_profit(&t), 84.5);
    }

    #[test]
    fn test_closed_loss_floors_at_zero() {
        let t = trade(TradeResult::Loss, Some(100.0), Some(-50.0));
        assert_eq!(displayed_potential_profit(&t), 0.0);
    }

    #[test]
    fn test_closed_trade_without_pnl_projects() {
        let t = trade(TradeResult::Win, Some(100.0), None);
        assert_eq!(displayed_potential_profit(&t), 200.0);
    }

    #[test]
    fn test_win_rate() {
        assert_eq!(win_rate_percent(3, 1), 75.0);
        assert_eq!(win_rate_percent(0, 5), 0.0);
        assert_eq!(win_rate_percent(0, 0), 0.0);
    }
}
