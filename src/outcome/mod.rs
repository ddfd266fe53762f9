//! Outcome module - trade math and live outcome evaluation

pub mod engine;
pub mod live;
pub mod math;
pub mod symbol;

pub use engine::OutcomeEngine;
pub use live::derive_live_close_outcome;
pub use math::{
    displayed_potential_profit, signal_rr, signal_rr_for_target, win_rate_percent, PRICE_EPSILON,
};
pub use symbol::derive_symbol_from_pair;
