pub mod constants;
pub mod short_term;
pub mod weekly;

pub use constants::*;
pub use short_term::*;
pub use weekly::*;

use signal_core::{BarHistory, Plan};
use technical_indicators::IndicatorSnapshot;

/// A plan plus the internal ranking score. The score never leaves the
/// engine; only the plan is serialized.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub plan: Plan,
    pub score: f64,
}

impl Candidate {
    pub fn new(plan: Plan, score: f64) -> Self {
        Self { plan, score }
    }
}

/// Run every strategy against one symbol's history. Each evaluator is a
/// pure function yielding zero or one candidate; a missing indicator just
/// means that evaluator declines while the others still run.
pub fn evaluate_symbol(history: &BarHistory, snapshot: &IndicatorSnapshot) -> Vec<Candidate> {
    [
        trend_pullback_bullish(history, snapshot),
        trend_pullback_bearish(history, snapshot),
        mean_reversion_bullish(history, snapshot),
        mean_reversion_bearish(history, snapshot),
        momentum_continuation(history, snapshot),
        weekly_trend_bullish(history),
    ]
    .into_iter()
    .flatten()
    .collect()
}
