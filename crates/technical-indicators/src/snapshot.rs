use signal_core::BarHistory;

use crate::indicators::{atr, ema, roc, rsi, sma};

/// Latest indicator readings for one symbol. A `None` field means the
/// history was too short for that lookback; strategies that need it skip
/// the symbol while unaffected strategies still run.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSnapshot {
    pub ema5: Option<f64>,
    pub ema20: Option<f64>,
    pub ema50: Option<f64>,
    /// EMA values one bar back, kept for crossover detection.
    pub prev_ema5: Option<f64>,
    pub prev_ema20: Option<f64>,
    pub sma5: Option<f64>,
    pub sma200: Option<f64>,
    pub rsi2: Option<f64>,
    pub rsi14: Option<f64>,
    pub atr14: Option<f64>,
    /// 20-period rate of change, in percent.
    pub roc20: Option<f64>,
}

fn last(series: &[f64]) -> Option<f64> {
    series.last().copied()
}

fn previous(series: &[f64]) -> Option<f64> {
    if series.len() >= 2 {
        Some(series[series.len() - 2])
    } else {
        None
    }
}

impl IndicatorSnapshot {
    /// Compute the latest value of every indicator the strategies use.
    /// Recomputed fresh per run; never persisted.
    pub fn from_history(history: &BarHistory) -> Self {
        let closes = history.closes();

        let ema5_series = ema(&closes, 5);
        let ema20_series = ema(&closes, 20);

        Self {
            ema5: last(&ema5_series),
            ema20: last(&ema20_series),
            ema50: last(&ema(&closes, 50)),
            prev_ema5: previous(&ema5_series),
            prev_ema20: previous(&ema20_series),
            sma5: last(&sma(&closes, 5)),
            sma200: last(&sma(&closes, 200)),
            rsi2: last(&rsi(&closes, 2)),
            rsi14: last(&rsi(&closes, 14)),
            atr14: last(&atr(history.bars(), 14)),
            roc20: last(&roc(&closes, 20)),
        }
    }
}
