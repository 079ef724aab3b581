//! Market regime estimate from the benchmark symbol's daily history.
//!
//! Four independent signed readings are summed into a score in -4..=+4 and
//! mapped to a bullish/bearish/neutral label via fixed breakpoints. A
//! benchmark that cannot be read defaults to neutral rather than failing
//! the run.

use signal_core::{round2, BarHistory, BiasLabel, MarketBias};
use technical_indicators::IndicatorSnapshot;

/// Score at or above which the regime reads bullish.
pub const BULLISH_SCORE_MIN: i32 = 2;
/// Score at or below which the regime reads bearish.
pub const BEARISH_SCORE_MAX: i32 = -2;

pub fn label_for_score(score: i32) -> BiasLabel {
    if score >= BULLISH_SCORE_MIN {
        BiasLabel::Bullish
    } else if score <= BEARISH_SCORE_MAX {
        BiasLabel::Bearish
    } else {
        BiasLabel::Neutral
    }
}

pub struct MarketBiasCalculator;

impl MarketBiasCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Sum the four regime readings. Insufficient benchmark history (any
    /// reading unavailable) degrades to the neutral default with the raw
    /// fields omitted.
    pub fn compute(&self, history: &BarHistory) -> MarketBias {
        let snap = IndicatorSnapshot::from_history(history);
        let (close, sma200, ema20, ema50, rsi14, roc20) = match (
            history.last().map(|b| b.close),
            snap.sma200,
            snap.ema20,
            snap.ema50,
            snap.rsi14,
            snap.roc20,
        ) {
            (Some(c), Some(s), Some(e20), Some(e50), Some(r), Some(roc)) => {
                (c, s, e20, e50, r, roc)
            }
            _ => return MarketBias::neutral(),
        };

        let mut score = 0;
        score += if close > sma200 { 1 } else { -1 };
        score += if ema20 > ema50 { 1 } else { -1 };
        score += if rsi14 >= 50.0 { 1 } else { -1 };
        score += if roc20 >= 0.0 { 1 } else { -1 };

        MarketBias {
            score,
            bias: label_for_score(score),
            spy_close: Some(round2(close)),
            spy_sma200: Some(round2(sma200)),
            ema20_gt_ema50: Some(ema20 > ema50),
            rsi14: Some(round2(rsi14)),
            roc20_pct: Some(round2(roc20)),
        }
    }
}

impl Default for MarketBiasCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use signal_core::Bar;

    fn history_from_closes(closes: &[f64]) -> BarHistory {
        let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        let mut bars = Vec::with_capacity(closes.len());
        let mut prev = closes[0];
        for (i, &close) in closes.iter().enumerate() {
            let open = if i == 0 { close } else { prev };
            bars.push(Bar {
                date: start + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 0.2,
                low: open.min(close) - 0.2,
                close,
                volume: 2_000_000.0,
            });
            prev = close;
        }
        BarHistory::new(bars).unwrap()
    }

    #[test]
    fn score_breakpoints() {
        assert_eq!(label_for_score(4), BiasLabel::Bullish);
        assert_eq!(label_for_score(2), BiasLabel::Bullish);
        assert_eq!(label_for_score(0), BiasLabel::Neutral);
        assert_eq!(label_for_score(-2), BiasLabel::Bearish);
        assert_eq!(label_for_score(-4), BiasLabel::Bearish);
    }

    #[test]
    fn persistent_downtrend_scores_minus_four() {
        // Every reading bearish: close below 200-day SMA, EMA20 < EMA50,
        // RSI14 at 0, negative 20-day ROC
        let closes: Vec<f64> = (0..250).map(|i| 300.0 - 0.5 * i as f64).collect();
        let bias = MarketBiasCalculator::new().compute(&history_from_closes(&closes));

        assert_eq!(bias.score, -4);
        assert_eq!(bias.bias, BiasLabel::Bearish);
        assert_eq!(bias.ema20_gt_ema50, Some(false));
        assert!(bias.spy_close.unwrap() < bias.spy_sma200.unwrap());
        assert!(bias.roc20_pct.unwrap() < 0.0);
    }

    #[test]
    fn persistent_uptrend_scores_plus_four() {
        let closes: Vec<f64> = (0..250).map(|i| 100.0 + 0.5 * i as f64).collect();
        let bias = MarketBiasCalculator::new().compute(&history_from_closes(&closes));

        assert_eq!(bias.score, 4);
        assert_eq!(bias.bias, BiasLabel::Bullish);
        assert_eq!(bias.ema20_gt_ema50, Some(true));
    }

    #[test]
    fn short_history_defaults_to_neutral() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let bias = MarketBiasCalculator::new().compute(&history_from_closes(&closes));

        assert_eq!(bias.score, 0);
        assert_eq!(bias.bias, BiasLabel::Neutral);
        assert!(bias.spy_close.is_none());
        assert!(bias.rsi14.is_none());
    }
}
