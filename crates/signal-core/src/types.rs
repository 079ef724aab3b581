use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::SignalError;

/// Round to two decimals for output (prices, rr, chart values).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Chronological daily bar series for one symbol.
///
/// Validated on construction: strictly ascending unique dates, positive
/// prices, high/low bracketing open and close. Calendar gaps are fine
/// (non-trading days), backward jumps are not.
#[derive(Debug, Clone)]
pub struct BarHistory {
    bars: Vec<Bar>,
}

impl BarHistory {
    pub fn new(bars: Vec<Bar>) -> Result<Self, SignalError> {
        for (i, bar) in bars.iter().enumerate() {
            if bar.open <= 0.0 || bar.high <= 0.0 || bar.low <= 0.0 || bar.close <= 0.0 {
                return Err(SignalError::InvalidData(format!(
                    "non-positive price at {}",
                    bar.date
                )));
            }
            if bar.high < bar.open.max(bar.close) || bar.low > bar.open.min(bar.close) {
                return Err(SignalError::InvalidData(format!(
                    "high/low does not bracket open/close at {}",
                    bar.date
                )));
            }
            if i > 0 && bar.date <= bars[i - 1].date {
                return Err(SignalError::InvalidData(format!(
                    "dates not strictly ascending at {}",
                    bar.date
                )));
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Most recent `n` bars (all of them if the history is shorter).
    pub fn tail(&self, n: usize) -> &[Bar] {
        &self.bars[self.bars.len().saturating_sub(n)..]
    }
}

/// Trade direction of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bullish,
    Bearish,
}

/// Intended holding period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    Short,
    Long,
}

/// A fully specified trade setup: levels, risk/reward, and the rationale
/// derived from the indicator values that triggered it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub strategy: String,
    pub active: bool,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    pub rr: f64,
    pub reason: String,
    pub direction: Direction,
    pub horizon: Horizon,
}

impl Plan {
    /// Build a plan from raw levels. Levels are rounded to cents and rr is
    /// computed from the rounded values so serialized numbers stay
    /// self-consistent. Returns `None` for degenerate levels (entry == stop,
    /// ordering violated for the direction, or non-positive rr).
    pub fn new(
        strategy: impl Into<String>,
        entry: f64,
        stop: f64,
        target: f64,
        reason: impl Into<String>,
        direction: Direction,
        horizon: Horizon,
    ) -> Option<Self> {
        let entry = round2(entry);
        let stop = round2(stop);
        let target = round2(target);

        let (gain, risk) = match direction {
            Direction::Bullish => (target - entry, entry - stop),
            Direction::Bearish => (entry - target, stop - entry),
        };
        if risk <= 0.0 || gain <= 0.0 {
            return None;
        }
        let rr = round2(gain / risk);
        if !rr.is_finite() || rr <= 0.0 {
            return None;
        }

        Some(Self {
            strategy: strategy.into(),
            active: true,
            entry,
            stop,
            target,
            rr,
            reason: reason.into(),
            direction,
            horizon,
        })
    }
}

/// One candidate setup for one symbol from one strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Idea {
    pub symbol: String,
    pub plan: Plan,
}

/// Market regime label derived from the benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasLabel {
    Bullish,
    Bearish,
    Neutral,
}

/// Benchmark regime estimate. Raw readings are omitted from JSON when the
/// benchmark data was unavailable for the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketBias {
    pub score: i32,
    pub bias: BiasLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spy_close: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spy_sma200: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema20_gt_ema50: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi14: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roc20_pct: Option<f64>,
}

impl MarketBias {
    /// Fallback when the benchmark history could not be obtained.
    pub fn neutral() -> Self {
        Self {
            score: 0,
            bias: BiasLabel::Neutral,
            spy_close: None,
            spy_sma200: None,
            ema20_gt_ema50: None,
            rsi14: None,
            roc20_pct: None,
        }
    }
}

/// The run's aggregate artifact, replaced wholesale each run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payload {
    pub generated_at_utc: String,
    pub watchlist: Vec<String>,
    pub market_bias: MarketBias,
    pub ideas: Vec<Idea>,
    pub disclaimer: String,
}

/// One entry of the per-symbol charting slice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartBar {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl From<&Bar> for ChartBar {
    fn from(bar: &Bar) -> Self {
        Self {
            time: bar.date.format("%Y-%m-%d").to_string(),
            open: round2(bar.open),
            high: round2(bar.high),
            low: round2(bar.low),
            close: round2(bar.close),
        }
    }
}
