//! Fixed strategy thresholds and multipliers. Tuning these is a deliberate
//! act; none of them are learned or adjusted at runtime.

/// Moderate RSI14 band for a bullish trend pullback (not oversold, not
/// overbought).
pub const UPTREND_RSI_MIN: f64 = 40.0;
pub const UPTREND_RSI_MAX: f64 = 65.0;

/// Mirrored band for the bearish variant.
pub const DOWNTREND_RSI_MIN: f64 = 35.0;
pub const DOWNTREND_RSI_MAX: f64 = 60.0;

/// RSI(2) extremes for mean reversion.
pub const MR_RSI2_OVERSOLD: f64 = 10.0;
pub const MR_RSI2_OVERBOUGHT: f64 = 90.0;

/// Short-horizon ATR multipliers: stop at 1.0x, target at 1.8x.
pub const STOP_ATR_MULT: f64 = 1.0;
pub const TARGET_ATR_MULT: f64 = 1.8;

/// Minimum acceptable risk/reward for trend-following plans.
pub const MIN_RR_TREND: f64 = 1.5;

/// Reversion targets float with the 5-day mean, so the floor is lower.
pub const MIN_RR_REVERSION: f64 = 0.5;

/// Weekly long-horizon parameters.
pub const LT_SMA_WEEKS: usize = 40;
pub const LT_RSI_MIN: f64 = 55.0;
pub const LT_MIN_WEEKS: usize = 60;
pub const LT_STOP_ATR_MULT: f64 = 2.0;
pub const LT_TARGET_ATR_MULT: f64 = 4.0;
