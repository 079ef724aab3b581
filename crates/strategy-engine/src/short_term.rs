//! Daily-horizon strategy evaluators. Each is a pure function of the bar
//! history and the precomputed indicator snapshot, returning at most one
//! candidate per symbol.

use signal_core::{BarHistory, Direction, Horizon, Plan};
use technical_indicators::IndicatorSnapshot;

use crate::constants::*;
use crate::Candidate;

/// Trend-quality points for a bullish setup: regime (close vs 200-day SMA),
/// medium-term trend (EMA20 vs EMA50), and momentum (RSI14 distance above
/// 50). Unavailable readings contribute nothing.
fn quality_bullish(close: f64, snap: &IndicatorSnapshot) -> f64 {
    let mut pts = 0.0;
    if let Some(sma200) = snap.sma200 {
        if close > sma200 {
            pts += 1.0;
        }
    }
    if let (Some(ema20), Some(ema50)) = (snap.ema20, snap.ema50) {
        if ema20 > ema50 {
            pts += 1.0;
        }
    }
    if let Some(rsi14) = snap.rsi14 {
        pts += (rsi14 - 50.0) / 50.0;
    }
    pts.max(0.0)
}

fn quality_bearish(close: f64, snap: &IndicatorSnapshot) -> f64 {
    let mut pts = 0.0;
    if let Some(sma200) = snap.sma200 {
        if close < sma200 {
            pts += 1.0;
        }
    }
    if let (Some(ema20), Some(ema50)) = (snap.ema20, snap.ema50) {
        if ema20 < ema50 {
            pts += 1.0;
        }
    }
    if let Some(rsi14) = snap.rsi14 {
        pts += (50.0 - rsi14) / 50.0;
    }
    pts.max(0.0)
}

/// Pullback entry in an established uptrend: EMA5 at or above EMA20 (or a
/// fresh cross up), RSI14 in the moderate band. Stop/target are ATR-sized.
pub fn trend_pullback_bullish(
    history: &BarHistory,
    snap: &IndicatorSnapshot,
) -> Option<Candidate> {
    let close = history.last()?.close;
    let ema5 = snap.ema5?;
    let ema20 = snap.ema20?;
    let rsi14 = snap.rsi14?;
    let atr14 = snap.atr14?;

    let crossed_up = matches!(
        (snap.prev_ema5, snap.prev_ema20),
        (Some(p5), Some(p20)) if p5 <= p20 && ema5 > ema20
    );
    if !(ema5 >= ema20 || crossed_up) {
        return None;
    }
    if !(UPTREND_RSI_MIN..=UPTREND_RSI_MAX).contains(&rsi14) {
        return None;
    }

    let entry = close;
    let stop = entry - STOP_ATR_MULT * atr14;
    let target = entry + TARGET_ATR_MULT * atr14;
    let context = if crossed_up {
        "EMA5 crossed above EMA20"
    } else {
        "EMA5 above EMA20"
    };
    let reason = format!(
        "Uptrend pullback: {}, RSI14 {:.1} in {:.0}-{:.0} band; stop {:.1}x / target {:.1}x ATR14 {:.2}.",
        context, rsi14, UPTREND_RSI_MIN, UPTREND_RSI_MAX, STOP_ATR_MULT, TARGET_ATR_MULT, atr14
    );

    let plan = Plan::new(
        "TrendPullbackLong",
        entry,
        stop,
        target,
        reason,
        Direction::Bullish,
        Horizon::Short,
    )?;
    if plan.rr < MIN_RR_TREND {
        return None;
    }
    let score = plan.rr * (1.0 + 0.5 * quality_bullish(close, snap));
    Some(Candidate::new(plan, score))
}

/// Mirrored downtrend pullback: EMA5 at or below EMA20 (or a fresh cross
/// down), RSI14 in the mirrored band, stop above / target below entry.
pub fn trend_pullback_bearish(
    history: &BarHistory,
    snap: &IndicatorSnapshot,
) -> Option<Candidate> {
    let close = history.last()?.close;
    let ema5 = snap.ema5?;
    let ema20 = snap.ema20?;
    let rsi14 = snap.rsi14?;
    let atr14 = snap.atr14?;

    let crossed_down = matches!(
        (snap.prev_ema5, snap.prev_ema20),
        (Some(p5), Some(p20)) if p5 >= p20 && ema5 < ema20
    );
    if !(ema5 <= ema20 || crossed_down) {
        return None;
    }
    if !(DOWNTREND_RSI_MIN..=DOWNTREND_RSI_MAX).contains(&rsi14) {
        return None;
    }

    let entry = close;
    let stop = entry + STOP_ATR_MULT * atr14;
    let target = entry - TARGET_ATR_MULT * atr14;
    let context = if crossed_down {
        "EMA5 crossed below EMA20"
    } else {
        "EMA5 below EMA20"
    };
    let reason = format!(
        "Downtrend pullback: {}, RSI14 {:.1} in {:.0}-{:.0} band; stop {:.1}x / target {:.1}x ATR14 {:.2}.",
        context, rsi14, DOWNTREND_RSI_MIN, DOWNTREND_RSI_MAX, STOP_ATR_MULT, TARGET_ATR_MULT, atr14
    );

    let plan = Plan::new(
        "TrendPullbackShort",
        entry,
        stop,
        target,
        reason,
        Direction::Bearish,
        Horizon::Short,
    )?;
    if plan.rr < MIN_RR_TREND {
        return None;
    }
    let score = plan.rr * (1.0 + 0.5 * quality_bearish(close, snap));
    Some(Candidate::new(plan, score))
}

/// Deep short-term oversold inside a long-term uptrend, targeting a
/// snapback to the 5-day mean.
pub fn mean_reversion_bullish(
    history: &BarHistory,
    snap: &IndicatorSnapshot,
) -> Option<Candidate> {
    let close = history.last()?.close;
    let sma200 = snap.sma200?;
    let sma5 = snap.sma5?;
    let rsi2 = snap.rsi2?;
    let atr14 = snap.atr14?;

    if !(close > sma200 && rsi2 < MR_RSI2_OVERSOLD) {
        return None;
    }

    let entry = close;
    let stop = entry - STOP_ATR_MULT * atr14;
    let target = sma5;
    let reason = format!(
        "RSI(2) {:.1} oversold above 200-day SMA; snapback target 5-day SMA {:.2}.",
        rsi2, sma5
    );

    let plan = Plan::new(
        "MeanReversionLong",
        entry,
        stop,
        target,
        reason,
        Direction::Bullish,
        Horizon::Short,
    )?;
    if plan.rr < MIN_RR_REVERSION {
        return None;
    }
    let score = plan.rr * (1.0 + 0.5 * quality_bullish(close, snap));
    Some(Candidate::new(plan, score))
}

/// Mirror: short-term overbought inside a long-term downtrend, targeting a
/// drop back to the 5-day mean.
pub fn mean_reversion_bearish(
    history: &BarHistory,
    snap: &IndicatorSnapshot,
) -> Option<Candidate> {
    let close = history.last()?.close;
    let sma200 = snap.sma200?;
    let sma5 = snap.sma5?;
    let rsi2 = snap.rsi2?;
    let atr14 = snap.atr14?;

    if !(close < sma200 && rsi2 > MR_RSI2_OVERBOUGHT) {
        return None;
    }

    let entry = close;
    let stop = entry + STOP_ATR_MULT * atr14;
    let target = sma5;
    let reason = format!(
        "RSI(2) {:.1} overbought below 200-day SMA; drop target 5-day SMA {:.2}.",
        rsi2, sma5
    );

    let plan = Plan::new(
        "MeanReversionShort",
        entry,
        stop,
        target,
        reason,
        Direction::Bearish,
        Horizon::Short,
    )?;
    if plan.rr < MIN_RR_REVERSION {
        return None;
    }
    let score = plan.rr * (1.0 + 0.5 * quality_bearish(close, snap));
    Some(Candidate::new(plan, score))
}

/// Informational continuation idea from 20-day momentum; direction follows
/// the sign of ROC20.
pub fn momentum_continuation(
    history: &BarHistory,
    snap: &IndicatorSnapshot,
) -> Option<Candidate> {
    let close = history.last()?.close;
    let atr14 = snap.atr14?;
    let roc20 = snap.roc20?;

    let entry = close;
    let (stop, target, direction) = if roc20 >= 0.0 {
        (
            entry - STOP_ATR_MULT * atr14,
            entry + TARGET_ATR_MULT * atr14,
            Direction::Bullish,
        )
    } else {
        (
            entry + STOP_ATR_MULT * atr14,
            entry - TARGET_ATR_MULT * atr14,
            Direction::Bearish,
        )
    };
    let reason = format!("20-day momentum {:+.2}%.", roc20);

    let plan = Plan::new(
        "MomentumInfo",
        entry,
        stop,
        target,
        reason,
        direction,
        Horizon::Short,
    )?;
    let score = plan.rr;
    Some(Candidate::new(plan, score))
}
