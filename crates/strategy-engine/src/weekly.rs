//! Long-horizon evaluation on weekly bars resampled from the daily history.

use chrono::Datelike;
use signal_core::{Bar, BarHistory, Direction, Horizon, Plan};
use technical_indicators::{atr, ema, rsi, sma};

use crate::constants::*;
use crate::Candidate;

/// Aggregate daily bars into ISO-week bars: open of the first session,
/// high/low extremes, close of the last session, summed volume. The weekly
/// bar carries the date of its last session so ordering is preserved.
pub fn resample_weekly(bars: &[Bar]) -> Vec<Bar> {
    let mut weekly: Vec<Bar> = Vec::new();
    let mut current_week: Option<(i32, u32)> = None;

    for bar in bars {
        let week = (bar.date.iso_week().year(), bar.date.iso_week().week());
        if current_week == Some(week) {
            let agg = weekly.last_mut().unwrap();
            agg.date = bar.date;
            agg.high = agg.high.max(bar.high);
            agg.low = agg.low.min(bar.low);
            agg.close = bar.close;
            agg.volume += bar.volume;
        } else {
            weekly.push(bar.clone());
            current_week = Some(week);
        }
    }
    weekly
}

/// Conservative multi-week continuation idea: only fires in a strong weekly
/// uptrend (close above the 40-week SMA, EMA10w above EMA30w, weekly RSI at
/// or above 55), with wide ATR-sized levels for the longer hold.
pub fn weekly_trend_bullish(history: &BarHistory) -> Option<Candidate> {
    let weekly = resample_weekly(history.bars());
    if weekly.len() < LT_MIN_WEEKS {
        return None;
    }

    let closes: Vec<f64> = weekly.iter().map(|b| b.close).collect();
    let close = *closes.last()?;
    let sma40 = sma(&closes, LT_SMA_WEEKS).last().copied()?;
    let ema10 = ema(&closes, 10).last().copied()?;
    let ema30 = ema(&closes, 30).last().copied()?;
    let rsi14w = rsi(&closes, 14).last().copied()?;
    let atr14w = atr(&weekly, 14).last().copied()?;

    if !(close > sma40 && ema10 > ema30 && rsi14w >= LT_RSI_MIN) {
        return None;
    }

    let entry = close;
    let stop = entry - LT_STOP_ATR_MULT * atr14w;
    let target = entry + LT_TARGET_ATR_MULT * atr14w;
    let reason = format!(
        "Weekly uptrend: close {:.2} > 40-week SMA {:.2}, EMA10w > EMA30w, RSI14w {:.1} >= {:.0}; stop {:.1}x / target {:.1}x ATR14w {:.2}.",
        close, sma40, rsi14w, LT_RSI_MIN, LT_STOP_ATR_MULT, LT_TARGET_ATR_MULT, atr14w
    );

    let plan = Plan::new(
        "WeeklyTrendLong",
        entry,
        stop,
        target,
        reason,
        Direction::Bullish,
        Horizon::Long,
    )?;
    if plan.rr < MIN_RR_TREND {
        return None;
    }

    // Confidence: distance above the 40-week SMA plus weekly momentum
    let dist = (close - sma40) / sma40.max(1e-6);
    let momq = (rsi14w - 50.0) / 50.0;
    let score = plan.rr * (1.0 + 0.7 * dist.max(0.0) + 0.5 * momq.max(0.0));
    Some(Candidate::new(plan, score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

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
    fn resample_aggregates_iso_weeks() {
        // 2022-01-03 is a Monday; 10 consecutive days span two ISO weeks
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let history = history_from_closes(&closes);
        let weekly = resample_weekly(history.bars());

        assert_eq!(weekly.len(), 2);
        let first = &weekly[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2022, 1, 9).unwrap());
        assert_eq!(first.open, 100.0);
        assert_eq!(first.close, 106.0);
        assert_eq!(first.high, 106.2);
        assert_eq!(first.volume, 7.0 * 2_000_000.0);

        let second = &weekly[1];
        assert_eq!(second.open, 106.0);
        assert_eq!(second.close, 109.0);
    }

    #[test]
    fn weekly_trend_fires_in_strong_uptrend() {
        let closes: Vec<f64> = (0..430).map(|i| 100.0 + 0.2 * i as f64).collect();
        let history = history_from_closes(&closes);

        let cand = weekly_trend_bullish(&history).expect("plan expected");
        let plan = &cand.plan;
        assert!(plan.active);
        assert_eq!(plan.horizon, Horizon::Long);
        assert_eq!(plan.direction, Direction::Bullish);
        assert!(plan.target > plan.entry && plan.entry > plan.stop);
        assert!(plan.rr >= 1.5);
        assert!(plan.reason.contains("Weekly uptrend"));
    }

    #[test]
    fn weekly_trend_declines_in_downtrend() {
        let closes: Vec<f64> = (0..430).map(|i| 200.0 - 0.2 * i as f64).collect();
        let history = history_from_closes(&closes);
        assert!(weekly_trend_bullish(&history).is_none());
    }

    #[test]
    fn weekly_trend_needs_enough_weeks() {
        // ~14 weeks of data, well short of the 60-week minimum
        let closes: Vec<f64> = (0..100).map(|i| 100.0 + 0.2 * i as f64).collect();
        let history = history_from_closes(&closes);
        assert!(weekly_trend_bullish(&history).is_none());
    }
}
