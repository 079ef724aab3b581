#[cfg(test)]
mod tests {
    use super::super::indicators::*;
    use super::super::snapshot::IndicatorSnapshot;
    use chrono::NaiveDate;
    use signal_core::{Bar, BarHistory};

    // Helper function to create sample price data
    fn sample_prices() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ]
    }

    // Helper function to create bars along a close series, one weekday apart
    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000_000.0,
            })
            .collect()
    }

    #[test]
    fn test_sma_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 3);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 0.001); // (1+2+3)/3 = 2
        assert!((result[1] - 3.0).abs() < 0.001); // (2+3+4)/3 = 3
        assert!((result[2] - 4.0).abs() < 0.001); // (3+4+5)/3 = 4
    }

    #[test]
    fn test_sma_insufficient_data() {
        let data = vec![1.0, 2.0];
        assert_eq!(sma(&data, 5).len(), 0);
    }

    #[test]
    fn test_sma_constant_series() {
        let data = vec![42.0; 30];
        for value in sma(&data, 10) {
            assert!((value - 42.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let data = vec![22.0, 24.0, 23.0, 25.0, 26.0];
        let result = ema(&data, 3);

        assert_eq!(result.len(), 3);
        let seed = (22.0 + 24.0 + 23.0) / 3.0;
        assert!((result[0] - seed).abs() < 0.01);
    }

    #[test]
    fn test_ema_constant_series() {
        let data = vec![42.0; 30];
        for value in ema(&data, 5) {
            assert!((value - 42.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ema_insufficient_data() {
        let data = vec![1.0, 2.0];
        assert_eq!(ema(&data, 5).len(), 0);
    }

    #[test]
    fn test_ema_follows_uptrend() {
        let data: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let result = ema(&data, 3);
        for i in 1..result.len() {
            assert!(result[i] > result[i - 1]);
        }
    }

    #[test]
    fn test_rsi_bounded() {
        let result = rsi(&sample_prices(), 14);
        assert!(!result.is_empty());
        for &value in &result {
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_rsi_all_up_moves_is_100() {
        let data: Vec<f64> = (1..=30).map(|i| 100.0 + i as f64).collect();
        let result = rsi(&data, 14);
        for &value in &result {
            assert!((value - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rsi_all_down_moves_is_0() {
        let data: Vec<f64> = (1..=30).map(|i| 200.0 - i as f64).collect();
        let result = rsi(&data, 14);
        for &value in &result {
            assert!(value.abs() < 1e-9);
        }
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let data = vec![1.0, 2.0, 3.0];
        assert_eq!(rsi(&data, 14).len(), 0);
    }

    #[test]
    fn test_atr_constant_range() {
        // Every bar spans exactly 2.0 with no gaps, so TR = 2.0 throughout
        let closes = vec![100.0; 20];
        let bars = bars_from_closes(&closes);
        let result = atr(&bars, 14);
        assert!(!result.is_empty());
        for &value in &result {
            assert!((value - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_atr_insufficient_data() {
        let bars = bars_from_closes(&[100.0; 10]);
        assert_eq!(atr(&bars, 14).len(), 0);
    }

    #[test]
    fn test_roc_percent_change() {
        let data = vec![100.0, 101.0, 102.0, 110.0];
        let result = roc(&data, 3);
        assert_eq!(result.len(), 1);
        assert!((result[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_roc_insufficient_data() {
        let data = vec![100.0, 101.0];
        assert_eq!(roc(&data, 20).len(), 0);
    }

    #[test]
    fn test_snapshot_short_history_reports_unavailable() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64 * 0.1).collect();
        let history = BarHistory::new(bars_from_closes(&closes)).unwrap();
        let snap = IndicatorSnapshot::from_history(&history);

        // 30 bars: short lookbacks resolve, 200-day SMA does not
        assert!(snap.ema5.is_some());
        assert!(snap.ema20.is_some());
        assert!(snap.rsi14.is_some());
        assert!(snap.atr14.is_some());
        assert!(snap.roc20.is_some());
        assert!(snap.sma200.is_none());
        assert!(snap.ema50.is_none());
    }

    #[test]
    fn test_snapshot_full_history_resolves_everything() {
        let closes: Vec<f64> = (0..260).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
        let history = BarHistory::new(bars_from_closes(&closes)).unwrap();
        let snap = IndicatorSnapshot::from_history(&history);

        assert!(snap.ema5.is_some());
        assert!(snap.prev_ema5.is_some());
        assert!(snap.prev_ema20.is_some());
        assert!(snap.sma5.is_some());
        assert!(snap.sma200.is_some());
        assert!(snap.rsi2.is_some());
        assert!(snap.rsi14.is_some());
        assert!(snap.atr14.is_some());
        assert!(snap.roc20.is_some());
    }
}
