use signal_core::Bar;

/// Simple Moving Average
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }

    let mut result = Vec::with_capacity(data.len() - period + 1);
    for i in period - 1..data.len() {
        let sum: f64 = data[i + 1 - period..=i].iter().sum();
        result.push(sum / period as f64);
    }
    result
}

/// Exponential Moving Average, seeded with the SMA of the first `period`
/// values, smoothing factor 2/(period+1).
pub fn ema(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let seed: f64 = data[..period].iter().sum::<f64>() / period as f64;

    let mut result = Vec::with_capacity(data.len() - period + 1);
    result.push(seed);
    for &value in &data[period..] {
        let prev = *result.last().unwrap();
        result.push((value - prev) * multiplier + prev);
    }
    result
}

/// Wilder Relative Strength Index. Average gain/loss are seeded with simple
/// averages of the first `period` changes, then Wilder-smoothed. Zero average
/// loss maps to RSI 100.
pub fn rsi(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period + 1 {
        return vec![];
    }

    let mut gains = Vec::with_capacity(data.len() - 1);
    let mut losses = Vec::with_capacity(data.len() - 1);
    for i in 1..data.len() {
        let change = data[i] - data[i - 1];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;

    let rsi_of = |avg_gain: f64, avg_loss: f64| {
        if avg_loss == 0.0 {
            100.0
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - (100.0 / (1.0 + rs))
        }
    };

    let mut result = Vec::with_capacity(gains.len() - period + 1);
    result.push(rsi_of(avg_gain, avg_loss));
    for i in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        result.push(rsi_of(avg_gain, avg_loss));
    }
    result
}

/// Wilder-smoothed Average True Range
pub fn atr(bars: &[Bar], period: usize) -> Vec<f64> {
    if period == 0 || bars.len() < period + 1 {
        return vec![];
    }

    let mut true_ranges = Vec::with_capacity(bars.len() - 1);
    for i in 1..bars.len() {
        let high_low = bars[i].high - bars[i].low;
        let high_close = (bars[i].high - bars[i - 1].close).abs();
        let low_close = (bars[i].low - bars[i - 1].close).abs();
        true_ranges.push(high_low.max(high_close).max(low_close));
    }

    let mut value = true_ranges[..period].iter().sum::<f64>() / period as f64;
    let mut result = Vec::with_capacity(true_ranges.len() - period + 1);
    result.push(value);
    for &tr in &true_ranges[period..] {
        value = (value * (period - 1) as f64 + tr) / period as f64;
        result.push(value);
    }
    result
}

/// Rate of Change: percentage change of each value vs the value `period`
/// entries earlier.
pub fn roc(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period + 1 {
        return vec![];
    }

    let mut result = Vec::with_capacity(data.len() - period);
    for i in period..data.len() {
        result.push((data[i] / data[i - period] - 1.0) * 100.0);
    }
    result
}
