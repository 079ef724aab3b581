//! Daily bar retrieval from Stooq's public CSV endpoint.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use signal_core::{Bar, BarHistory, BarSource, SignalError};
use std::time::Duration;

const BASE_URL: &str = "https://stooq.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One row of Stooq's daily CSV. Volume is absent for some indices.
#[derive(Debug, Deserialize)]
struct StooqRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Volume", default)]
    volume: Option<f64>,
}

/// Parse a Stooq daily CSV body into a validated history. Rows that fail to
/// parse (Stooq emits "N/D" placeholders) are dropped; rows are sorted by
/// date before validation.
pub fn parse_daily_csv(body: &str) -> Result<BarHistory, SignalError> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut bars: Vec<Bar> = reader
        .deserialize::<StooqRow>()
        .filter_map(|row| row.ok())
        .map(|row| Bar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume.unwrap_or(0.0),
        })
        .collect();

    if bars.is_empty() {
        return Err(SignalError::DataUnavailable(
            "no parsable rows in response".to_string(),
        ));
    }

    bars.sort_by_key(|b| b.date);
    BarHistory::new(bars)
}

#[derive(Clone)]
pub struct StooqClient {
    client: Client,
    base_url: String,
}

impl StooqClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (local fixtures in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_daily_csv(&self, symbol: &str) -> Result<String, SignalError> {
        let url = format!("{}/q/d/l/?s={}&i=d", self.base_url, symbol);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SignalError::FetchError(format!("{symbol}: {e}")))?;

        if !response.status().is_success() {
            return Err(SignalError::FetchError(format!(
                "{symbol}: HTTP {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SignalError::FetchError(format!("{symbol}: {e}")))
    }
}

impl Default for StooqClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BarSource for StooqClient {
    async fn daily_history(&self, symbol: &str) -> Result<BarHistory, SignalError> {
        let body = self.fetch_daily_csv(symbol).await?;
        let history = parse_daily_csv(&body)?;
        tracing::debug!("{}: {} daily bars", symbol, history.len());
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Volume
2024-01-02,100.0,102.0,99.0,101.0,1200000
2024-01-03,101.0,103.0,100.5,102.5,900000
2024-01-04,102.5,104.0,101.0,103.0,1100000
";

    #[test]
    fn parses_daily_rows() {
        let history = parse_daily_csv(SAMPLE).unwrap();
        assert_eq!(history.len(), 3);
        let last = history.last().unwrap();
        assert_eq!(last.date.to_string(), "2024-01-04");
        assert_eq!(last.close, 103.0);
        assert_eq!(last.volume, 1_100_000.0);
    }

    #[test]
    fn skips_unparsable_rows() {
        let body = "\
Date,Open,High,Low,Close,Volume
2024-01-02,100.0,102.0,99.0,101.0,1200000
2024-01-03,N/D,N/D,N/D,N/D,N/D
2024-01-04,102.5,104.0,101.0,103.0,1100000
";
        let history = parse_daily_csv(body).unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn missing_volume_defaults_to_zero() {
        let body = "\
Date,Open,High,Low,Close
2024-01-02,100.0,102.0,99.0,101.0
";
        let history = parse_daily_csv(body).unwrap();
        assert_eq!(history.last().unwrap().volume, 0.0);
    }

    #[test]
    fn empty_body_is_unavailable() {
        let err = parse_daily_csv("Date,Open,High,Low,Close,Volume\n").unwrap_err();
        assert!(matches!(err, SignalError::DataUnavailable(_)));
    }

    #[test]
    fn out_of_order_rows_are_sorted() {
        let body = "\
Date,Open,High,Low,Close,Volume
2024-01-04,102.5,104.0,101.0,103.0,1100000
2024-01-02,100.0,102.0,99.0,101.0,1200000
";
        let history = parse_daily_csv(body).unwrap();
        assert_eq!(history.bars()[0].date.to_string(), "2024-01-02");
    }
}
