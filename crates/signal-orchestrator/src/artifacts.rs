//! Payload assembly and atomic artifact writes. Consumers only ever see a
//! complete file: content goes to a temp file first and is renamed over the
//! previous run's output.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use signal_core::{ChartBar, MarketBias, Payload};

use crate::ranker::RankedIdeas;
use crate::RunConfig;

pub const DISCLAIMER: &str =
    "Educational use only. Not financial advice. Data provided as-is from public sources.";

/// The run's persisted results: the aggregate payload plus one chart slice
/// per symbol that had any bars.
#[derive(Debug)]
pub struct RunOutput {
    pub payload: Payload,
    pub charts: Vec<(String, Vec<ChartBar>)>,
}

pub fn assemble_payload(
    ranked: RankedIdeas,
    watchlist: &[String],
    market_bias: MarketBias,
    now: DateTime<Utc>,
) -> Payload {
    Payload {
        generated_at_utc: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        watchlist: watchlist.to_vec(),
        market_bias,
        ideas: ranked.into_combined(),
        disclaimer: DISCLAIMER.to_string(),
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);
    fs::write(tmp, bytes)?;
    fs::rename(tmp, path)
}

pub fn write_artifacts(output: &RunOutput, config: &RunConfig) -> io::Result<()> {
    let bytes = serde_json::to_vec_pretty(&output.payload)?;
    write_atomic(&config.output_data, &bytes)?;

    for (symbol, chart) in &output.charts {
        let path = config.output_ohlc_dir.join(format!("{symbol}.json"));
        let bytes = serde_json::to_vec(chart)?;
        write_atomic(&path, &bytes)?;
    }
    Ok(())
}
