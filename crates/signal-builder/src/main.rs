//! signal-builder: one nightly batch pass over the watchlist.
//!
//! Fetches daily history per symbol, evaluates every strategy, ranks the
//! resulting ideas, and replaces the static JSON artifacts the dashboard
//! reads.
//!
//! Usage:
//!   cargo run -p signal-builder                          # default watchlist
//!   cargo run -p signal-builder -- --config config.json
//!   cargo run -p signal-builder -- --symbols aapl.us msft.us
//!   cargo run -p signal-builder -- --out public

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use signal_core::Horizon;
use signal_orchestrator::{write_artifacts, RunConfig, SignalOrchestrator};
use stooq_client::StooqClient;

const DEFAULT_WATCHLIST: &[&str] = &[
    // Broad market
    "spy.us", "qqq.us", "iwm.us",
    // Sectors
    "xlk.us", "xlf.us", "xle.us", "xlv.us", "xly.us", "xlb.us", "xli.us",
    "xlp.us", "xlu.us", "xlc.us",
    // Mega caps
    "aapl.us", "msft.us", "nvda.us", "amzn.us", "goog.us", "meta.us",
    "tsla.us", "amd.us", "avgo.us",
];

/// Optional JSON config; every field falls back to a built-in default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    watchlist: Vec<String>,
    benchmark: Option<String>,
    output_data: Option<PathBuf>,
    output_ohlc_dir: Option<PathBuf>,
    concurrency: Option<usize>,
    fetch_timeout_secs: Option<u64>,
}

fn load_file_config(path: &str) -> anyhow::Result<FileConfig> {
    let body = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read config {path}: {e}"))?;
    let config = serde_json::from_str(&body)
        .map_err(|e| anyhow::anyhow!("cannot parse config {path}: {e}"))?;
    Ok(config)
}

/// Collect the values following `--symbols` until the next flag.
fn symbols_from_args(args: &[String]) -> Option<Vec<String>> {
    let idx = args.iter().position(|a| a == "--symbols")?;
    let symbols: Vec<String> = args[idx + 1..]
        .iter()
        .take_while(|a| !a.starts_with("--"))
        .cloned()
        .collect();
    Some(symbols)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signal_builder=info,signal_orchestrator=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let file_config = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(|path| load_file_config(path))
        .transpose()?
        .unwrap_or_default();

    let watchlist = symbols_from_args(&args)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            if file_config.watchlist.is_empty() {
                None
            } else {
                Some(file_config.watchlist.clone())
            }
        })
        .unwrap_or_else(|| DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect());

    let defaults = RunConfig::default();
    let mut config = RunConfig {
        watchlist,
        benchmark: file_config.benchmark.unwrap_or(defaults.benchmark),
        output_data: file_config.output_data.unwrap_or(defaults.output_data),
        output_ohlc_dir: file_config
            .output_ohlc_dir
            .unwrap_or(defaults.output_ohlc_dir),
        concurrency: file_config.concurrency.unwrap_or(defaults.concurrency),
        fetch_timeout: file_config
            .fetch_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.fetch_timeout),
    };

    if let Some(out) = args
        .iter()
        .position(|a| a == "--out")
        .and_then(|i| args.get(i + 1))
    {
        let out = PathBuf::from(out);
        config.output_data = out.join("data/today.json");
        config.output_ohlc_dir = out.join("ohlc");
    }

    tracing::info!(
        "running batch for {} symbol(s), benchmark {}",
        config.watchlist.len(),
        config.benchmark
    );

    let orchestrator = Arc::new(SignalOrchestrator::new(Arc::new(StooqClient::new())));
    let output = orchestrator.run(&config).await?;

    write_artifacts(&output, &config)?;

    let short = output
        .payload
        .ideas
        .iter()
        .filter(|i| i.plan.horizon == Horizon::Short)
        .count();
    let long = output.payload.ideas.len() - short;
    tracing::info!(
        "wrote {} with {} idea(s) ({} short-term, {} long-term) and {} chart file(s)",
        config.output_data.display(),
        output.payload.ideas.len(),
        short,
        long,
        output.charts.len()
    );

    Ok(())
}
