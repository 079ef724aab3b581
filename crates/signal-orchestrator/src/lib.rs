//! Batch signal run: fan out per-symbol evaluation, fan in for ranking and
//! payload assembly. Per-symbol failures are absorbed; only an unusable
//! configuration aborts the run.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use market_bias::MarketBiasCalculator;
use signal_core::{BarHistory, BarSource, ChartBar, MarketBias, SignalError};
use strategy_engine::{evaluate_symbol, Candidate};
use technical_indicators::IndicatorSnapshot;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub mod artifacts;
pub mod ranker;

pub use artifacts::{assemble_payload, write_artifacts, RunOutput, DISCLAIMER};
pub use ranker::{rank, RankedIdeas};

/// Minimum daily bars before any strategy is evaluated.
pub const MIN_HISTORY_BARS: usize = 210;
/// Trailing window emitted per symbol for charting.
pub const CHART_BARS: usize = 200;
/// Liquidity floor: last close and 20-day average dollar volume.
pub const MIN_PRICE: f64 = 5.0;
pub const MIN_DOLLAR_VOLUME: f64 = 10_000_000.0;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub watchlist: Vec<String>,
    pub benchmark: String,
    pub output_data: PathBuf,
    pub output_ohlc_dir: PathBuf,
    pub concurrency: usize,
    pub fetch_timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            watchlist: Vec::new(),
            benchmark: "spy.us".to_string(),
            output_data: PathBuf::from("public/data/today.json"),
            output_ohlc_dir: PathBuf::from("public/ohlc"),
            concurrency: 4,
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

/// Everything one symbol contributed to the run.
#[derive(Debug, Default)]
pub struct SymbolReport {
    pub candidates: Vec<Candidate>,
    pub chart: Vec<ChartBar>,
}

/// Price/volume floor so thin names never surface as ideas. Histories with
/// no volume data (some indices) pass the dollar-volume leg.
pub fn liquidity_ok(history: &BarHistory) -> bool {
    let Some(last) = history.last() else {
        return false;
    };
    if last.close < MIN_PRICE {
        return false;
    }
    let tail = history.tail(20);
    let dollar_volume: f64 = tail.iter().map(|b| b.close * b.volume).sum::<f64>() / tail.len() as f64;
    dollar_volume == 0.0 || dollar_volume >= MIN_DOLLAR_VOLUME
}

/// Evaluate one symbol's history: chart slice always, strategies only past
/// the history and liquidity gates.
pub fn evaluate_history(symbol: &str, history: &BarHistory) -> SymbolReport {
    let chart = history.tail(CHART_BARS).iter().map(ChartBar::from).collect();

    if history.len() < MIN_HISTORY_BARS {
        tracing::warn!(
            "{}: only {} bars (need {}), skipping strategies",
            symbol,
            history.len(),
            MIN_HISTORY_BARS
        );
        return SymbolReport {
            candidates: Vec::new(),
            chart,
        };
    }
    if !liquidity_ok(history) {
        tracing::warn!("{}: below price/dollar-volume floor, skipping strategies", symbol);
        return SymbolReport {
            candidates: Vec::new(),
            chart,
        };
    }

    let snapshot = IndicatorSnapshot::from_history(history);
    SymbolReport {
        candidates: evaluate_symbol(history, &snapshot),
        chart,
    }
}

pub struct SignalOrchestrator {
    source: Arc<dyn BarSource>,
    bias_calculator: MarketBiasCalculator,
    /// Per-run history cache; the benchmark is usually also a watchlist
    /// member and should be fetched once.
    history_cache: DashMap<String, Arc<BarHistory>>,
}

impl SignalOrchestrator {
    pub fn new(source: Arc<dyn BarSource>) -> Self {
        Self {
            source,
            bias_calculator: MarketBiasCalculator::new(),
            history_cache: DashMap::new(),
        }
    }

    async fn get_history(
        &self,
        symbol: &str,
        fetch_timeout: Duration,
    ) -> Result<Arc<BarHistory>, SignalError> {
        if let Some(cached) = self.history_cache.get(symbol) {
            return Ok(cached.clone());
        }

        let history = tokio::time::timeout(fetch_timeout, self.source.daily_history(symbol))
            .await
            .map_err(|_| SignalError::DataUnavailable(format!("{symbol}: fetch timed out")))??;

        let history = Arc::new(history);
        self.history_cache
            .insert(symbol.to_string(), history.clone());
        Ok(history)
    }

    /// Compute the benchmark regime, degrading to neutral if its data
    /// cannot be obtained.
    async fn market_bias(&self, config: &RunConfig) -> MarketBias {
        match self.get_history(&config.benchmark, config.fetch_timeout).await {
            Ok(history) => self.bias_calculator.compute(&history),
            Err(e) => {
                tracing::warn!("benchmark {} unavailable ({e}), bias neutral", config.benchmark);
                MarketBias::neutral()
            }
        }
    }

    /// Run the whole batch once. The only fatal condition is an empty
    /// watchlist; every other failure shows up as absent data.
    pub async fn run(self: &Arc<Self>, config: &RunConfig) -> Result<RunOutput, SignalError> {
        if config.watchlist.is_empty() {
            return Err(SignalError::ConfigError(
                "watchlist is empty; nothing to evaluate".to_string(),
            ));
        }

        let bias = self.market_bias(config).await;
        tracing::info!("market bias: {:?} (score {})", bias.bias, bias.score);

        let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
        let mut tasks: JoinSet<(String, Option<SymbolReport>)> = JoinSet::new();

        for symbol in &config.watchlist {
            let symbol = symbol.clone();
            let orchestrator = Arc::clone(self);
            let semaphore = Arc::clone(&semaphore);
            let fetch_timeout = config.fetch_timeout;

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                match orchestrator.get_history(&symbol, fetch_timeout).await {
                    Ok(history) => {
                        let report = evaluate_history(&symbol, &history);
                        (symbol, Some(report))
                    }
                    Err(e) => {
                        tracing::warn!("{}: skipped ({e})", symbol);
                        (symbol, None)
                    }
                }
            });
        }

        let mut candidates: Vec<(String, Candidate)> = Vec::new();
        let mut charts: Vec<(String, Vec<ChartBar>)> = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (symbol, report) = joined.map_err(|e| {
                SignalError::DataUnavailable(format!("symbol task panicked: {e}"))
            })?;
            if let Some(report) = report {
                let display = symbol.to_uppercase();
                for candidate in report.candidates {
                    candidates.push((display.clone(), candidate));
                }
                if !report.chart.is_empty() {
                    charts.push((symbol, report.chart));
                }
            }
        }

        // Completion order is nondeterministic; sort by symbol so the
        // write sequence is stable
        charts.sort_by(|a, b| a.0.cmp(&b.0));

        let ranked = rank(candidates);
        tracing::info!(
            "{} short idea(s), {} long idea(s) across {} charted symbol(s)",
            ranked.short.len(),
            ranked.long.len(),
            charts.len()
        );

        let payload = assemble_payload(ranked, &config.watchlist, bias, chrono::Utc::now());
        Ok(RunOutput { payload, charts })
    }
}
