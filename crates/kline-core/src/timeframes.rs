// File: crates/kline-core/src/timeframes.rs
// Summary: Multi-timeframe fan-out over an external bar provider.

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

use crate::bar::Bar;
use crate::chart::{CandleChart, ChartConfig, RenderedChart};
use crate::interval::{Interval, TradingMode};
use crate::summary::{summarize, Summary};

/// Market-data provider. Returns bars oldest first, or the transport/API error.
pub trait BarSource {
    fn fetch(&self, symbol: &str, interval: Interval, limit: usize) -> Result<Vec<Bar>>;
}

#[derive(Clone, Debug)]
pub struct TimeframeSummary {
    pub interval: Interval,
    pub summary: Summary,
}

/// Summaries for every timeframe of `mode`, smallest first. The first fetch error aborts.
pub fn summarize_timeframes(
    source: &impl BarSource,
    symbol: &str,
    mode: TradingMode,
    limit: usize,
) -> Result<Vec<TimeframeSummary>> {
    mode.timeframes()
        .iter()
        .map(|&interval| {
            let bars = source
                .fetch(symbol, interval, limit)
                .with_context(|| format!("failed to fetch {symbol} {interval}"))?;
            Ok(TimeframeSummary { interval, summary: summarize(&bars) })
        })
        .collect()
}

/// One chart per timeframe of `mode`, all stamped with the same time.
pub fn chart_timeframes(
    source: &impl BarSource,
    symbol: &str,
    mode: TradingMode,
    limit: usize,
    cfg: &ChartConfig,
) -> Result<Vec<RenderedChart>> {
    let now = Utc::now();
    let charts = mode
        .timeframes()
        .iter()
        .map(|&interval| {
            let bars = source
                .fetch(symbol, interval, limit)
                .with_context(|| format!("failed to fetch {symbol} {interval}"))?;
            CandleChart::new(symbol, interval, &bars)
                .render_at(cfg, now)
                .with_context(|| format!("failed to render {symbol} {interval} chart"))
        })
        .collect::<Result<Vec<_>>>()?;
    info!("rendered {} {} charts for {symbol}", charts.len(), mode.display_name());
    Ok(charts)
}
