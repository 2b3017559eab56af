// File: crates/kline-core/tests/timeframes.rs
// Purpose: Multi-timeframe fan-out over a fake bar provider.

mod common;

use std::cell::RefCell;

use anyhow::{bail, Result};
use common::rising;
use kline_core::{chart_timeframes, summarize_timeframes, Bar, BarSource, ChartConfig, Interval, TradingMode};

struct FakeSource {
    fail_on: Option<Interval>,
    calls: RefCell<Vec<(String, Interval, usize)>>,
}

impl FakeSource {
    fn new(fail_on: Option<Interval>) -> Self {
        Self { fail_on, calls: RefCell::new(Vec::new()) }
    }
}

impl BarSource for FakeSource {
    fn fetch(&self, symbol: &str, interval: Interval, limit: usize) -> Result<Vec<Bar>> {
        self.calls.borrow_mut().push((symbol.to_string(), interval, limit));
        if self.fail_on == Some(interval) {
            bail!("status 503");
        }
        Ok(rising(limit))
    }
}

#[test]
fn summaries_follow_mode_timeframes() {
    let source = FakeSource::new(None);
    let out = summarize_timeframes(&source, "BTCUSDT", TradingMode::Scalping, 60).expect("summaries");

    let intervals: Vec<_> = out.iter().map(|t| t.interval).collect();
    assert_eq!(intervals, TradingMode::Scalping.timeframes());
    assert!(out.iter().all(|t| t.summary.candle_count == 60));
    assert!(source.calls.borrow().iter().all(|(s, _, l)| s == "BTCUSDT" && *l == 60));
}

#[test]
fn fetch_error_aborts_with_interval_context() {
    let source = FakeSource::new(Some(Interval::H1));
    let err = summarize_timeframes(&source, "BTCUSDT", TradingMode::Swing, 30).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("failed to fetch BTCUSDT 1h"), "{msg}");
    assert!(msg.contains("status 503"), "{msg}");
    // 5m, 15m, then the failing 1h; nothing after.
    assert_eq!(source.calls.borrow().len(), 3);
}

#[test]
fn charts_for_every_timeframe() {
    let source = FakeSource::new(None);
    let charts = chart_timeframes(&source, "ETHUSDT", TradingMode::Intraday, 40, &ChartConfig::default())
        .expect("charts");
    assert_eq!(charts.len(), 6);
    assert_eq!(charts.last().map(|c| c.interval), Some(Interval::W1));
    assert!(charts.iter().all(|c| c.bars.len() == 40 && !c.png.is_empty()));
}

#[test]
fn empty_fetch_fails_chart_with_context() {
    let source = FakeSource::new(None);
    let err = chart_timeframes(&source, "ETHUSDT", TradingMode::Scalping, 0, &ChartConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to render ETHUSDT 5m chart"));
}
