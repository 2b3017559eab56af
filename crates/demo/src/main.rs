// File: crates/demo/src/main.rs
// Summary: Demo loads OHLCV CSV, prints the market summary and renders candlestick PNGs.
//
// Usage:
//   kline-demo <file.csv> [symbol] [interval] [entry,sl,tp1,tp2,tp3]
//   kline-demo <dir> [symbol] [mode]
// A directory holds one `<symbol>_<interval>.csv` per timeframe of the trading mode.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use kline_core::{
    chart_timeframes, summarize, summarize_timeframes, validate_sequence, Bar, BarSource, CandleChart,
    ChartConfig, Interval, TradeLevels, TradingMode,
};
use log::{info, warn};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let raw = args.next().unwrap_or_else(|| "BTCUSDT_1h.csv".to_string());
    let symbol = args.next().unwrap_or_else(|| "BTCUSDT".to_string());
    let third = args.next();
    let levels = args.next().map(|s| parse_levels(&s)).transpose()?;

    let path = PathBuf::from(&raw);
    if path.is_dir() {
        let mode = match third {
            Some(s) => s.parse::<TradingMode>()?,
            None => TradingMode::Swing,
        };
        if levels.is_some() {
            warn!("trade levels are ignored in directory mode");
        }
        return run_dir(&path, &symbol, mode);
    }

    let interval = match third {
        Some(s) => s.parse::<Interval>()?,
        None => Interval::H1,
    };
    run_file(&path, &symbol, interval, levels)
}

fn run_file(path: &Path, symbol: &str, interval: Interval, levels: Option<TradeLevels>) -> Result<()> {
    println!("Using input file: {}", path.display());
    let bars = load_bars_csv(path, interval).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    println!("Loaded {} bars", bars.len());
    if bars.is_empty() {
        bail!("no bars loaded; check headers/delimiter.");
    }

    let summary = summarize(&bars);
    println!("{summary}");
    println!("{}", summary.headline());

    let (cfg, chart) = match levels {
        Some(levels) => (ChartConfig::for_levels(), CandleChart::new(symbol, interval, &bars).with_levels(levels)),
        None => (ChartConfig::default(), CandleChart::new(symbol, interval, &bars)),
    };
    let rendered = chart.render(&cfg)?;
    let out = out_name(symbol, interval)?;
    std::fs::write(&out, &rendered.png).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {} ({} candles)", out.display(), rendered.bars.len());
    Ok(())
}

fn run_dir(dir: &Path, symbol: &str, mode: TradingMode) -> Result<()> {
    let source = CsvDirSource { dir: dir.to_path_buf() };

    println!("=== {symbol} {} ===", mode.display_name());
    for tf in summarize_timeframes(&source, symbol, mode, 200)? {
        println!("[{}] {}", tf.interval.display_name(), tf.summary.headline());
    }

    for chart in chart_timeframes(&source, symbol, mode, 200, &ChartConfig::default())? {
        let out = out_name(symbol, chart.interval)?;
        std::fs::write(&out, &chart.png).with_context(|| format!("writing {}", out.display()))?;
        println!("Wrote {}", out.display());
    }
    Ok(())
}

/// Serves `<dir>/<symbol>_<interval>.csv`, keeping the most recent `limit` bars.
struct CsvDirSource {
    dir: PathBuf,
}

impl BarSource for CsvDirSource {
    fn fetch(&self, symbol: &str, interval: Interval, limit: usize) -> Result<Vec<Bar>> {
        let path = self.dir.join(format!("{symbol}_{interval}.csv"));
        let mut bars = load_bars_csv(&path, interval)?;
        let skip = bars.len().saturating_sub(limit);
        bars.drain(..skip);
        Ok(bars)
    }
}

/// Produce output file name like target/out/chart_<symbol>_<interval>.png
fn out_name(symbol: &str, interval: Interval) -> Result<PathBuf> {
    let out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;
    Ok(out.join(format!("chart_{symbol}_{interval}.png")))
}

/// `entry,sl[,tp1[,tp2[,tp3]]]`; zero or missing means "not set".
fn parse_levels(s: &str) -> Result<TradeLevels> {
    let prices = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().with_context(|| format!("bad level price '{p}'")))
        .collect::<Result<Vec<_>>>()?;
    Ok(TradeLevels::from_prices(&prices))
}

/// Load Binance-like OHLCV CSV into bars, oldest first.
fn load_bars_csv(path: &Path, interval: Interval) -> Result<Vec<Bar>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    info!("{}: headers {:?}", path.display(), headers);

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_time = idx(&["open_time", "time", "timestamp", "date", "datetime"]);
    let i_close_time = idx(&["close_time"]);
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "close_price"]);
    let i_volume = idx(&["volume", "v", "vol"]);

    let (Some(i_time), Some(i_open), Some(i_high), Some(i_low), Some(i_close)) =
        (i_time, i_open, i_high, i_low, i_close)
    else {
        bail!("missing one of time/open/high/low/close columns in {}", path.display());
    };

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let num = |i: usize| rec.get(i).and_then(|s| s.trim().parse::<f64>().ok());
        let Some(open_time) = rec.get(i_time).and_then(parse_time) else {
            warn!("row {row}: unreadable time, skipped");
            continue;
        };
        let close_time = i_close_time
            .and_then(|i| rec.get(i))
            .and_then(parse_time)
            .unwrap_or_else(|| open_time + interval.duration());
        let volume = i_volume.and_then(num).unwrap_or(0.0);

        let (Some(o), Some(h), Some(l), Some(c)) = (num(i_open), num(i_high), num(i_low), num(i_close)) else {
            warn!("row {row}: unreadable price, skipped");
            continue;
        };
        match Bar::try_new(open_time, close_time, o, h, l, c, volume) {
            Ok(bar) => out.push(bar),
            Err(e) => warn!("row {row}: {e}, skipped"),
        }
    }

    validate_sequence(&out).with_context(|| format!("bars in {} are out of order", path.display()))?;
    Ok(out)
}

/// Epoch milliseconds or seconds, RFC 3339, or `YYYY-MM-DD HH:MM:SS` (UTC).
fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        // epoch ms vs sec
        return if n > 10_i64.pow(12) {
            Utc.timestamp_millis_opt(n).single()
        } else {
            Utc.timestamp_opt(n, 0).single()
        };
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|t| t.and_utc())
}
