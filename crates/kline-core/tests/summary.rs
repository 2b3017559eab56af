// File: crates/kline-core/tests/summary.rs
// Purpose: Indicator engine behavior: sentinels, trend, RSI, volatility, candle typing.

mod common;

use common::{bar, falling, from_closes, rising};
use kline_core::summary::{last_candles, Momentum};
use kline_core::{summarize, CandleKind, Trend, Volatility};

#[test]
fn empty_input_yields_zero_sentinel() {
    let s = summarize(&[]);
    assert_eq!(s.candle_count, 0);
    assert!(s.is_empty());
    assert!(s.last_candles.is_empty());
    assert_eq!(s.ma20, None);
    assert_eq!(s.headline(), "Insufficient data");
}

#[test]
fn rising_series_is_bullish() {
    let bars = rising(60);
    let s = summarize(&bars);

    assert_eq!(s.candle_count, 60);
    assert_eq!(s.open, 100.0);
    assert_eq!(s.close, 160.0);
    assert_eq!(s.high, 160.5);
    assert_eq!(s.low, 99.5);
    assert!((s.price_change_pct - 60.0).abs() < 1e-9);
    assert!((s.total_volume - 2370.0).abs() < 1e-9);
    assert!((s.avg_volume - 39.5).abs() < 1e-9);
    assert_eq!(s.period_start, bars[0].open_time);
    assert_eq!(s.period_end, bars[59].close_time);

    let ma20 = s.ma20.expect("ma20 with 60 bars");
    let ma50 = s.ma50.expect("ma50 with 60 bars");
    assert!((ma20 - 150.5).abs() < 1e-9);
    assert!((ma50 - 135.5).abs() < 1e-9);
    assert_eq!(s.trend, Trend::Bullish);
    assert_eq!(s.rsi14, Some(100.0));
}

#[test]
fn falling_series_is_bearish() {
    let s = summarize(&falling(60));
    assert_eq!(s.trend, Trend::Bearish);
    assert_eq!(s.rsi14, Some(0.0));
    assert!(s.price_change_pct < 0.0);
}

#[test]
fn short_history_leaves_indicators_absent() {
    let s = summarize(&rising(10));
    assert_eq!(s.candle_count, 10);
    assert_eq!(s.ma20, None);
    assert_eq!(s.ma50, None);
    assert_eq!(s.rsi14, None);
    assert_eq!(s.volatility, None);
    assert_eq!(s.trend, Trend::Sideways);
    assert_eq!(s.momentum(), None);
}

#[test]
fn absent_ma50_compares_as_zero() {
    // 30 bars: ma20 exists, ma50 does not; close > ma20 > 0 still reads as bullish.
    let s = summarize(&rising(30));
    assert!(s.ma20.is_some());
    assert_eq!(s.ma50, None);
    assert_eq!(s.trend, Trend::Bullish);

    let s = summarize(&falling(30));
    assert_eq!(s.trend, Trend::Sideways);
}

#[test]
fn rsi_pins_to_100_when_there_are_no_losses() {
    // 15 bars = 14 close-to-close deltas, all positive.
    let s = summarize(&rising(15));
    assert_eq!(s.rsi14, Some(100.0));
    assert_eq!(s.momentum(), Some(Momentum::Overbought));

    assert_eq!(summarize(&rising(14)).rsi14, None);
}

#[test]
fn rsi_matches_gain_loss_ratio() {
    let mut closes = vec![100.0];
    for _ in 0..7 {
        closes.push(closes.last().unwrap() + 2.0);
    }
    for _ in 0..7 {
        closes.push(closes.last().unwrap() - 1.0);
    }
    let rsi = summarize(&from_closes(&closes)).rsi14.expect("15 bars");
    assert!((rsi - 200.0 / 3.0).abs() < 1e-9, "rsi = {rsi}");
}

#[test]
fn rsi_stays_within_bounds() {
    let patterns: [&[f64]; 3] = [
        &[10.0, 12.0, 9.0, 15.0, 14.0, 3.0, 30.0, 29.0, 31.0, 2.0, 50.0, 49.5, 49.0, 60.0, 1.0, 1.5],
        &[5.0; 20],
        &[100.0, 99.0, 98.0, 97.0, 96.0, 95.0, 94.0, 93.0, 92.0, 91.0, 90.0, 89.0, 88.0, 87.0, 86.0, 200.0],
    ];
    for closes in patterns {
        let rsi = summarize(&from_closes(closes)).rsi14.expect("enough bars");
        assert!((0.0..=100.0).contains(&rsi), "rsi out of range: {rsi}");
    }
}

fn ranged(range: f64, n: usize) -> Vec<kline_core::Bar> {
    (0..n).map(|i| bar(i, 100.0, 100.0 + range / 2.0, 100.0 - range / 2.0, 100.0, 1.0)).collect()
}

#[test]
fn volatility_thresholds() {
    assert_eq!(summarize(&ranged(4.0, 14)).volatility, Some(Volatility::High));
    assert_eq!(summarize(&ranged(2.0, 14)).volatility, Some(Volatility::Medium));
    assert_eq!(summarize(&ranged(1.0, 14)).volatility, Some(Volatility::Low));
    assert_eq!(summarize(&ranged(4.0, 13)).volatility, None);
}

#[test]
fn last_candles_use_full_sequence_for_first_change() {
    let bars = rising(25);
    let candles = last_candles(&bars, 10);
    assert_eq!(candles.len(), 10);
    assert_eq!(candles[0].time, "01-01 15:00");
    assert_eq!(candles[0].close, 116.0);
    assert!((candles[0].change_pct - (1.0 / 115.0 * 100.0)).abs() < 1e-9);

    let s = summarize(&rising(5));
    assert_eq!(s.last_candles.len(), 5);
    assert_eq!(s.last_candles[0].change_pct, 0.0);
    assert!(s.last_candles[1].change_pct > 0.0);
}

#[test]
fn candle_kinds_follow_body_ratio() {
    let bars = vec![
        bar(0, 100.0, 110.0, 90.0, 105.0, 1.0),
        bar(1, 105.0, 110.0, 90.0, 100.0, 1.0),
        bar(2, 100.0, 101.0, 99.0, 100.0, 1.0),
        bar(3, 100.0, 100.0, 100.0, 100.0, 1.0),
    ];
    let kinds: Vec<_> = summarize(&bars).last_candles.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![Some(CandleKind::Bull), Some(CandleKind::Bear), Some(CandleKind::Doji), None]
    );
}

#[test]
fn zero_open_reports_no_price_change() {
    let bars = vec![bar(0, 0.0, 2.0, 0.0, 1.0, 1.0)];
    assert_eq!(summarize(&bars).price_change_pct, 0.0);
}

#[test]
fn headline_and_report_text() {
    let s = summarize(&rising(60));
    assert_eq!(
        s.headline(),
        "Trend: BULLISH | Volatility: LOW | Momentum: OVERBOUGHT | RSI: 100.0"
    );
    let report = s.to_string();
    assert!(report.contains("Candles Analyzed: 60"));
    assert!(report.contains("Price Change: 60.00%"));
    assert_eq!(report.lines().filter(|l| l.starts_with("  ")).count(), 10);
}
