// File: crates/kline-core/tests/common/mod.rs
// Purpose: Bar fixtures shared by the integration tests.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use kline_core::Bar;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Hourly bar `i` after `t0`.
pub fn bar(i: usize, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Bar {
    let open_time = t0() + Duration::hours(i as i64);
    Bar::try_new(open_time, open_time + Duration::hours(1), open, high, low, close, volume)
        .expect("valid fixture bar")
}

/// Open = previous close, +1 per bar, starting at 100.
pub fn rising(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let open = 100.0 + i as f64;
            let close = open + 1.0;
            bar(i, open, close + 0.5, open - 0.5, close, 10.0 + i as f64)
        })
        .collect()
}

/// Open = previous close, -1 per bar, starting at 200.
pub fn falling(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let open = 200.0 - i as f64;
            let close = open - 1.0;
            bar(i, open, open + 0.5, close - 0.5, close, 10.0 + i as f64)
        })
        .collect()
}

/// Bars closing at the given prices, each opening at the previous close.
pub fn from_closes(closes: &[f64]) -> Vec<Bar> {
    let mut prev = closes.first().copied().unwrap_or(100.0);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = prev;
            prev = close;
            bar(i, open, open.max(close) + 0.1, open.min(close) - 0.1, close, 100.0)
        })
        .collect()
}
