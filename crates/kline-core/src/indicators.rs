// File: crates/kline-core/src/indicators.rs
// Summary: Fixed-period indicator helpers (SMA, RSI, range volatility, candle typing).
// Notes:
// - Plain trailing windows; no smoothing.
// - Insufficient history yields `None` rather than an error.

use crate::bar::Bar;

pub const RSI_PERIOD: usize = 14;
pub const VOLATILITY_PERIOD: usize = 14;

/// Trailing simple mean of the last `period` closes.
pub fn sma_last(bars: &[Bar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period {
        return None;
    }
    let sum: f64 = bars[bars.len() - period..].iter().map(|b| b.close).sum();
    Some(sum / period as f64)
}

/// Trailing SMA of closes evaluated at every index; `None` until `period` bars exist.
pub fn sma_series(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; bars.len()];
    if period == 0 || bars.len() < period {
        return out;
    }
    let p = period as f64;
    let mut sum = 0.0f64;
    for (i, bar) in bars.iter().enumerate() {
        sum += bar.close;
        if i >= period {
            sum -= bars[i - period].close;
        }
        if i + 1 >= period {
            out[i] = Some(sum / p);
        }
    }
    out
}

/// RSI over the last 14 close-to-close deltas. Needs 15 bars.
///
/// All-gain windows (no losses) pin to 100.
pub fn rsi(bars: &[Bar]) -> Option<f64> {
    if bars.len() < RSI_PERIOD + 1 {
        return None;
    }
    let window = &bars[bars.len() - RSI_PERIOD - 1..];
    let (gains, losses) = window.windows(2).fold((0.0f64, 0.0f64), |(g, l), pair| {
        let change = pair[1].close - pair[0].close;
        if change > 0.0 {
            (g + change, l)
        } else {
            (g, l - change)
        }
    });
    let avg_gain = gains / RSI_PERIOD as f64;
    let avg_loss = losses / RSI_PERIOD as f64;
    if avg_loss > 0.0 {
        let rs = avg_gain / avg_loss;
        Some(100.0 - 100.0 / (1.0 + rs))
    } else {
        Some(100.0)
    }
}

/// Mean high-low range of the last 14 bars as a percent of the last close.
pub fn range_percent(bars: &[Bar]) -> Option<f64> {
    if bars.len() < VOLATILITY_PERIOD {
        return None;
    }
    let window = &bars[bars.len() - VOLATILITY_PERIOD..];
    let atr = window.iter().map(Bar::range).sum::<f64>() / VOLATILITY_PERIOD as f64;
    let close = bars[bars.len() - 1].close;
    if close == 0.0 {
        return None;
    }
    Some(atr / close * 100.0)
}

/// Body-to-range ratio in [-1, 1]; `None` for a zero-range bar.
pub fn body_ratio(bar: &Bar) -> Option<f64> {
    let range = bar.range();
    if range > 0.0 {
        Some(bar.body() / range)
    } else {
        None
    }
}
