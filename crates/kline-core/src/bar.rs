// File: crates/kline-core/src/bar.rs
// Summary: OHLCV bar model shared by the summary engine and the rasterizer.

use chrono::{DateTime, Utc};

use crate::error::BarError;

/// One OHLCV observation for a fixed interval.
///
/// Fields are public so providers can build bars directly; `try_new` is the
/// checked constructor enforcing `low <= min(open, close) <= max(open, close) <= high`
/// and `open_time < close_time`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn try_new(
        open_time: DateTime<Utc>,
        close_time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, BarError> {
        if ![open, high, low, close, volume].iter().all(|v| v.is_finite()) {
            return Err(BarError::NonFinite);
        }
        if low > open.min(close) || high < open.max(close) {
            return Err(BarError::PriceOrder { open, high, low, close });
        }
        if open_time >= close_time {
            return Err(BarError::TimeOrder);
        }
        Ok(Self { open_time, close_time, open, high, low, close, volume })
    }

    /// Close at or above open. Drives the bullish/bearish color choice.
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// High-low range.
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Signed body, positive for up bars.
    #[inline]
    pub fn body(&self) -> f64 {
        self.close - self.open
    }
}

/// Check that `bars` is ordered by strictly increasing `open_time`.
/// Gaps between bars are allowed.
pub fn validate_sequence(bars: &[Bar]) -> Result<(), BarError> {
    for (i, pair) in bars.windows(2).enumerate() {
        if pair[1].open_time <= pair[0].open_time {
            return Err(BarError::NotIncreasing { index: i + 1 });
        }
    }
    Ok(())
}
