// File: crates/kline-core/src/summary.rs
// Summary: Indicator engine; condenses a bar sequence into a `Summary` record.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::bar::Bar;
use crate::indicators::{body_ratio, range_percent, rsi, sma_last};
use crate::types::LAST_CANDLES;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Trend {
    Bullish,
    Bearish,
    #[default]
    Sideways,
}

impl Trend {
    /// `close > ma20 > ma50` is bullish, `close < ma20 < ma50` bearish, anything else sideways.
    pub fn classify(close: f64, ma20: f64, ma50: f64) -> Self {
        if close > ma20 && ma20 > ma50 {
            Trend::Bullish
        } else if close < ma20 && ma20 < ma50 {
            Trend::Bearish
        } else {
            Trend::Sideways
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "BULLISH",
            Trend::Bearish => "BEARISH",
            Trend::Sideways => "SIDEWAYS",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Volatility {
    Low,
    Medium,
    High,
}

impl Volatility {
    /// Thresholds on the mean range as percent of price: above 3% high, above 1.5% medium.
    pub fn classify(range_pct: f64) -> Self {
        if range_pct > 3.0 {
            Volatility::High
        } else if range_pct > 1.5 {
            Volatility::Medium
        } else {
            Volatility::Low
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Volatility::Low => "LOW",
            Volatility::Medium => "MEDIUM",
            Volatility::High => "HIGH",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Momentum {
    Overbought,
    Oversold,
    Bullish,
    Bearish,
    Neutral,
}

impl Momentum {
    pub fn classify(rsi: f64) -> Self {
        if rsi > 70.0 {
            Momentum::Overbought
        } else if rsi < 30.0 {
            Momentum::Oversold
        } else if rsi > 55.0 {
            Momentum::Bullish
        } else if rsi < 45.0 {
            Momentum::Bearish
        } else {
            Momentum::Neutral
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Momentum::Overbought => "OVERBOUGHT",
            Momentum::Oversold => "OVERSOLD",
            Momentum::Bullish => "BULLISH",
            Momentum::Bearish => "BEARISH",
            Momentum::Neutral => "NEUTRAL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CandleKind {
    Bull,
    Bear,
    Doji,
}

impl CandleKind {
    /// Body ratio above 0.1 is a bull candle, below -0.1 a bear, otherwise a doji.
    pub fn classify(body_ratio: f64) -> Self {
        if body_ratio > 0.1 {
            CandleKind::Bull
        } else if body_ratio < -0.1 {
            CandleKind::Bear
        } else {
            CandleKind::Doji
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            CandleKind::Bull => "BULL",
            CandleKind::Bear => "BEAR",
            CandleKind::Doji => "DOJI",
        }
    }
}

/// Rendering-friendly projection of one of the most recent bars.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedCandle {
    /// Open time formatted as `MM-DD HH:MM`.
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Close-to-close change in percent against the preceding bar of the full sequence.
    pub change_pct: f64,
    /// `None` when the bar has zero range.
    pub kind: Option<CandleKind>,
}

/// Aggregate statistics for one bar sequence.
///
/// `Summary::default()` (with `candle_count == 0`) is the "no data" value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub candle_count: usize,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub total_volume: f64,
    pub avg_volume: f64,
    pub price_change_pct: f64,
    pub trend: Trend,
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
    pub rsi14: Option<f64>,
    pub volatility: Option<Volatility>,
    pub last_candles: Vec<TypedCandle>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.candle_count == 0
    }

    pub fn momentum(&self) -> Option<Momentum> {
        self.rsi14.map(Momentum::classify)
    }

    /// One-line digest: `Trend: X | Volatility: Y | Momentum: Z | RSI: 55.3`.
    pub fn headline(&self) -> String {
        if self.is_empty() {
            return "Insufficient data".to_string();
        }
        format!(
            "Trend: {} | Volatility: {} | Momentum: {} | RSI: {}",
            self.trend.as_str(),
            self.volatility.map_or("N/A", |v| v.as_str()),
            self.momentum().map_or("N/A", |m| m.as_str()),
            self.rsi14.map_or_else(|| "N/A".to_string(), |r| format!("{r:.1}")),
        )
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.8}"));
        writeln!(
            f,
            "Period: {} to {}",
            self.period_start.format("%Y-%m-%d %H:%M"),
            self.period_end.format("%Y-%m-%d %H:%M")
        )?;
        writeln!(f, "Candles Analyzed: {}", self.candle_count)?;
        writeln!(
            f,
            "Open: {:.8} | High: {:.8} | Low: {:.8} | Close: {:.8}",
            self.open, self.high, self.low, self.close
        )?;
        writeln!(f, "Price Change: {:.2}%", self.price_change_pct)?;
        writeln!(f, "MA20: {} | MA50: {}", fmt_opt(self.ma20), fmt_opt(self.ma50))?;
        writeln!(f, "{}", self.headline())?;
        writeln!(f, "Avg Volume: {:.2}", self.avg_volume)?;
        for c in &self.last_candles {
            writeln!(
                f,
                "  {} | {:.6} | {:.6} | {:.6} | {:.6} | {:+.2}% | {}",
                c.time,
                c.open,
                c.high,
                c.low,
                c.close,
                c.change_pct,
                c.kind.map_or("", |k| k.as_str())
            )?;
        }
        Ok(())
    }
}

/// Summarize an ordered bar sequence. Empty input yields `Summary::default()`.
pub fn summarize(bars: &[Bar]) -> Summary {
    let (first, last) = match (bars.first(), bars.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Summary::default(),
    };

    let high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let total_volume: f64 = bars.iter().map(|b| b.volume).sum();

    let open = first.open;
    let close = last.close;
    let price_change_pct = if open > 0.0 { (close - open) / open * 100.0 } else { 0.0 };

    let ma20 = sma_last(bars, 20);
    let ma50 = sma_last(bars, 50);
    // Absent averages compare as 0, like the zero sentinel they replace.
    let trend = Trend::classify(close, ma20.unwrap_or(0.0), ma50.unwrap_or(0.0));

    Summary {
        period_start: first.open_time,
        period_end: last.close_time,
        candle_count: bars.len(),
        open,
        high,
        low,
        close,
        total_volume,
        avg_volume: total_volume / bars.len() as f64,
        price_change_pct,
        trend,
        ma20,
        ma50,
        rsi14: rsi(bars),
        volatility: range_percent(bars).map(Volatility::classify),
        last_candles: last_candles(bars, LAST_CANDLES),
    }
}

/// Type the last `n` bars. The predecessor for `change_pct` is looked up in the
/// full sequence, so only the very first bar overall gets 0.
pub fn last_candles(bars: &[Bar], n: usize) -> Vec<TypedCandle> {
    let start = bars.len().saturating_sub(n);
    (start..bars.len())
        .map(|i| {
            let bar = &bars[i];
            let change_pct = match i.checked_sub(1).map(|p| bars[p].close) {
                Some(prev) if prev != 0.0 => (bar.close - prev) / prev * 100.0,
                _ => 0.0,
            };
            TypedCandle {
                time: bar.open_time.format("%m-%d %H:%M").to_string(),
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
                change_pct,
                kind: body_ratio(bar).map(CandleKind::classify),
            }
        })
        .collect()
}
