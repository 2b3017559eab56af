// File: crates/kline-core/src/interval.rs
// Summary: Bar intervals and the trading modes that pick which intervals to analyze.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interval {
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
    W1,
}

impl Interval {
    pub const ALL: [Interval; 8] = [
        Interval::M1,
        Interval::M5,
        Interval::M15,
        Interval::M30,
        Interval::H1,
        Interval::H4,
        Interval::D1,
        Interval::W1,
    ];

    /// Short exchange-style label, e.g. `"4h"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Interval::M1 => "1m",
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::M30 => "30m",
            Interval::H1 => "1h",
            Interval::H4 => "4h",
            Interval::D1 => "1d",
            Interval::W1 => "1w",
        }
    }

    /// Human-readable label used in chart titles, e.g. `"4 Hours"`.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Interval::M1 => "1 Minute",
            Interval::M5 => "5 Minutes",
            Interval::M15 => "15 Minutes",
            Interval::M30 => "30 Minutes",
            Interval::H1 => "1 Hour",
            Interval::H4 => "4 Hours",
            Interval::D1 => "1 Day",
            Interval::W1 => "1 Week",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Interval::M1 => Duration::minutes(1),
            Interval::M5 => Duration::minutes(5),
            Interval::M15 => Duration::minutes(15),
            Interval::M30 => Duration::minutes(30),
            Interval::H1 => Duration::hours(1),
            Interval::H4 => Duration::hours(4),
            Interval::D1 => Duration::days(1),
            Interval::W1 => Duration::weeks(1),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Interval {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Interval::ALL
            .iter()
            .copied()
            .find(|i| i.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLabelError { kind: "interval", value: s.to_string() })
    }
}

/// Trading style; decides the top-down set of timeframes to look at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TradingMode {
    Scalping,
    Swing,
    Intraday,
}

impl TradingMode {
    /// Timeframes from smallest to largest. Scalping skips the weekly.
    pub fn timeframes(&self) -> &'static [Interval] {
        const SCALPING: [Interval; 5] =
            [Interval::M5, Interval::M15, Interval::H1, Interval::H4, Interval::D1];
        const FULL: [Interval; 6] =
            [Interval::M5, Interval::M15, Interval::H1, Interval::H4, Interval::D1, Interval::W1];
        match self {
            TradingMode::Scalping => &SCALPING,
            TradingMode::Swing | TradingMode::Intraday => &FULL,
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            TradingMode::Scalping => "SCALPING",
            TradingMode::Swing => "SWING",
            TradingMode::Intraday => "INTRADAY",
        }
    }
}

impl FromStr for TradingMode {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalping" => Ok(TradingMode::Scalping),
            "swing" => Ok(TradingMode::Swing),
            "intraday" => Ok(TradingMode::Intraday),
            other => Err(ParseLabelError { kind: "trading mode", value: other.to_string() }),
        }
    }
}
