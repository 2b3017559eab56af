// File: crates/kline-core/src/lib.rs
// Summary: Core library entry point; OHLCV summaries and candlestick chart rendering.

pub mod bar;
pub mod canvas;
pub mod chart;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod indicators;
pub mod interval;
pub mod levels;
pub mod scale;
pub mod summary;
pub mod text;
pub mod theme;
pub mod timeframes;
pub mod types;

pub use bar::{validate_sequence, Bar};
pub use chart::{format_price, CandleChart, ChartConfig, ChartLayout, Frame, RenderedChart};
pub use error::{BarError, ChartError};
pub use interval::{Interval, TradingMode};
pub use levels::{LevelKind, TradeLevels};
pub use scale::{PriceRange, PriceScale, SlotScale};
pub use summary::{summarize, CandleKind, Summary, Trend, TypedCandle, Volatility};
pub use theme::Theme;
pub use timeframes::{chart_timeframes, summarize_timeframes, BarSource, TimeframeSummary};
