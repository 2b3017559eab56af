// File: crates/kline-core/src/error.rs
// Summary: Error types for bar validation and chart rendering.

use thiserror::Error;

/// Why a bar (or a sequence of bars) was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BarError {
    #[error("bar prices must be finite")]
    NonFinite,
    #[error("low {low} / high {high} do not bracket open {open} and close {close}")]
    PriceOrder { open: f64, high: f64, low: f64, close: f64 },
    #[error("open time must be before close time")]
    TimeOrder,
    #[error("bar {index} does not open after its predecessor")]
    NotIncreasing { index: usize },
}

/// Failures of a single render call. Nothing is partially produced.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no candle data to render")]
    EmptyInput,
    #[error("canvas {width}x{height} leaves no room for the plot")]
    CanvasTooSmall { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}
