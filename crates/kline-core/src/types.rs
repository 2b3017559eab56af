// File: crates/kline-core/src/types.rs
// Summary: Shared constants (canvas defaults, layout ratios, text metrics).

/// Default canvas width in pixels.
pub const WIDTH: u32 = 1200;
/// Default canvas height in pixels.
pub const HEIGHT: u32 = 600;
/// Canvas width used when trade levels are overlaid.
pub const LEVELS_WIDTH: u32 = 1400;
/// Canvas height used when trade levels are overlaid.
pub const LEVELS_HEIGHT: u32 = 700;

/// Margin around the plot area, in pixels.
pub const PADDING: u32 = 60;
pub const CANDLE_WIDTH: u32 = 4;
pub const CANDLE_GAP: u32 = 2;

/// Extra right margin reserved for level labels.
pub const LEVEL_LABEL_MARGIN: i32 = 80;
/// Gap between the price region and the volume strip.
pub const VOLUME_GAP: i32 = 10;
/// Share of the canvas (minus bottom padding) given to prices when volume is shown.
pub const PRICE_REGION_FRACTION: f64 = 0.75;

/// Number of bands the price region is split into by grid rows and axis labels.
pub const GRID_DIVISIONS: i32 = 5;
/// Dashed lines light every n-th pixel.
pub const DASH_STEP: usize = 3;

/// Baseline of the header row (title, price, timestamp).
pub const HEADER_BASELINE: i32 = 20;

/// Padding applied on each side of the price range.
pub const RANGE_PADDING: f64 = 0.05;
/// Buffer applied to overlay levels that fall outside the candle range.
pub const LEVEL_BUFFER: f64 = 0.005;

/// The MA overlay needs strictly more visible bars than this.
pub const MA_MIN_BARS: usize = 50;

/// Bars projected into `Summary::last_candles`.
pub const LAST_CANDLES: usize = 10;
