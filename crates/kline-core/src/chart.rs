// File: crates/kline-core/src/chart.rs
// Summary: Candlestick chart rasterizer; bars (+ optional trade levels) to PNG bytes.

use std::ops::Range;

use chrono::{DateTime, Utc};
use log::debug;

use crate::bar::Bar;
use crate::canvas::Canvas;
use crate::error::ChartError;
use crate::geometry::RectI32;
use crate::grid::{grid_rows, linspace};
use crate::indicators::sma_series;
use crate::interval::Interval;
use crate::levels::{LevelKind, TradeLevels};
use crate::scale::{PriceRange, PriceScale, SlotScale, VolumeScale};
use crate::text::ADVANCE;
use crate::theme::Theme;
use crate::types::*;

/// Rendering options. `Default` gives a 1200x600 dark chart with volume and MA20/MA50.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub candle_width: u32,
    pub candle_gap: u32,
    pub show_volume: bool,
    pub show_ma: bool,
    pub ma_periods: Vec<usize>,
    pub dark_mode: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            padding: PADDING,
            candle_width: CANDLE_WIDTH,
            candle_gap: CANDLE_GAP,
            show_volume: true,
            show_ma: true,
            ma_periods: vec![20, 50],
            dark_mode: true,
        }
    }
}

impl ChartConfig {
    /// Larger canvas used for charts carrying trade levels.
    pub fn for_levels() -> Self {
        Self { width: LEVELS_WIDTH, height: LEVELS_HEIGHT, ..Self::default() }
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    /// Configured MA periods, ascending, de-duplicated, zero dropped, at most one per theme color.
    pub fn ma_periods(&self) -> Vec<usize> {
        let mut periods: Vec<usize> = self.ma_periods.iter().copied().filter(|p| *p > 0).collect();
        periods.sort_unstable();
        periods.dedup();
        periods.truncate(Theme::dark().ma.len());
        periods
    }
}

/// Encoded chart plus what was actually drawn.
#[derive(Clone, Debug)]
pub struct RenderedChart {
    pub png: Vec<u8>,
    pub interval: Interval,
    /// The visible (right-aligned) window of the input bars.
    pub bars: Vec<Bar>,
}

/// Pixel geometry of one render.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartLayout {
    /// Price region; candles, grid and level lines live here.
    pub plot: RectI32,
    pub prices: PriceScale,
    pub slots: SlotScale,
    pub volumes: Option<VolumeScale>,
    /// Indices of the input bars that are drawn.
    pub window: Range<usize>,
}

/// Un-encoded render result.
pub struct Frame {
    pub canvas: Canvas,
    pub layout: ChartLayout,
}

/// Right-aligned window of at most `capacity` items out of `len`.
pub fn visible_window(len: usize, capacity: usize) -> Range<usize> {
    len.saturating_sub(capacity)..len
}

/// Price label precision: >=1000 two decimals, >=1 four, >=0.01 six, else eight.
pub fn format_price(price: f64) -> String {
    if price >= 1000.0 {
        format!("{price:.2}")
    } else if price >= 1.0 {
        format!("{price:.4}")
    } else if price >= 0.01 {
        format!("{price:.6}")
    } else {
        format!("{price:.8}")
    }
}

/// A chart request: which bars, for which symbol/interval, with which overlays.
pub struct CandleChart<'a> {
    pub symbol: &'a str,
    pub interval: Interval,
    pub bars: &'a [Bar],
    pub levels: Option<TradeLevels>,
}

impl<'a> CandleChart<'a> {
    pub fn new(symbol: &'a str, interval: Interval, bars: &'a [Bar]) -> Self {
        Self { symbol, interval, bars, levels: None }
    }

    pub fn with_levels(mut self, levels: TradeLevels) -> Self {
        self.levels = Some(levels);
        self
    }

    fn active_levels(&self) -> Option<&TradeLevels> {
        self.levels.as_ref().filter(|l| !l.is_empty())
    }

    /// Compute the coordinate mapping for `cfg` without drawing anything.
    pub fn layout(&self, cfg: &ChartConfig) -> Result<ChartLayout, ChartError> {
        if self.bars.is_empty() {
            return Err(ChartError::EmptyInput);
        }
        let too_small = || ChartError::CanvasTooSmall { width: cfg.width, height: cfg.height };

        let w = cfg.width as i32;
        let h = cfg.height as i32;
        let pad = cfg.padding as i32;
        let label_margin = if self.active_levels().is_some() { LEVEL_LABEL_MARGIN } else { 0 };

        let bottom = if cfg.show_volume {
            ((h - pad) as f64 * PRICE_REGION_FRACTION) as i32
        } else {
            h - pad
        };
        let plot = RectI32::from_ltrb(pad, pad, w - pad - label_margin, bottom);
        if plot.is_empty() {
            return Err(too_small());
        }

        let slots = SlotScale::new(plot.left, cfg.candle_width as i32, cfg.candle_gap as i32);
        let capacity = slots.capacity(plot.width());
        if capacity == 0 {
            return Err(too_small());
        }
        // Price and volume domains span the full input; windowing only picks what is drawn.
        let mut range = PriceRange::of_bars(self.bars).ok_or(ChartError::EmptyInput)?;
        if let Some(levels) = self.active_levels() {
            range = range.include_levels(levels);
        }
        let prices = PriceScale::new(plot.top, plot.bottom, range.padded(RANGE_PADDING));

        let volumes = if cfg.show_volume {
            let top = plot.bottom + VOLUME_GAP;
            let bottom = h - pad;
            let max_volume = self.bars.iter().map(|b| b.volume).fold(0.0, f64::max);
            (bottom > top).then_some(VolumeScale { top, bottom, max_volume })
        } else {
            None
        };

        let window = visible_window(self.bars.len(), capacity);
        if window.start > 0 {
            debug!(
                "{} {}: keeping last {} of {} bars",
                self.symbol,
                self.interval,
                window.len(),
                self.bars.len()
            );
        }

        Ok(ChartLayout { plot, prices, slots, volumes, window })
    }

    /// Draw the chart into a fresh pixel buffer, stamping `now` in the header.
    pub fn rasterize(&self, cfg: &ChartConfig, now: DateTime<Utc>) -> Result<Frame, ChartError> {
        let layout = self.layout(cfg)?;
        let theme = Theme::for_mode(cfg.dark_mode);
        let mut canvas = Canvas::new(cfg.width, cfg.height, theme.background);
        let visible = &self.bars[layout.window.clone()];
        let plot = layout.plot;

        for y in grid_rows(plot.top, plot.bottom, GRID_DIVISIONS) {
            canvas.dashed_hline(plot.left, plot.right, y, DASH_STEP, theme.grid);
        }

        draw_candles(&mut canvas, &layout, visible, cfg.candle_width as i32, &theme);

        let ma_drawn = if cfg.show_ma { draw_moving_averages(&mut canvas, &layout, visible, cfg, &theme) } else { Vec::new() };

        if let Some(levels) = self.active_levels() {
            draw_levels(&mut canvas, &layout, levels, &theme);
        }

        draw_price_axis(&mut canvas, &layout, &theme);
        self.draw_header(&mut canvas, &layout, visible, now, &theme);

        if self.active_levels().is_some() {
            let baseline = cfg.height as i32 - cfg.padding as i32 + 24;
            draw_legend(&mut canvas, plot.left, baseline, &ma_drawn, &theme);
        }

        Ok(Frame { canvas, layout })
    }

    /// Render and PNG-encode with an explicit header timestamp. Deterministic.
    pub fn render_at(&self, cfg: &ChartConfig, now: DateTime<Utc>) -> Result<RenderedChart, ChartError> {
        let frame = self.rasterize(cfg, now)?;
        let png = frame.canvas.encode_png()?;
        let bars = self.bars[frame.layout.window.clone()].to_vec();
        debug!(
            "rendered {} {} chart: {}x{}, {} candles, {} bytes",
            self.symbol,
            self.interval,
            cfg.width,
            cfg.height,
            bars.len(),
            png.len()
        );
        Ok(RenderedChart { png, interval: self.interval, bars })
    }

    /// Render stamped with the current time.
    pub fn render(&self, cfg: &ChartConfig) -> Result<RenderedChart, ChartError> {
        self.render_at(cfg, Utc::now())
    }

    fn draw_header(
        &self,
        canvas: &mut Canvas,
        layout: &ChartLayout,
        visible: &[Bar],
        now: DateTime<Utc>,
        theme: &Theme,
    ) {
        let left = layout.plot.left;
        let mut title = format!("{} - {}", self.symbol, self.interval.display_name());
        if self.active_levels().is_some() {
            title.push_str(" | ENTRY CHART");
        }
        canvas.text(left, HEADER_BASELINE, &title, theme.text);

        if let Some(last) = visible.last() {
            let x = left + (canvas.measure_text(&title) + 4 * ADVANCE).max(200);
            let label = format!("Price: {}", format_price(last.close));
            canvas.text(x, HEADER_BASELINE, &label, theme.candle(last.is_bullish()));
        }

        let stamp = now.format("%Y-%m-%d %H:%M UTC").to_string();
        canvas.text(layout.plot.right - 150, HEADER_BASELINE, &stamp, theme.text);
    }
}

fn draw_candles(canvas: &mut Canvas, layout: &ChartLayout, visible: &[Bar], candle_width: i32, theme: &Theme) {
    let prices = &layout.prices;
    for (i, bar) in visible.iter().enumerate() {
        let x = layout.slots.to_px(i);
        let color = theme.candle(bar.is_bullish());

        canvas.vline(layout.slots.center_px(i), prices.to_px(bar.high), prices.to_px(bar.low), color);

        let open_y = prices.to_px(bar.open);
        let close_y = prices.to_px(bar.close);
        let top = open_y.min(close_y);
        let bottom = open_y.max(close_y).max(top + 1);
        canvas.fill_rect(x, top, x + candle_width, bottom, color);

        if let Some(vol) = layout.volumes.filter(|v| v.max_volume > 0.0) {
            canvas.fill_rect(x, vol.to_px(bar.volume), x + candle_width, vol.bottom, theme.volume(bar.is_bullish()));
        }
    }
}

/// Draws one polyline per configured period once the window holds more than
/// `MA_MIN_BARS` bars; returns the periods actually drawn.
fn draw_moving_averages(
    canvas: &mut Canvas,
    layout: &ChartLayout,
    visible: &[Bar],
    cfg: &ChartConfig,
    theme: &Theme,
) -> Vec<usize> {
    if visible.len() <= MA_MIN_BARS {
        debug!("skipping MA overlay: {} bars, need more than {MA_MIN_BARS}", visible.len());
        return Vec::new();
    }
    // Periods longer than the window produce no points and stay out of the legend.
    let periods: Vec<usize> = cfg.ma_periods().into_iter().filter(|&p| p <= visible.len()).collect();
    for (k, &period) in periods.iter().enumerate() {
        let color = theme.ma_color(k);
        let mut prev: Option<(i32, i32)> = None;
        for (i, value) in sma_series(visible, period).into_iter().enumerate() {
            let Some(value) = value else { continue };
            let point = (layout.slots.center_px(i), layout.prices.to_px(value));
            if let Some((px, py)) = prev {
                canvas.line(px, py, point.0, point.1, color);
            }
            prev = Some(point);
        }
    }
    periods
}

fn draw_levels(canvas: &mut Canvas, layout: &ChartLayout, levels: &TradeLevels, theme: &Theme) {
    let plot = layout.plot;
    for (kind, price) in levels.active() {
        let y = layout.prices.to_px(price);
        let color = theme.level(kind);
        // Two pixels thick; stop-loss dashed.
        let step = if kind == LevelKind::StopLoss { DASH_STEP } else { 1 };
        for row in [y - 1, y] {
            canvas.dashed_hline(plot.left, plot.right, row, step, color);
        }
        let label = format!("{} {}", kind.label(), format_price(price));
        canvas.text(plot.right + 5, y + 4, &label, color);
    }
}

fn draw_price_axis(canvas: &mut Canvas, layout: &ChartLayout, theme: &Theme) {
    let plot = layout.plot;
    let range = layout.prices.range;
    let rows = grid_rows(plot.top, plot.bottom, GRID_DIVISIONS);
    let labels = linspace(range.max, range.min, rows.len());
    for (y, price) in rows.into_iter().zip(labels) {
        canvas.text(plot.right + 5, y + 4, &format_price(price), theme.text);
    }
}

fn draw_legend(canvas: &mut Canvas, left: i32, baseline: i32, ma_periods: &[usize], theme: &Theme) {
    let mut items = vec![
        ("ENTRY".to_string(), theme.entry),
        ("SL".to_string(), theme.stop_loss),
        ("TP".to_string(), theme.take_profit),
    ];
    items.extend(ma_periods.iter().enumerate().map(|(k, p)| (format!("MA{p}"), theme.ma_color(k))));

    let mut x = left;
    for (label, color) in items {
        canvas.text(x, baseline, &label, color);
        x += canvas.measure_text(&label) + 3 * ADVANCE;
    }
}
