// File: crates/kline-core/src/scale.rs
// Summary: Coordinate mapping from (bar index, price, volume) to canvas pixels.

use log::debug;

use crate::bar::Bar;
use crate::levels::TradeLevels;
use crate::types::LEVEL_BUFFER;

/// Closed price interval used as the vertical data domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Lowest low to highest high; `None` for an empty slice.
    pub fn of_bars(bars: &[Bar]) -> Option<Self> {
        if bars.is_empty() {
            return None;
        }
        let (min, max) = bars
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| (lo.min(b.low), hi.max(b.high)));
        Some(Self { min, max })
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Widen the range so every active level outside it fits, with a 0.5% buffer
    /// beyond the level (below for levels under `min`, above for levels over `max`).
    ///
    /// Any level kind counts, entry included, so no overlay line is ever clipped.
    /// A long setup's stop-loss below and highest take-profit above are the usual
    /// case; short setups extend the other way.
    pub fn include_levels(self, levels: &TradeLevels) -> Self {
        let mut out = self;
        for (kind, price) in levels.active() {
            if price < self.min {
                out.min = out.min.min(price * (1.0 - LEVEL_BUFFER));
                debug!("{} {price} extends price floor to {}", kind.label(), out.min);
            } else if price > self.max {
                out.max = out.max.max(price * (1.0 + LEVEL_BUFFER));
                debug!("{} {price} extends price ceiling to {}", kind.label(), out.max);
            }
        }
        out
    }

    /// Pad both sides by `fraction` of the span. A flat range is first opened
    /// around its midpoint so the mapping never divides by zero.
    pub fn padded(self, fraction: f64) -> Self {
        let mut r = self;
        if r.span() <= f64::EPSILON * r.max.abs().max(1.0) {
            let mid = (r.min + r.max) * 0.5;
            let half = (mid.abs() * 0.005).max(1e-8);
            r = Self { min: mid - half, max: mid + half };
        }
        let pad = r.span() * fraction;
        Self { min: r.min - pad, max: r.max + pad }
    }
}

/// Vertical price scale: `max` maps to `top`, `min` maps to `bottom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceScale {
    pub top: i32,
    pub bottom: i32,
    pub range: PriceRange,
}

impl PriceScale {
    pub fn new(top: i32, bottom: i32, range: PriceRange) -> Self {
        Self { top, bottom, range }
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Pixel row for `price`. Higher prices get smaller rows.
    #[inline]
    pub fn to_px(&self, price: f64) -> i32 {
        let frac = (self.range.max - price) / self.range.span();
        self.top + (frac * self.height() as f64).round() as i32
    }

    /// Price at the given pixel row (inverse of `to_px` up to rounding).
    #[inline]
    pub fn from_px(&self, py: i32) -> f64 {
        let frac = (py - self.top) as f64 / self.height().max(1) as f64;
        self.range.max - frac * self.range.span()
    }
}

/// Horizontal slot layout: one fixed-width slot per bar, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotScale {
    pub left: i32,
    pub candle_width: i32,
    pub candle_gap: i32,
}

impl SlotScale {
    pub fn new(left: i32, candle_width: i32, candle_gap: i32) -> Self {
        Self { left, candle_width, candle_gap }
    }

    #[inline]
    pub fn slot(&self) -> i32 {
        self.candle_width + self.candle_gap
    }

    /// Left edge of the candle body at `index`.
    #[inline]
    pub fn to_px(&self, index: usize) -> i32 {
        self.left + index as i32 * self.slot() + self.candle_gap / 2
    }

    /// Wick column of the candle at `index`.
    #[inline]
    pub fn center_px(&self, index: usize) -> i32 {
        self.to_px(index) + self.candle_width / 2
    }

    /// How many slots fit into `width` pixels.
    pub fn capacity(&self, width: i32) -> usize {
        if self.slot() <= 0 || width <= 0 {
            return 0;
        }
        (width / self.slot()) as usize
    }
}

/// Volume strip scale: zero at `bottom`, `max_volume` at `top`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeScale {
    pub top: i32,
    pub bottom: i32,
    pub max_volume: f64,
}

impl VolumeScale {
    /// Top row of a volume bar; equals `bottom` for zero volume.
    pub fn to_px(&self, volume: f64) -> i32 {
        if self.max_volume <= 0.0 {
            return self.bottom;
        }
        let h = (volume / self.max_volume * (self.bottom - self.top) as f64) as i32;
        self.bottom - h
    }
}
