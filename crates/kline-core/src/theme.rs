// File: crates/kline-core/src/theme.rs
// Summary: Light/Dark palettes for chart rendering.

use image::Rgba;

use crate::levels::LevelKind;

const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub background: Rgba<u8>,
    pub grid: Rgba<u8>,
    pub text: Rgba<u8>,
    pub candle_up: Rgba<u8>,
    pub candle_down: Rgba<u8>,
    /// Translucent; blended over the background.
    pub volume_up: Rgba<u8>,
    pub volume_down: Rgba<u8>,
    /// Moving-average line colors, in period order.
    pub ma: [Rgba<u8>; 4],
    pub entry: Rgba<u8>,
    pub stop_loss: Rgba<u8>,
    pub take_profit: Rgba<u8>,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: rgba(21, 25, 31, 255),
            grid: rgba(42, 46, 57, 255),
            text: rgba(180, 180, 180, 255),
            candle_up: rgba(38, 166, 91, 255),
            candle_down: rgba(231, 76, 60, 255),
            volume_up: rgba(38, 166, 91, 128),
            volume_down: rgba(231, 76, 60, 128),
            ma: [
                rgba(255, 193, 7, 255),  // yellow
                rgba(156, 39, 176, 255), // purple
                rgba(0, 188, 212, 255),  // cyan
                rgba(255, 112, 67, 255), // orange
            ],
            entry: rgba(33, 150, 243, 255),
            stop_loss: rgba(244, 67, 54, 255),
            take_profit: rgba(76, 175, 80, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            background: rgba(255, 255, 255, 255),
            grid: rgba(230, 230, 230, 255),
            text: rgba(60, 60, 60, 255),
            ..Self::dark()
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::dark() } else { Self::light() }
    }

    #[inline]
    pub fn candle(&self, bullish: bool) -> Rgba<u8> {
        if bullish { self.candle_up } else { self.candle_down }
    }

    #[inline]
    pub fn volume(&self, bullish: bool) -> Rgba<u8> {
        if bullish { self.volume_up } else { self.volume_down }
    }

    /// Color of the `i`-th moving average line; cycles past the palette length.
    pub fn ma_color(&self, i: usize) -> Rgba<u8> {
        self.ma[i % self.ma.len()]
    }

    pub fn level(&self, kind: LevelKind) -> Rgba<u8> {
        match kind {
            LevelKind::Entry => self.entry,
            LevelKind::StopLoss => self.stop_loss,
            _ => self.take_profit,
        }
    }
}
