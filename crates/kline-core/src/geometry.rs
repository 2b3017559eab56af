// File: crates/kline-core/src/geometry.rs
// Summary: Integer rectangles for canvas layout.

/// Pixel rectangle; `right`/`bottom` are the far edges of the region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
    pub const fn is_empty(&self) -> bool { self.width() <= 0 || self.height() <= 0 }
}
