// File: crates/kline-core/src/grid.rs
// Summary: Grid row and axis tick layout helpers.

/// `steps` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Pixel rows splitting `[top, bottom]` into `divisions` bands, top row first.
/// Uses an integer step, so the last row may sit a few pixels above `bottom`.
pub fn grid_rows(top: i32, bottom: i32, divisions: i32) -> Vec<i32> {
    if divisions <= 0 { return vec![top]; }
    let step = (bottom - top) / divisions;
    (0..=divisions).map(|i| top + i * step).collect()
}
