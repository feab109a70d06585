//! Bilinear resampling and linear blend helpers
//!
//! Resampling maps a full-resolution pixel onto a coarse grid through
//! floor/fraction decomposition. The "next" sample index is clamped to the
//! last valid grid index, so the far edge repeats instead of reading past it.

use ndarray::Array2;
use num_traits::Float;

/// Linear blend `(1 - t) * from + t * to`
///
/// The weight is not clamped; masks outside `[0, 1]` extrapolate.
pub fn lerp<T: Float>(from: T, to: T, t: T) -> T {
    (T::one() - t) * from + t * to
}

/// Clamp a value into `[0, 1]`
pub fn clamp_unit<T: Float>(value: T) -> T {
    num_traits::clamp(value, T::zero(), T::one())
}

/// Sample a coarse grid (indexed `[y, x]`) at a non-negative fractional position
///
/// Returns `0.0` for an empty grid.
pub fn bilinear(grid: &Array2<f64>, fx: f64, fy: f64) -> f64 {
    let (rows, cols) = grid.dim();
    if rows == 0 || cols == 0 {
        return 0.0;
    }

    let lx = (fx.floor() as usize).min(cols - 1);
    let ly = (fy.floor() as usize).min(rows - 1);
    let dx = fx - lx as f64;
    let dy = fy - ly as f64;
    let nx = if lx + 1 < cols { lx + 1 } else { lx };
    let ny = if ly + 1 < rows { ly + 1 } else { ly };

    let sample = |x: usize, y: usize| grid.get([y, x]).copied().unwrap_or(0.0);
    let x00 = sample(lx, ly);
    let x10 = sample(nx, ly);
    let x01 = sample(lx, ny);
    let x11 = sample(nx, ny);

    let top = x00 + dx * (x10 - x00);
    let bottom = x01 + dx * (x11 - x01);
    top + dy * (bottom - top)
}
