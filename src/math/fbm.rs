//! Multi-octave value noise (fractal Brownian motion)
//!
//! The field starts as one uniform draw per pixel, weighted by `1 / octaves`.
//! Every octave halves the working resolution, draws a fresh coarse grid of
//! `(w / 2 + 1) x (h / 2 + 1)` samples, upsamples it bilinearly to full
//! resolution and adds it with a weight that is multiplied by `exponent`
//! each round.
//!
//! With spherical wrap enabled, every grid (the base one included) has its
//! first row, last row and last column pinned to the value at the start of
//! the respective row, which keeps the borders consistent for tiling.

use ndarray::{Array2, Zip};

use crate::io::error::{Result, invalid_parameter};
use crate::math::interpolation::bilinear;
use crate::math::random::NoiseSource;

/// Fully synthesised scalar noise field, indexed by pixel
#[derive(Debug, Clone, PartialEq)]
pub struct FbmField {
    noise: Array2<f64>,
}

impl FbmField {
    /// Build a field from the random stream
    ///
    /// All draws happen sequentially in row-major order (base grid first,
    /// then each octave's coarse grid); accumulation into the full-resolution
    /// field runs in parallel once a coarse grid is complete.
    ///
    /// # Errors
    ///
    /// Returns an error if `width`, `height` or `octaves` is zero
    pub fn generate(
        rng: &mut NoiseSource,
        width: usize,
        height: usize,
        octaves: usize,
        exponent: f64,
        spherical: bool,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{width}x{height}"),
                &"noise field needs at least one pixel",
            ));
        }
        if octaves == 0 {
            return Err(invalid_parameter(
                "octaves",
                &octaves,
                &"at least one octave is required",
            ));
        }

        let mut weight = 1.0 / octaves as f64;
        let mut noise = draw_grid(rng, width, height);
        noise.mapv_inplace(|value| value * weight);
        if spherical {
            pin_edges(&mut noise);
        }

        let mut coarse_width = width;
        let mut coarse_height = height;
        for _ in 0..octaves {
            weight *= exponent;
            coarse_width /= 2;
            coarse_height /= 2;

            let mut grid = draw_grid(rng, coarse_width + 1, coarse_height + 1);
            if spherical {
                pin_edges(&mut grid);
            }

            let octave_weight = weight;
            Zip::indexed(&mut noise).par_for_each(|(y, x), value| {
                let fx = x as f64 / width as f64 * coarse_width as f64;
                let fy = y as f64 / height as f64 * coarse_height as f64;
                *value += bilinear(&grid, fx, fy) * octave_weight;
            });
        }

        Ok(Self { noise })
    }

    /// Field width in pixels
    pub fn width(&self) -> usize {
        self.noise.dim().1
    }

    /// Field height in pixels
    pub fn height(&self) -> usize {
        self.noise.dim().0
    }

    /// Noise value at a pixel, `None` outside the field
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.noise.get([y, x]).copied()
    }

    /// Underlying array, indexed `[y, x]`
    pub const fn values(&self) -> &Array2<f64> {
        &self.noise
    }
}

// Row-major draws so the sequence is independent of thread scheduling
fn draw_grid(rng: &mut NoiseSource, width: usize, height: usize) -> Array2<f64> {
    let mut grid = Array2::zeros((height, width));
    for value in &mut grid {
        *value = rng.next_signed();
    }
    grid
}

/// Pin the first row, last row and last column of a grid to row-start values
pub fn pin_edges(grid: &mut Array2<f64>) {
    let (rows, cols) = grid.dim();
    if rows == 0 || cols == 0 {
        return;
    }

    for row in [0, rows - 1] {
        let start = grid.get([row, 0]).copied().unwrap_or(0.0);
        for col in 0..cols {
            if let Some(value) = grid.get_mut([row, col]) {
                *value = start;
            }
        }
    }

    for row in 0..rows {
        let start = grid.get([row, 0]).copied().unwrap_or(0.0);
        if let Some(value) = grid.get_mut([row, cols - 1]) {
            *value = start;
        }
    }
}
