//! Dense multi-channel layer buffer
//!
//! A layer stores `width * height * channels` real values. The backing array
//! is shaped `(height, width, channels)` in standard layout, so the linear
//! position of `(x, y, c)` is `(x + y * width) * channels + c` and every
//! pixel's channels sit next to each other in memory.

use ndarray::{Array2, Array3, Axis};

use crate::io::configuration::{MAX_LAYER_DIMENSION, MAX_LAYER_ELEMENTS};
use crate::io::error::{Result, invalid_parameter};

/// Fixed-size multi-channel raster of unclamped real values
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    data: Array3<f64>,
}

impl Layer {
    /// Create a zero-initialised layer
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is zero or exceeds
    /// `MAX_LAYER_DIMENSION`, or if the element count exceeds
    /// `MAX_LAYER_ELEMENTS`
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;
        validate_dimension("channels", channels)?;
        validate_element_count(width, height, channels)?;

        Ok(Self {
            data: Array3::zeros((height, width, channels)),
        })
    }

    /// Number of pixels per row
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Number of channels per pixel
    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    /// Width and height as a pair
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Whether `(x, y, channel)` addresses an element of this layer
    pub fn contains(&self, x: usize, y: usize, channel: usize) -> bool {
        x < self.width() && y < self.height() && channel < self.channels()
    }

    /// Read one element
    ///
    /// # Panics
    ///
    /// Panics if `(x, y, channel)` lies outside the layer
    // Out-of-range access is a caller bug, not a recoverable condition
    #[allow(clippy::indexing_slicing)]
    pub fn at(&self, x: usize, y: usize, channel: usize) -> f64 {
        self.data[[y, x, channel]]
    }

    /// Mutable reference to one element
    ///
    /// # Panics
    ///
    /// Panics if `(x, y, channel)` lies outside the layer
    #[allow(clippy::indexing_slicing)]
    pub fn at_mut(&mut self, x: usize, y: usize, channel: usize) -> &mut f64 {
        &mut self.data[[y, x, channel]]
    }

    /// Checked read, `None` outside the layer
    pub fn get(&self, x: usize, y: usize, channel: usize) -> Option<f64> {
        self.data.get([y, x, channel]).copied()
    }

    /// Checked mutable access, `None` outside the layer
    pub fn get_mut(&mut self, x: usize, y: usize, channel: usize) -> Option<&mut f64> {
        self.data.get_mut([y, x, channel])
    }

    /// Mask weight at a pixel (channel 0), never clamped
    pub fn weight(&self, x: usize, y: usize) -> f64 {
        self.get(x, y, 0).unwrap_or(0.0)
    }

    /// Copy of a single channel plane, indexed `[y, x]`
    pub fn channel_plane(&self, channel: usize) -> Option<Array2<f64>> {
        (channel < self.channels()).then(|| self.data.index_axis(Axis(2), channel).to_owned())
    }

    /// All values in storage order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    pub(crate) const fn data(&self) -> &Array3<f64> {
        &self.data
    }

    pub(crate) const fn data_mut(&mut self) -> &mut Array3<f64> {
        &mut self.data
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(invalid_parameter(parameter, &value, &"must be positive"));
    }
    if value > MAX_LAYER_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("exceeds maximum of {MAX_LAYER_DIMENSION}"),
        ));
    }
    Ok(())
}

fn validate_element_count(width: usize, height: usize, channels: usize) -> Result<()> {
    let elements = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(channels))
        .filter(|&count| count <= MAX_LAYER_ELEMENTS);
    if elements.is_none() {
        return Err(invalid_parameter(
            "dimensions",
            &format!("{width}x{height}x{channels}"),
            &format!("exceeds maximum of {MAX_LAYER_ELEMENTS} values"),
        ));
    }
    Ok(())
}
