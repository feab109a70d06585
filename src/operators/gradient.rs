//! Central-difference gradient of channel 0
//!
//! Channel 1 receives the horizontal difference, channel 2 the vertical one
//! (`up` is `y + 1`). Channel 0 is read from a snapshot taken before any
//! write, and is never modified.

use crate::io::error::Result;
use crate::operators::mask::Masking;
use crate::operators::params::GradientParams;
use crate::operators::{for_each_pixel, require_channels};
use crate::raster::Layer;

/// Write the alpha gradient into channels 1 and 2
///
/// Neighbour lookups wrap around both axes when `spherical` is set and clamp
/// to the layer bounds otherwise. Masked calls skip pixels with weight `<= 0`.
///
/// # Errors
///
/// Returns an error if the layer has fewer than three channels
pub fn gradient(layer: &mut Layer, params: &GradientParams, masking: Masking<'_>) -> Result<()> {
    require_channels("Gradient", layer, 3)?;
    let Some(alpha) = layer.channel_plane(0) else {
        return Ok(());
    };

    let (width, height) = layer.dimensions();
    let spherical = params.spherical;
    let transform = &params.transform;

    for_each_pixel(layer, |x, y, mut pixel| {
        if masking.skips(masking.weight(x, y)) {
            return;
        }
        let sample = |column: usize, row: usize| alpha.get([row, column]).copied().unwrap_or(0.0);
        let (left, right) = neighbours(x, width, spherical);
        let (down, up) = neighbours(y, height, spherical);

        let horizontal = (sample(right, y) - sample(left, y)) * 0.5;
        let vertical = (sample(x, up) - sample(x, down)) * 0.5;
        if let Some(value) = pixel.get_mut(1) {
            *value = transform.apply(horizontal, 1);
        }
        if let Some(value) = pixel.get_mut(2) {
            *value = transform.apply(vertical, 2);
        }
    });
    Ok(())
}

/// Previous and next index along an axis of length `len`
pub fn neighbours(index: usize, len: usize, wrap: bool) -> (usize, usize) {
    let last = len.saturating_sub(1);
    if wrap {
        let previous = if index == 0 { last } else { index - 1 };
        let next = if index >= last { 0 } else { index + 1 };
        (previous, next)
    } else {
        (index.saturating_sub(1), (index + 1).min(last))
    }
}
