//! Operators that move values between channel 0 and the color channels

use std::cmp::Ordering;

use ndarray::{Axis, Slice};

use crate::io::error::{GeneratorError, Result};
use crate::operators::mask::Masking;
use crate::operators::params::Transform;
use crate::operators::{for_each_pixel, require_channels};
use crate::raster::Layer;

/// Write `alpha * scale * multiplier[c] + offset` into every color channel
///
/// A mask multiplies the source alpha by its weight first.
///
/// # Errors
///
/// Returns an error if the layer has fewer than two channels
pub fn alpha_to_color(layer: &mut Layer, transform: &Transform, masking: Masking<'_>) -> Result<()> {
    require_channels("AlphaToColor", layer, 2)?;

    for_each_pixel(layer, |x, y, mut pixel| {
        let alpha = pixel.get(0).copied().unwrap_or(0.0);
        let source = masking.weight(x, y).map_or(alpha, |t| t * alpha);
        for (channel, value) in pixel.iter_mut().enumerate().skip(1) {
            *value = transform.apply(source, channel);
        }
    });
    Ok(())
}

/// Overwrite every color channel with the transformed per-pixel mid-range
///
/// The mid-range is `(min + max) / 2` over channels `1..N`. Channel 0 is
/// left as it was.
///
/// # Errors
///
/// Returns an error if the layer has fewer than two channels
pub fn color_to_alpha(layer: &mut Layer, transform: &Transform, masking: Masking<'_>) -> Result<()> {
    require_channels("ColorToAlpha", layer, 2)?;

    for_each_pixel(layer, |x, y, mut pixel| {
        let (low, high) = pixel
            .iter()
            .skip(1)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), &value| {
                (low.min(value), high.max(value))
            });
        let middle = (low + high) * 0.5;
        let source = masking.weight(x, y).map_or(middle, |t| t * middle);
        for (channel, value) in pixel.iter_mut().enumerate().skip(1) {
            *value = transform.apply(source, channel);
        }
    });
    Ok(())
}

/// Rescale channels `1..N` to `[0, 1]` using their global range
///
/// The range is reduced over the whole layer before any write, so the
/// global minimum maps to exactly 0 and the maximum to exactly 1.
///
/// # Errors
///
/// Returns an error if the layer has fewer than two channels, or if the
/// color channels are flat (`max <= min`, or the range is not a number); in
/// both cases the layer is left untouched
pub fn normalize(layer: &mut Layer, masking: Masking<'_>) -> Result<()> {
    require_channels("Normalize", layer, 2)?;

    let (min, max) = layer
        .data()
        .slice_axis(Axis(2), Slice::from(1..))
        .iter()
        .fold((f64::MAX, -f64::MAX), |(min, max), &value| {
            (min.min(value), max.max(value))
        });
    if max.partial_cmp(&min) != Some(Ordering::Greater) {
        return Err(GeneratorError::FlatRange { min, max });
    }
    let range = max - min;

    for_each_pixel(layer, |x, y, mut pixel| {
        let weight = masking.weight(x, y);
        for value in pixel.iter_mut().skip(1) {
            let rescaled = (*value - min) / range;
            *value = masking.combine(*value, rescaled, weight);
        }
    });
    Ok(())
}
