//! Fill, multiply, alpha blend and swap
//!
//! Binary operators assume their operands were already checked for equal
//! size and channel count.

use crate::math::interpolation::{clamp_unit, lerp};
use crate::operators::mask::Masking;
use crate::operators::params::Transform;
use crate::operators::{for_each_pixel, for_each_pixel_pair};
use crate::raster::Layer;

/// Accumulate `scale * multiplier[c] + offset` into every channel
///
/// A mask pre-multiplies the whole increment by its weight.
pub fn fill(layer: &mut Layer, transform: &Transform, masking: Masking<'_>) {
    for_each_pixel(layer, |x, y, mut pixel| {
        let weight = masking.weight(x, y);
        for (channel, value) in pixel.iter_mut().enumerate() {
            let increment = transform.apply(1.0, channel);
            *value += weight.map_or(increment, |t| t * increment);
        }
    });
}

/// Composite `second` over `first` using the clamped alpha of `second`
///
/// Channel 0 of `first` is never written.
pub fn alpha_blend(
    first: &mut Layer,
    second: &mut Layer,
    transform: &Transform,
    masking: Masking<'_>,
) {
    for_each_pixel_pair(first, second, |x, y, mut base, over| {
        let weight = masking.weight(x, y);
        let coverage = clamp_unit(over.get(0).copied().unwrap_or(0.0));
        for (channel, (value, source)) in base.iter_mut().zip(over.iter()).enumerate().skip(1) {
            let incoming = transform.apply(*source, channel);
            let composite = lerp(*value, incoming, coverage);
            *value = masking.combine(*value, composite, weight);
        }
    });
}

/// Multiply every channel of `first` by the transformed `second`
pub fn multiply(first: &mut Layer, second: &mut Layer, transform: &Transform, masking: Masking<'_>) {
    for_each_pixel_pair(first, second, |x, y, mut base, factor| {
        let weight = masking.weight(x, y);
        for (channel, (value, source)) in base.iter_mut().zip(factor.iter()).enumerate() {
            let product = *value * transform.apply(*source, channel);
            *value = masking.combine(*value, product, weight);
        }
    });
}

/// Exchange all channels of both layers, only where a mask admits the pixel
pub fn swap(first: &mut Layer, second: &mut Layer, masking: Masking<'_>) {
    for_each_pixel_pair(first, second, |x, y, mut left, mut right| {
        if masking.skips(masking.weight(x, y)) {
            return;
        }
        for (a, b) in left.iter_mut().zip(right.iter_mut()) {
            std::mem::swap(a, b);
        }
    });
}
