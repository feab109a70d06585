//! Uniform noise and FBM
//!
//! Draws are taken sequentially before any pixel is written, so the values a
//! pixel receives depend only on the seed and the step sequence, never on
//! thread scheduling.

use crate::io::error::Result;
use crate::math::fbm::FbmField;
use crate::math::interpolation::lerp;
use crate::math::random::NoiseSource;
use crate::operators::for_each_pixel;
use crate::operators::mask::Masking;
use crate::operators::params::{FbmParams, Transform};
use crate::raster::Layer;

/// Overwrite every channel with `draw * scale * multiplier[c] + offset`
///
/// One draw is consumed per element in storage order
/// (`(x + y * width) * channels + c`), masked or not.
pub fn noise(layer: &mut Layer, transform: &Transform, masking: Masking<'_>, rng: &mut NoiseSource) {
    let width = layer.width();
    let channels = layer.channels();
    let draws = rng.draw(width * layer.height() * channels);

    for_each_pixel(layer, |x, y, mut pixel| {
        let weight = masking.weight(x, y);
        let start = (x + y * width) * channels;
        for (channel, value) in pixel.iter_mut().enumerate() {
            let draw = draws.get(start + channel).copied().unwrap_or(0.0);
            let fresh = transform.apply(draw, channel);
            *value = masking.combine(*value, fresh, weight);
        }
    });
}

/// Add a transformed FBM field to every channel
///
/// The field is built once per call at the layer's size. Unmasked calls
/// accumulate into the layer; masked calls blend the transformed field
/// value in by the mask weight instead.
///
/// # Errors
///
/// Returns an error if the field cannot be generated from `params`
pub fn fbm(
    layer: &mut Layer,
    params: &FbmParams,
    masking: Masking<'_>,
    rng: &mut NoiseSource,
) -> Result<()> {
    let field = FbmField::generate(
        rng,
        layer.width(),
        layer.height(),
        params.octaves,
        params.exponent,
        params.spherical,
    )?;
    let transform = &params.transform;

    for_each_pixel(layer, |x, y, mut pixel| {
        let sample = field.get(x, y).unwrap_or(0.0);
        let weight = masking.weight(x, y);
        for (channel, value) in pixel.iter_mut().enumerate() {
            let contribution = transform.apply(sample, channel);
            *value = match weight {
                None => *value + contribution,
                Some(t) => lerp(*value, contribution, t),
            };
        }
    });
    Ok(())
}
