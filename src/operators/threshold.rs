//! Greater-than and less-than thresholds
//!
//! Only channels with a configured level are tested. A failing sample is
//! replaced by its level when clamping, otherwise by zero.
//!
//! The two operators treat masks differently: `GreaterThan` is hard-gated
//! (pixels with weight `<= 0` are untouched), while `LessThan` blends the
//! replacement in by the weight.

use crate::operators::for_each_pixel;
use crate::operators::mask::Masking;
use crate::operators::params::Threshold;
use crate::raster::Layer;

/// Replace samples `<= level[c]`
pub fn greater_than(layer: &mut Layer, threshold: &Threshold, masking: Masking<'_>) {
    for_each_pixel(layer, |x, y, mut pixel| {
        if masking.skips(masking.weight(x, y)) {
            return;
        }
        for (channel, value) in pixel.iter_mut().enumerate() {
            let Some(level) = threshold.level_for(channel) else {
                break;
            };
            if *value <= level {
                *value = threshold.replacement(level);
            }
        }
    });
}

/// Replace samples `>= level[c]`
pub fn less_than(layer: &mut Layer, threshold: &Threshold, masking: Masking<'_>) {
    for_each_pixel(layer, |x, y, mut pixel| {
        let weight = masking.weight(x, y);
        for (channel, value) in pixel.iter_mut().enumerate() {
            let Some(level) = threshold.level_for(channel) else {
                break;
            };
            if *value >= level {
                *value = masking.combine(*value, threshold.replacement(level), weight);
            }
        }
    });
}
