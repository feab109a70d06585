//! Per-pixel layer operators
//!
//! The operator set is closed: unary operators transform one layer, binary
//! operators combine two. Each kind has an unmasked and a masked call form
//! and carries its own [`MaskPolicy`]. Precondition failures are reported
//! before any pixel is written.

/// Fill, multiply, alpha blend and swap
pub mod arithmetic;
/// Alpha/color propagation and normalization
pub mod channel;
/// Central-difference gradient of the alpha channel
pub mod gradient;
/// Masking policies
pub mod mask;
/// Operator parameter records
pub mod params;
/// Uniform noise and FBM
pub mod stochastic;
/// Greater-than and less-than thresholds
pub mod threshold;

pub use mask::{MaskPolicy, Masking};
pub use params::{FbmParams, GradientParams, Threshold, Transform};

use ndarray::{ArrayViewMut1, Axis, Zip};

use crate::io::error::{GeneratorError, Result};
use crate::math::random::NoiseSource;
use crate::raster::Layer;

/// Operators acting on a single layer
#[derive(Debug, Clone, PartialEq)]
pub enum UnaryOperator {
    /// Accumulate `scale * multiplier[c] + offset` into every channel
    Fill(Transform),
    /// Overwrite every channel with a transformed uniform draw
    Noise(Transform),
    /// Accumulate a transformed FBM field into every channel
    Fbm(FbmParams),
    /// Write the alpha gradient into channels 1 and 2
    Gradient(GradientParams),
    /// Replace samples at or below the level
    GreaterThan(Threshold),
    /// Replace samples at or above the level
    LessThan(Threshold),
    /// Propagate alpha into the color channels
    AlphaToColor(Transform),
    /// Overwrite color channels with their per-pixel mid-range
    ColorToAlpha(Transform),
    /// Rescale color channels to `[0, 1]` over the whole layer
    Normalize,
}

impl UnaryOperator {
    /// Operator name used in logs and errors
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fill(_) => "Fill",
            Self::Noise(_) => "Noise",
            Self::Fbm(_) => "FBM",
            Self::Gradient(_) => "Gradient",
            Self::GreaterThan(_) => "GreaterThan",
            Self::LessThan(_) => "LessThan",
            Self::AlphaToColor(_) => "AlphaToColor",
            Self::ColorToAlpha(_) => "ColorToAlpha",
            Self::Normalize => "Normalize",
        }
    }

    /// How this operator treats a mask
    pub const fn mask_policy(&self) -> MaskPolicy {
        match self {
            Self::Fill(_) | Self::AlphaToColor(_) | Self::ColorToAlpha(_) => MaskPolicy::Scale,
            Self::Noise(_) | Self::Fbm(_) | Self::LessThan(_) | Self::Normalize => {
                MaskPolicy::Blend
            }
            Self::Gradient(_) | Self::GreaterThan(_) => MaskPolicy::Gate,
        }
    }

    /// Apply to a whole layer
    ///
    /// # Errors
    ///
    /// Returns an error if the layer fails the operator's channel
    /// precondition, or if the operator's own parameters are unusable
    pub fn apply(&self, layer: &mut Layer, rng: &mut NoiseSource) -> Result<()> {
        self.run(layer, None, rng)
    }

    /// Apply under a mask
    ///
    /// # Errors
    ///
    /// Returns an error if the mask size differs from the layer, or for any
    /// reason [`UnaryOperator::apply`] fails
    pub fn apply_masked(
        &self,
        layer: &mut Layer,
        mask: &Layer,
        rng: &mut NoiseSource,
    ) -> Result<()> {
        require_same_size(self.name(), layer, mask)?;
        self.run(layer, Some(mask), rng)
    }

    fn run(&self, layer: &mut Layer, mask: Option<&Layer>, rng: &mut NoiseSource) -> Result<()> {
        let masking = Masking::new(mask, self.mask_policy());
        match self {
            Self::Fill(transform) => {
                arithmetic::fill(layer, transform, masking);
                Ok(())
            }
            Self::Noise(transform) => {
                stochastic::noise(layer, transform, masking, rng);
                Ok(())
            }
            Self::Fbm(params) => stochastic::fbm(layer, params, masking, rng),
            Self::Gradient(params) => gradient::gradient(layer, params, masking),
            Self::GreaterThan(threshold) => {
                threshold::greater_than(layer, threshold, masking);
                Ok(())
            }
            Self::LessThan(threshold) => {
                threshold::less_than(layer, threshold, masking);
                Ok(())
            }
            Self::AlphaToColor(transform) => channel::alpha_to_color(layer, transform, masking),
            Self::ColorToAlpha(transform) => channel::color_to_alpha(layer, transform, masking),
            Self::Normalize => channel::normalize(layer, masking),
        }
    }
}

/// Operators combining two layers of equal size and channel count
#[derive(Debug, Clone, PartialEq)]
pub enum BinaryOperator {
    /// Composite the second layer over the first using its clamped alpha
    AlphaBlend(Transform),
    /// Multiply the first layer by the transformed second layer
    Multiply(Transform),
    /// Exchange the contents of both layers
    Swap,
}

impl BinaryOperator {
    /// Operator name used in logs and errors
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AlphaBlend(_) => "AlphaBlend",
            Self::Multiply(_) => "Multiply",
            Self::Swap => "Swap",
        }
    }

    /// How this operator treats a mask
    pub const fn mask_policy(&self) -> MaskPolicy {
        match self {
            Self::AlphaBlend(_) | Self::Multiply(_) => MaskPolicy::Blend,
            Self::Swap => MaskPolicy::Gate,
        }
    }

    /// Apply to a pair of layers
    ///
    /// # Errors
    ///
    /// Returns an error if the operands differ in size or channel count
    pub fn apply(&self, first: &mut Layer, second: &mut Layer) -> Result<()> {
        self.run(first, second, None)
    }

    /// Apply to a pair of layers under a mask
    ///
    /// # Errors
    ///
    /// Returns an error if the operands or the mask differ in size, or the
    /// operands differ in channel count
    pub fn apply_masked(&self, first: &mut Layer, second: &mut Layer, mask: &Layer) -> Result<()> {
        require_same_size(self.name(), first, mask)?;
        self.run(first, second, Some(mask))
    }

    fn run(&self, first: &mut Layer, second: &mut Layer, mask: Option<&Layer>) -> Result<()> {
        require_same_size(self.name(), first, second)?;
        if first.channels() != second.channels() {
            return Err(GeneratorError::ChannelMismatch {
                operator: self.name(),
                expected: first.channels(),
                found: second.channels(),
            });
        }

        let masking = Masking::new(mask, self.mask_policy());
        match self {
            Self::AlphaBlend(transform) => arithmetic::alpha_blend(first, second, transform, masking),
            Self::Multiply(transform) => arithmetic::multiply(first, second, transform, masking),
            Self::Swap => arithmetic::swap(first, second, masking),
        }
        Ok(())
    }
}

/// Fail unless the layer has at least `required` channels
pub(crate) fn require_channels(operator: &'static str, layer: &Layer, required: usize) -> Result<()> {
    if layer.channels() < required {
        return Err(GeneratorError::InsufficientChannels {
            operator,
            required,
            found: layer.channels(),
        });
    }
    Ok(())
}

/// Fail unless both layers share width and height
pub(crate) fn require_same_size(operator: &'static str, layer: &Layer, other: &Layer) -> Result<()> {
    if layer.dimensions() != other.dimensions() {
        return Err(GeneratorError::DimensionMismatch {
            operator,
            expected: layer.dimensions(),
            found: other.dimensions(),
        });
    }
    Ok(())
}

/// Visit every pixel in parallel with mutable access to its channels
pub(crate) fn for_each_pixel<F>(layer: &mut Layer, visit: F)
where
    F: Fn(usize, usize, ArrayViewMut1<'_, f64>) + Sync + Send,
{
    Zip::indexed(layer.data_mut().lanes_mut(Axis(2)))
        .par_for_each(|(y, x), pixel| visit(x, y, pixel));
}

/// Visit matching pixels of two equally sized layers in parallel
pub(crate) fn for_each_pixel_pair<F>(first: &mut Layer, second: &mut Layer, visit: F)
where
    F: Fn(usize, usize, ArrayViewMut1<'_, f64>, ArrayViewMut1<'_, f64>) + Sync + Send,
{
    Zip::indexed(first.data_mut().lanes_mut(Axis(2)))
        .and(second.data_mut().lanes_mut(Axis(2)))
        .par_for_each(|(y, x), left, right| visit(x, y, left, right));
}
