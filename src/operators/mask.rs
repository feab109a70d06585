//! Masking policies
//!
//! Each operator kind carries its own policy for how a mask weight `t`
//! (channel 0 of the mask at the pixel, never clamped) enters the result.
//! The policies differ on purpose and are not interchangeable.

use crate::math::interpolation::lerp;
use crate::raster::Layer;

/// How a mask weight modifies an operator's result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskPolicy {
    /// The operator folds `t` into its own contribution before writing
    Scale,
    /// The masked result is `(1 - t) * original + t * computed`
    Blend,
    /// Pixels with `t <= 0` are left untouched, others take the computed value
    Gate,
}

impl MaskPolicy {
    /// Whether a pixel with this weight is written at all
    pub fn admits(self, weight: f64) -> bool {
        match self {
            Self::Gate => weight > 0.0,
            Self::Scale | Self::Blend => true,
        }
    }

    /// Combine an original and a computed value under an optional weight
    ///
    /// Without a mask the computed value always wins. `Scale` operators have
    /// already folded the weight into `computed`.
    pub fn combine(self, original: f64, computed: f64, weight: Option<f64>) -> f64 {
        match (self, weight) {
            (_, None) | (Self::Scale, Some(_)) => computed,
            (Self::Blend, Some(t)) => lerp(original, computed, t),
            (Self::Gate, Some(t)) => {
                if t > 0.0 {
                    computed
                } else {
                    original
                }
            }
        }
    }
}

/// A mask bound to the policy of the operator reading it
#[derive(Debug, Clone, Copy)]
pub struct Masking<'a> {
    /// Mask layer, if the call is masked
    pub mask: Option<&'a Layer>,
    /// Policy of the operator consuming the mask
    pub policy: MaskPolicy,
}

impl<'a> Masking<'a> {
    /// Bind an optional mask to a policy
    pub const fn new(mask: Option<&'a Layer>, policy: MaskPolicy) -> Self {
        Self { mask, policy }
    }

    /// Mask weight at a pixel, `None` for unmasked calls
    pub fn weight(&self, x: usize, y: usize) -> Option<f64> {
        self.mask.map(|mask| mask.weight(x, y))
    }

    /// Whether the pixel is excluded outright by a gating mask
    pub fn skips(&self, weight: Option<f64>) -> bool {
        weight.is_some_and(|t| !self.policy.admits(t))
    }

    /// Combine an original and a computed value under the pixel weight
    pub fn combine(&self, original: f64, computed: f64, weight: Option<f64>) -> f64 {
        self.policy.combine(original, computed, weight)
    }
}
