//! Per-invocation operator parameters
//!
//! Parameters are fixed when an operator is built and never change while it
//! runs. Multipliers and levels are positional: entry `c` applies to channel
//! `c`, and channels past the end of the sequence are left unscaled
//! (multiplier) or unthresholded (level).

use crate::io::configuration::{
    DEFAULT_EXPONENT, DEFAULT_OCTAVES, DEFAULT_OFFSET, DEFAULT_SCALE, DEFAULT_SPHERICAL,
};
use crate::io::error::{Result, invalid_parameter};

/// Linear transform `value * scale * multiplier[c] + offset`
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Per-channel factors, conventionally alpha, red, green, blue
    pub multiplier: Vec<f64>,
    /// Global factor
    pub scale: f64,
    /// Global additive term
    pub offset: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            multiplier: vec![0.0; 4],
            scale: DEFAULT_SCALE,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Transform {
    /// Create a transform from its three parts
    pub const fn new(multiplier: Vec<f64>, scale: f64, offset: f64) -> Self {
        Self {
            multiplier,
            scale,
            offset,
        }
    }

    /// Transform with a single factor for every channel
    pub fn uniform(multiplier: f64, channels: usize) -> Self {
        Self::new(vec![multiplier; channels], DEFAULT_SCALE, DEFAULT_OFFSET)
    }

    /// Replace the scale
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Replace the offset
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Scale then multiply a source value for `channel`, without the offset
    pub fn scaled(&self, value: f64, channel: usize) -> f64 {
        let scaled = value * self.scale;
        self.multiplier
            .get(channel)
            .map_or(scaled, |factor| scaled * factor)
    }

    /// Full transform of a source value for `channel`
    pub fn apply(&self, value: f64, channel: usize) -> f64 {
        self.scaled(value, channel) + self.offset
    }
}

/// Per-channel threshold with clamp-or-zero replacement
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Threshold {
    /// Per-channel levels; channels past the end are not tested
    pub level: Vec<f64>,
    /// Replace failing samples with the level instead of zero
    pub clamp: bool,
}

impl Threshold {
    /// Create a threshold
    pub const fn new(level: Vec<f64>, clamp: bool) -> Self {
        Self { level, clamp }
    }

    /// Level for a channel, if one is configured
    pub fn level_for(&self, channel: usize) -> Option<f64> {
        self.level.get(channel).copied()
    }

    /// Value written in place of a sample that fails the test
    pub fn replacement(&self, level: f64) -> f64 {
        if self.clamp { level } else { 0.0 }
    }
}

/// Parameters for the FBM operator
#[derive(Debug, Clone, PartialEq)]
pub struct FbmParams {
    /// Number of octave rounds (at least one)
    pub octaves: usize,
    /// Per-octave weight factor
    pub exponent: f64,
    /// Pin grid edges for seamless wrap
    pub spherical: bool,
    /// Transform applied to the field value
    pub transform: Transform,
}

impl FbmParams {
    /// Validate and create FBM parameters
    ///
    /// # Errors
    ///
    /// Returns an error if `octaves` is zero or `exponent` is not finite
    pub fn new(
        octaves: usize,
        exponent: f64,
        spherical: bool,
        transform: Transform,
    ) -> Result<Self> {
        if octaves == 0 {
            return Err(invalid_parameter(
                "octaves",
                &octaves,
                &"at least one octave is required",
            ));
        }
        if !exponent.is_finite() {
            return Err(invalid_parameter("exponent", &exponent, &"must be finite"));
        }

        Ok(Self {
            octaves,
            exponent,
            spherical,
            transform,
        })
    }
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            octaves: DEFAULT_OCTAVES,
            exponent: DEFAULT_EXPONENT,
            spherical: DEFAULT_SPHERICAL,
            transform: Transform::default(),
        }
    }
}

/// Parameters for the gradient operator
#[derive(Debug, Clone, PartialEq)]
pub struct GradientParams {
    /// Transform applied to the raw central differences
    pub transform: Transform,
    /// Wrap neighbour lookups around the edges instead of clamping
    pub spherical: bool,
}

impl GradientParams {
    /// Create gradient parameters
    pub const fn new(transform: Transform, spherical: bool) -> Self {
        Self {
            transform,
            spherical,
        }
    }
}

impl Default for GradientParams {
    fn default() -> Self {
        Self::new(Transform::default(), DEFAULT_SPHERICAL)
    }
}
