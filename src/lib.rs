//! Deterministic procedural texture synthesis from layered per-pixel operators
//!
//! Named multi-channel layers are created in a registry and transformed by an
//! ordered sequence of operators (fill, noise, FBM, gradient, thresholds,
//! blends and channel moves), optionally under a mask. Given the same seed and
//! steps, every run produces bit-identical layers.

#![forbid(unsafe_code)]

/// Input/output operations, pipeline runs and error handling
pub mod io;
/// Noise fields, random stream and interpolation helpers
pub mod math;
/// The fixed operator set and its masking policies
pub mod operators;
/// Layer storage and the name-keyed layer registry
pub mod raster;

pub use io::error::{GeneratorError, Result};
pub use math::random::NoiseSource;
pub use operators::{BinaryOperator, UnaryOperator};
pub use raster::{Generator, Layer};
