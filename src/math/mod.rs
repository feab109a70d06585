//! Mathematical utilities for synthesis

/// Multi-octave value noise fields
pub mod fbm;
/// Bilinear resampling and blend helpers
pub mod interpolation;
/// Seeded uniform random stream
pub mod random;
