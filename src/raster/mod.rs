//! Layer storage and the name-keyed layer registry
//!
//! This module contains the raster side of the system:
//! - Dense multi-channel layer buffers
//! - The generator that owns layers and dispatches operators to them

/// Multi-channel 2D layer buffers
pub mod layer;
/// Name-keyed layer registry and operator dispatch
pub mod generator;

pub use generator::Generator;
pub use layer::Layer;
