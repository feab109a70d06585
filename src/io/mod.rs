//! Input/output: errors, defaults, map documents, pipeline runs and export

/// Command-line surface and batch rendering
pub mod cli;
/// Compile-time defaults and limits
pub mod configuration;
/// JSON map documents
pub mod document;
/// Error type shared by the whole crate
pub mod error;
/// RGB image export
pub mod image;
/// Ordered operator pipeline
pub mod pipeline;
/// Terminal progress display
pub mod progress;
