//! Synthesis constants and runtime configuration defaults

// Map defaults used when a document omits them
/// Default map width in pixels
pub const DEFAULT_WIDTH: usize = 1024;

/// Default map height in pixels
pub const DEFAULT_HEIGHT: usize = 1024;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 4913;

/// Default channel count for a layer (alpha, red, green, blue)
pub const DEFAULT_CHANNELS: usize = 4;

/// Name of the layer that is encoded as the final image
pub const BASE_LAYER: &str = "base";

// Operator defaults
/// Default per-channel multiplier entry
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Default per-channel threshold level
pub const DEFAULT_LEVEL: f64 = 0.0;

/// Default global scale
pub const DEFAULT_SCALE: f64 = 1.0;

/// Default global offset
pub const DEFAULT_OFFSET: f64 = 0.0;

/// Default number of FBM octaves
pub const DEFAULT_OCTAVES: usize = 4;

/// Default per-octave FBM weight factor
pub const DEFAULT_EXPONENT: f64 = 2.0;

/// Whether FBM and gradient wrap their edges unless told otherwise
pub const DEFAULT_SPHERICAL: bool = true;

// Divisors for the non-real value formats in configuration documents
/// Divisor for byte-scaled (`Char`) values
pub const CHAR_DIVISOR: f64 = 256.0;
/// Divisor for percentage values
pub const PERCENT_DIVISOR: f64 = 100.0;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed layer dimension
pub const MAX_LAYER_DIMENSION: usize = 16_384;
/// Maximum number of values (width x height x channels) in one layer
pub const MAX_LAYER_ELEMENTS: usize = 1 << 30;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Extension of rendered images written next to their configuration
pub const OUTPUT_EXTENSION: &str = "png";
/// Extension that selects binary PPM export
pub const PPM_EXTENSION: &str = "ppm";
/// Extension of configuration documents picked up from a directory
pub const CONFIG_EXTENSION: &str = "json";
