//! Error types and context management for layer synthesis

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generator operations
///
/// Operator failures are step-local: the pipeline runner logs them and moves
/// on to the next step rather than aborting the run.
#[derive(Debug)]
pub enum GeneratorError {
    /// A target or mask name is not registered with the generator
    LayerNotFound {
        /// The unresolved layer name
        name: String,
    },

    /// Operator needs more channels than the layer carries
    InsufficientChannels {
        /// Operator that rejected the layer
        operator: &'static str,
        /// Minimum channel count the operator needs
        required: usize,
        /// Channel count of the offending layer
        found: usize,
    },

    /// Binary operands carry different channel counts
    ChannelMismatch {
        /// Operator that rejected the operands
        operator: &'static str,
        /// Channel count of the first operand
        expected: usize,
        /// Channel count of the second operand
        found: usize,
    },

    /// Operands (or mask and target) differ in width or height
    DimensionMismatch {
        /// Operator that rejected the operands
        operator: &'static str,
        /// Dimensions of the target layer (width, height)
        expected: (usize, usize),
        /// Dimensions of the other layer (width, height)
        found: (usize, usize),
    },

    /// A sample was requested outside a layer's extent
    OutOfBounds {
        /// Layer that was sampled
        layer: String,
        /// Requested pixel (x, y)
        position: (usize, usize),
        /// Requested channel
        channel: usize,
    },

    /// Normalization over color channels without any spread
    FlatRange {
        /// Smallest color value found
        min: f64,
        /// Largest color value found
        max: f64,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Configuration declares no layer named `base`
    MissingBaseLayer,

    /// Configuration names an operator type outside the fixed set
    UnknownOperator {
        /// The unrecognised type string
        kind: String,
    },

    /// Operator entry lacks a field its shape requires
    MissingField {
        /// Operator type of the entry
        operator: String,
        /// Name of the absent field
        field: &'static str,
    },

    /// Configuration document could not be parsed
    ConfigParse {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to save generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LayerNotFound { name } => write!(f, "Layer '{name}' does not exist"),
            Self::InsufficientChannels {
                operator,
                required,
                found,
            } => {
                write!(
                    f,
                    "{operator} needs at least {required} channels, layer has {found}"
                )
            }
            Self::ChannelMismatch {
                operator,
                expected,
                found,
            } => {
                write!(
                    f,
                    "{operator} operands differ in channel count ({expected} vs {found})"
                )
            }
            Self::DimensionMismatch {
                operator,
                expected,
                found,
            } => {
                write!(
                    f,
                    "{operator} operands differ in size ({}x{} vs {}x{})",
                    expected.0, expected.1, found.0, found.1
                )
            }
            Self::OutOfBounds {
                layer,
                position,
                channel,
            } => {
                write!(
                    f,
                    "Sample ({}, {}, {channel}) is outside layer '{layer}'",
                    position.0, position.1
                )
            }
            Self::FlatRange { min, max } => {
                write!(f, "Cannot normalize a flat color range [{min}, {max}]")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MissingBaseLayer => write!(f, "No base layer declared"),
            Self::UnknownOperator { kind } => write!(f, "Unknown operator type: {kind}"),
            Self::MissingField { operator, field } => {
                write!(f, "{operator} entry is missing required field '{field}'")
            }
            Self::ConfigParse { path, source } => {
                write!(
                    f,
                    "Failed to parse configuration '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigParse { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generator results
pub type Result<T> = std::result::Result<T, GeneratorError>;

impl From<std::io::Error> for GeneratorError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GeneratorError {
    GeneratorError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a missing-layer error
pub fn layer_not_found(name: &str) -> GeneratorError {
    GeneratorError::LayerNotFound {
        name: name.to_string(),
    }
}
