//! JSON map document and its conversion into pipeline steps
//!
//! Layout:
//!
//! ```json
//! { "map": { "width": 256, "height": 256, "seed": 7,
//!            "layers": [ { "name": "base", "channels": 4 } ],
//!            "operators": [ { "type": "FillOperator", "layer": "base",
//!                             "multiplier": { "a": 1, "r": 0.5 } } ] } }
//! ```
//!
//! Operator types are accepted with or without the `Operator` suffix.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::io::configuration::{
    CHAR_DIVISOR, DEFAULT_EXPONENT, DEFAULT_LEVEL, DEFAULT_MULTIPLIER, DEFAULT_OCTAVES,
    DEFAULT_OFFSET, DEFAULT_SCALE, DEFAULT_SPHERICAL, PERCENT_DIVISOR,
};
use crate::io::error::{GeneratorError, Result};
use crate::io::pipeline::Step;
use crate::operators::{
    BinaryOperator, FbmParams, GradientParams, Threshold, Transform, UnaryOperator,
};

/// Root of a configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// The single map section
    pub map: MapSection,
}

/// Map size, seed, layer declarations and the ordered operator list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapSection {
    /// Default layer width
    pub width: Option<usize>,
    /// Default layer height
    pub height: Option<usize>,
    /// Seed for the random stream
    pub seed: Option<u64>,
    /// Layer declarations in creation order
    pub layers: Vec<LayerEntry>,
    /// Operator applications in execution order
    pub operators: Vec<OperatorEntry>,
}

/// One declared layer
#[derive(Debug, Clone, Deserialize)]
pub struct LayerEntry {
    /// Unique layer name
    pub name: String,
    /// Channel count, defaults to four
    pub channels: Option<usize>,
    /// Width, defaults to the map width
    pub width: Option<usize>,
    /// Height, defaults to the map height
    pub height: Option<usize>,
}

/// Unit a channel value block is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ValueFormat {
    /// Plain reals
    #[default]
    Real,
    /// Byte-scaled, divided by 256
    Char,
    /// Percentages, divided by 100
    Percent,
}

impl ValueFormat {
    /// Divisor that brings a raw value into real units
    pub const fn divisor(self) -> f64 {
        match self {
            Self::Real => 1.0,
            Self::Char => CHAR_DIVISOR,
            Self::Percent => PERCENT_DIVISOR,
        }
    }
}

/// Per-channel values keyed by channel letter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelValues {
    /// Unit of the raw values
    #[serde(default)]
    pub format: ValueFormat,
    /// Channel 0
    pub a: Option<f64>,
    /// Channel 1
    pub r: Option<f64>,
    /// Channel 2
    pub g: Option<f64>,
    /// Channel 3
    pub b: Option<f64>,
}

impl ChannelValues {
    /// Values in channel order, missing entries filled with `default`
    pub fn resolve(&self, default: f64) -> Vec<f64> {
        let divisor = self.format.divisor();
        [self.a, self.r, self.g, self.b]
            .into_iter()
            .map(|value| value.map_or(default, |raw| raw / divisor))
            .collect()
    }
}

/// One operator application as written in the document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OperatorEntry {
    /// Operator type name
    #[serde(rename = "type")]
    pub kind: String,
    /// Target of a unary operator
    pub layer: Option<String>,
    /// First operand of a binary operator
    pub layer0: Option<String>,
    /// Second operand of a binary operator
    pub layer1: Option<String>,
    /// Optional mask layer
    pub mask: Option<String>,
    /// Per-channel multiplier
    pub multiplier: Option<ChannelValues>,
    /// Per-channel threshold level
    pub level: Option<ChannelValues>,
    /// Global scale
    pub scale: Option<f64>,
    /// Global offset
    pub offset: Option<f64>,
    /// `"Clamp"` replaces failing threshold samples with the level
    pub mode: Option<String>,
    /// FBM octave count
    pub octaves: Option<usize>,
    /// FBM per-octave weight factor
    pub exponent: Option<f64>,
    /// Edge wrap for FBM and gradient
    pub spherical: Option<bool>,
}

impl OperatorEntry {
    /// Operator type without the optional `Operator` suffix
    pub fn short_kind(&self) -> &str {
        self.kind.strip_suffix("Operator").unwrap_or(&self.kind)
    }

    /// Build the pipeline step this entry describes
    ///
    /// # Errors
    ///
    /// Returns `UnknownOperator` for a type outside the fixed set,
    /// `MissingField` when a target name is absent, and `InvalidParameter`
    /// for unusable FBM parameters
    pub fn to_step(&self) -> Result<Step> {
        match self.short_kind() {
            "Fill" => self.unary(UnaryOperator::Fill(self.transform())),
            "Noise" => self.unary(UnaryOperator::Noise(self.transform())),
            "FBM" | "Fbm" => {
                let params = FbmParams::new(
                    self.octaves.unwrap_or(DEFAULT_OCTAVES),
                    self.exponent.unwrap_or(DEFAULT_EXPONENT),
                    self.spherical.unwrap_or(DEFAULT_SPHERICAL),
                    self.transform(),
                )?;
                self.unary(UnaryOperator::Fbm(params))
            }
            "Gradient" => self.unary(UnaryOperator::Gradient(GradientParams::new(
                self.transform(),
                self.spherical.unwrap_or(DEFAULT_SPHERICAL),
            ))),
            "GreaterThan" => self.unary(UnaryOperator::GreaterThan(self.threshold())),
            "LessThan" => self.unary(UnaryOperator::LessThan(self.threshold())),
            "AlphaToColor" => self.unary(UnaryOperator::AlphaToColor(self.transform())),
            "ColorToAlpha" => self.unary(UnaryOperator::ColorToAlpha(self.transform())),
            "Normalize" => self.unary(UnaryOperator::Normalize),
            "AlphaBlend" => self.binary(BinaryOperator::AlphaBlend(self.transform())),
            "Multiply" => self.binary(BinaryOperator::Multiply(self.transform())),
            "Swap" => self.binary(BinaryOperator::Swap),
            _ => Err(GeneratorError::UnknownOperator {
                kind: self.kind.clone(),
            }),
        }
    }

    fn transform(&self) -> Transform {
        let multiplier = self.multiplier.as_ref().map_or_else(
            || vec![DEFAULT_MULTIPLIER; 4],
            |values| values.resolve(DEFAULT_MULTIPLIER),
        );
        Transform::new(
            multiplier,
            self.scale.unwrap_or(DEFAULT_SCALE),
            self.offset.unwrap_or(DEFAULT_OFFSET),
        )
    }

    fn threshold(&self) -> Threshold {
        let level = self.level.as_ref().map_or_else(
            || vec![DEFAULT_LEVEL; 4],
            |values| values.resolve(DEFAULT_LEVEL),
        );
        Threshold::new(level, self.mode.as_deref() == Some("Clamp"))
    }

    fn unary(&self, operator: UnaryOperator) -> Result<Step> {
        Ok(Step::Unary {
            layer: self.required(self.layer.as_ref(), "layer")?,
            mask: self.mask.clone(),
            operator,
        })
    }

    fn binary(&self, operator: BinaryOperator) -> Result<Step> {
        Ok(Step::Binary {
            layer0: self.required(self.layer0.as_ref(), "layer0")?,
            layer1: self.required(self.layer1.as_ref(), "layer1")?,
            mask: self.mask.clone(),
            operator,
        })
    }

    fn required(&self, value: Option<&String>, field: &'static str) -> Result<String> {
        value.cloned().ok_or_else(|| GeneratorError::MissingField {
            operator: self.kind.clone(),
            field,
        })
    }
}

impl Document {
    /// Parse a document from JSON text
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` if the text is not a valid document
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| GeneratorError::ConfigParse {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    /// Read and parse a document file
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be read and `ConfigParse` if
    /// its contents are not a valid document
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GeneratorError::FileSystem {
            path: path.to_path_buf(),
            operation: "read configuration",
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| GeneratorError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
