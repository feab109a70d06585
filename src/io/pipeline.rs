//! Ordered operator pipeline built from a map document
//!
//! Steps run strictly in sequence against one generator and one random
//! stream. A failing step is logged and recorded; the run carries on with the
//! next step.

use std::fmt;
use std::path::Path;

use log::{debug, info, warn};

use crate::io::configuration::{
    BASE_LAYER, DEFAULT_CHANNELS, DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_WIDTH,
};
use crate::io::document::Document;
use crate::io::error::{GeneratorError, Result, invalid_parameter};
use crate::math::random::NoiseSource;
use crate::operators::{BinaryOperator, UnaryOperator};
use crate::raster::Generator;

/// One operator application with its resolved layer names
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Unary operator on one layer
    Unary {
        /// Target layer
        layer: String,
        /// Optional mask layer
        mask: Option<String>,
        /// Operator to apply
        operator: UnaryOperator,
    },
    /// Binary operator on two layers
    Binary {
        /// First operand, written by every binary operator
        layer0: String,
        /// Second operand
        layer1: String,
        /// Optional mask layer
        mask: Option<String>,
        /// Operator to apply
        operator: BinaryOperator,
    },
}

impl Step {
    /// Name of the operator this step applies
    pub const fn operator_name(&self) -> &'static str {
        match self {
            Self::Unary { operator, .. } => operator.name(),
            Self::Binary { operator, .. } => operator.name(),
        }
    }

    /// Run this step against a generator
    ///
    /// # Errors
    ///
    /// Returns whatever the generator dispatch reports
    pub fn apply(&self, generator: &mut Generator, rng: &mut NoiseSource) -> Result<()> {
        match self {
            Self::Unary {
                layer,
                mask,
                operator,
            } => generator.apply_unary(layer, operator, mask.as_deref(), rng),
            Self::Binary {
                layer0,
                layer1,
                mask,
                operator,
            } => generator.apply_binary(layer0, layer1, operator, mask.as_deref()),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unary {
                layer,
                mask,
                operator,
            } => {
                write!(f, "{} on '{layer}'", operator.name())?;
                if let Some(mask) = mask {
                    write!(f, " masked by '{mask}'")?;
                }
                Ok(())
            }
            Self::Binary {
                layer0,
                layer1,
                mask,
                operator,
            } => {
                write!(f, "{} on '{layer0}' and '{layer1}'", operator.name())?;
                if let Some(mask) = mask {
                    write!(f, " masked by '{mask}'")?;
                }
                Ok(())
            }
        }
    }
}

/// Size and channel count of a layer to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerDescriptor {
    /// Layer name
    pub name: String,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Channels per pixel
    pub channels: usize,
}

/// Command-line values that replace document values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Replacement seed
    pub seed: Option<u64>,
    /// Replacement map width
    pub width: Option<usize>,
    /// Replacement map height
    pub height: Option<usize>,
}

/// A step that failed during a run
#[derive(Debug)]
pub struct StepFailure {
    /// Position of the step in the pipeline
    pub index: usize,
    /// Human-readable description of the step
    pub description: String,
    /// Reported failure
    pub error: GeneratorError,
}

/// Outcome of a pipeline run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Number of steps that succeeded
    pub applied: usize,
    /// Steps that failed, in order
    pub failures: Vec<StepFailure>,
}

impl RunReport {
    /// Whether every step succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Normalised map description ready to run
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    /// Map width, used by layers without their own
    pub width: usize,
    /// Map height, used by layers without their own
    pub height: usize,
    /// Seed of the random stream
    pub seed: u64,
    /// Layers in creation order
    pub layers: Vec<LayerDescriptor>,
    /// Steps in execution order
    pub steps: Vec<Step>,
}

impl Pipeline {
    /// Build a pipeline from a parsed document
    ///
    /// Operator entries with an unknown type or a missing target field are
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `MissingBaseLayer` if no layer is named `base`, and
    /// `InvalidParameter` for zero sizes, a repeated `base` declaration or
    /// unusable FBM parameters
    pub fn from_document(document: &Document, overrides: &Overrides) -> Result<Self> {
        let map = &document.map;
        let width = overrides.width.or(map.width).unwrap_or(DEFAULT_WIDTH);
        let height = overrides.height.or(map.height).unwrap_or(DEFAULT_HEIGHT);
        let seed = overrides.seed.or(map.seed).unwrap_or(DEFAULT_SEED);
        require_positive("width", width)?;
        require_positive("height", height)?;

        let mut layers = Vec::with_capacity(map.layers.len());
        for entry in &map.layers {
            let descriptor = LayerDescriptor {
                name: entry.name.clone(),
                width: entry.width.unwrap_or(width),
                height: entry.height.unwrap_or(height),
                channels: entry.channels.unwrap_or(DEFAULT_CHANNELS),
            };
            require_positive("width", descriptor.width)?;
            require_positive("height", descriptor.height)?;
            require_positive("channels", descriptor.channels)?;
            layers.push(descriptor);
        }

        match layers.iter().filter(|layer| layer.name == BASE_LAYER).count() {
            0 => return Err(GeneratorError::MissingBaseLayer),
            1 => {}
            count => {
                return Err(invalid_parameter(
                    "layers",
                    &BASE_LAYER,
                    &format!("declared {count} times"),
                ));
            }
        }

        let mut steps = Vec::with_capacity(map.operators.len());
        for (index, entry) in map.operators.iter().enumerate() {
            match entry.to_step() {
                Ok(step) => steps.push(step),
                Err(
                    error @ (GeneratorError::UnknownOperator { .. }
                    | GeneratorError::MissingField { .. }),
                ) => warn!("Skipping operator {index}: {error}"),
                Err(error) => return Err(error),
            }
        }

        Ok(Self {
            width,
            height,
            seed,
            layers,
            steps,
        })
    }

    /// Parse a document file and build a pipeline from it
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or for any
    /// reason [`Pipeline::from_document`] fails
    pub fn from_path(path: &Path, overrides: &Overrides) -> Result<Self> {
        let document = Document::from_path(path)?;
        Self::from_document(&document, overrides)
    }

    /// Parse JSON text and build a pipeline from it
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed, or for any reason
    /// [`Pipeline::from_document`] fails
    pub fn from_json_str(text: &str, overrides: &Overrides) -> Result<Self> {
        let document = Document::from_json_str(text)?;
        Self::from_document(&document, overrides)
    }

    /// Create every layer and apply every step
    ///
    /// # Errors
    ///
    /// Returns an error only if a layer cannot be created; step failures are
    /// collected in the report
    pub fn run(&self) -> Result<(Generator, RunReport)> {
        self.run_with_progress(|_, _| {})
    }

    /// Like [`Pipeline::run`], calling `on_step` before each step
    ///
    /// # Errors
    ///
    /// Returns an error only if a layer cannot be created
    pub fn run_with_progress<F>(&self, mut on_step: F) -> Result<(Generator, RunReport)>
    where
        F: FnMut(usize, &Step),
    {
        let mut generator = Generator::new();
        for layer in &self.layers {
            if generator.create_layer(&layer.name, layer.width, layer.height, layer.channels)? {
                info!(
                    "Created layer {} with {} channels",
                    layer.name, layer.channels
                );
            }
        }

        let mut rng = NoiseSource::new(self.seed);
        let mut report = RunReport::default();
        for (index, step) in self.steps.iter().enumerate() {
            on_step(index, step);
            match step.apply(&mut generator, &mut rng) {
                Ok(()) => {
                    info!("Applied {step}");
                    report.applied += 1;
                }
                Err(error) => {
                    warn!("Failed to apply {step}: {error}");
                    report.failures.push(StepFailure {
                        index,
                        description: step.to_string(),
                        error,
                    });
                }
            }
        }

        debug!(
            "Pipeline finished: {} applied, {} failed, {} draws",
            report.applied,
            report.failures.len(),
            rng.draws()
        );
        Ok((generator, report))
    }
}

fn require_positive(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(invalid_parameter(parameter, &value, &"must be positive"));
    }
    Ok(())
}
