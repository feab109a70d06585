//! Command-line interface for rendering map documents to images

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use log::{info, warn};

use crate::io::configuration::{BASE_LAYER, CONFIG_EXTENSION, OUTPUT_EXTENSION};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_layer;
use crate::io::pipeline::{Overrides, Pipeline};
use crate::io::progress::ProgressManager;

#[derive(Parser, Debug)]
#[command(name = "layerforge")]
#[command(
    author,
    version,
    about = "Render procedural textures from layered operator maps"
)]
/// Command-line arguments for the renderer
pub struct Cli {
    /// Map document (JSON) or directory of map documents
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output image path (only with a single map document)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Seed replacing the one in the document
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Map width replacing the one in the document
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Map height replacing the one in the document
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Render maps even if their output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Document values replaced from the command line
    pub const fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            width: self.width,
            height: self.height,
        }
    }
}

/// Renders every selected map document with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a processor for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Render the target according to the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the target is not a map document or directory, or
    /// if a document cannot be loaded or its image cannot be written
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Map documents selected by the target, minus those already rendered
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a JSON file nor a readable
    /// directory, or if `--output` is combined with a directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_config(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"must be a JSON map document",
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                Vec::new()
            })
        } else if target.is_dir() {
            if self.cli.output.is_some() {
                return Err(invalid_parameter(
                    "output",
                    &target.display(),
                    &"only valid with a single map document",
                ));
            }
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_config(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a JSON map document or directory",
            ))
        }
    }

    /// Image path written for a map document
    pub fn output_path(&self, input_path: &Path) -> PathBuf {
        self.cli
            .output
            .clone()
            .unwrap_or_else(|| input_path.with_extension(OUTPUT_EXTENSION))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path);
        if output_path.exists() {
            info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path(input_path);
        let pipeline = Pipeline::from_path(input_path, &self.cli.overrides())?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_map(index, input_path, pipeline.steps.len());
        }

        let progress = &mut self.progress_manager;
        let (generator, report) = pipeline.run_with_progress(|step, _| {
            if let Some(pm) = progress.as_mut() {
                pm.update_step(index, step + 1);
            }
        })?;

        if !report.is_clean() {
            warn!(
                "{}: {} of {} steps failed",
                input_path.display(),
                report.failures.len(),
                pipeline.steps.len()
            );
        }

        export_layer(&generator, BASE_LAYER, &output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_map(index);
        }
        info!(
            "Rendered {} to {} in {:.2?}",
            input_path.display(),
            output_path.display(),
            start_time.elapsed()
        );

        Ok(())
    }
}

fn is_config(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(CONFIG_EXTENSION)
}
