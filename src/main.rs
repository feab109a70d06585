//! CLI entry point for rendering layered operator maps

use clap::Parser;
use env_logger::Env;
use layerforge::io::cli::{Cli, FileProcessor};

fn main() -> layerforge::Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.quiet { "error" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
