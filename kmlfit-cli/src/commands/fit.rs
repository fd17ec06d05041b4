//! Fit command - compute the LookAt that frames a document.

use std::path::PathBuf;

use clap::ValueEnum;
use kmlfit::document::load_document;
use kmlfit::fit::{FitCalculator, LookAt};
use tracing::debug;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Output format for the computed view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON object
    #[default]
    Json,
    /// KML `<LookAt>` element
    Kml,
}

/// Arguments for the fit command.
pub struct FitArgs {
    pub file: PathBuf,
    pub aspect_ratio: Option<f64>,
    pub format: OutputFormat,
}

/// Run the fit command.
pub fn run(args: FitArgs, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(verbose)?;
    runner.log_startup("fit");

    if let Some(ratio) = args.aspect_ratio {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(CliError::Config(format!(
                "--aspect-ratio must be a positive number, got {}",
                ratio
            )));
        }
    }

    let root = load_document(&args.file)?;
    let calculator = FitCalculator::new(runner.config().fit_config());
    debug!(config = ?calculator.config(), "fitting document");

    let look_at = calculator
        .compute(&root, args.aspect_ratio)
        .ok_or(CliError::NoCoordinates(args.file))?;

    println!("{}", render(&look_at, args.format)?);
    Ok(())
}

/// Render a view in the requested format.
pub fn render(look_at: &LookAt, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(look_at)?),
        OutputFormat::Kml => Ok(look_at.to_kml()),
    }
}
