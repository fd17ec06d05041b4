//! Extract command - list every coordinate a document contributes.

use std::path::PathBuf;

use kmlfit::document::load_document;
use kmlfit::extract::Extraction;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the extract command.
pub fn run(file: PathBuf, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(verbose)?;
    runner.log_startup("extract");

    let root = load_document(&file)?;
    let extraction = root.extract();
    debug!(coordinates = extraction.len(), "extracted");

    println!("{}", serde_json::to_string_pretty(&summary(&extraction))?);
    Ok(())
}

/// JSON summary of an extraction.
pub fn summary(extraction: &Extraction) -> Value {
    let bounds = extraction.bounds().map(|b| {
        json!({
            "south": b.south,
            "north": b.north,
            "west": b.west,
            "east": b.east,
        })
    });
    json!({
        "count": extraction.len(),
        "max_altitude": extraction.max_altitude,
        "altitude_mode": extraction.altitude_mode,
        "bounds": bounds,
        "coordinates": extraction.coordinates,
    })
}
