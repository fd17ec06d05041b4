//! Catalog command - index a directory of KML files as JSON.

use std::fs;
use std::path::PathBuf;

use kmlfit::catalog::build_catalog;
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the catalog command, writing to `output` or stdout.
pub fn run(dir: PathBuf, output: Option<PathBuf>, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(verbose)?;
    runner.log_startup("catalog");

    let json = build_catalog(&dir)?.to_json()?;
    match output {
        Some(path) => {
            fs::write(&path, json + "\n")?;
            info!(path = %path.display(), "wrote catalog");
            println!("Catalog written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
