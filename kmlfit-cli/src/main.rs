//! KmlFit CLI - Command-line interface
//!
//! Frames KML-style documents with a LookAt camera, lists their coordinates
//! and structure, and builds catalogs of KML directories.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::fit::{FitArgs, OutputFormat};
use commands::outline::OutlineArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "kmlfit")]
#[command(version, about = "Compute camera views that frame KML-style documents", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the LookAt that frames a document
    Fit {
        /// Document to fit (JSON node tree)
        file: PathBuf,

        /// Viewport width / height
        #[arg(long)]
        aspect_ratio: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print every coordinate a document contributes
    Extract {
        /// Document to read (JSON node tree)
        file: PathBuf,
    },

    /// Print the document tree
    Outline {
        /// Document to read (JSON node tree)
        file: PathBuf,

        /// Also descend into geometries
        #[arg(long)]
        geometries: bool,

        /// Do not descend into folder and document children
        #[arg(long)]
        no_features: bool,

        /// Deepest level to expand
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Build a JSON catalog of a directory of KML files
    Catalog {
        /// Directory to scan
        dir: PathBuf,

        /// Write the catalog here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// View and modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result: Result<(), CliError> = match cli.command {
        Commands::Fit {
            file,
            aspect_ratio,
            format,
        } => commands::fit::run(
            FitArgs {
                file,
                aspect_ratio,
                format,
            },
            verbose,
        ),
        Commands::Extract { file } => commands::extract::run(file, verbose),
        Commands::Outline {
            file,
            geometries,
            no_features,
            max_depth,
        } => commands::outline::run(
            OutlineArgs {
                file,
                geometries,
                no_features,
                max_depth,
            },
            verbose,
        ),
        Commands::Catalog { dir, output } => commands::catalog::run(dir, output, verbose),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
