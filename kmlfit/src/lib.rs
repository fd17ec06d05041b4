//! KmlFit - camera fitting for KML-style document trees
//!
//! This library extracts coordinates from geographic document trees, computes
//! a LookAt camera that frames them, and walks the trees with a steerable
//! depth-first visitor.
//!
//! # Modules
//!
//! - [`coord`]: coordinates, bounds and great-circle distance
//! - [`document`]: the node tree and its JSON loader
//! - [`extract`]: coordinate extraction
//! - [`fit`]: LookAt computation
//! - [`walk`]: depth-first traversal
//! - [`catalog`]: directory catalogs of KML files
//! - [`config`] and [`logging`]: ambient setup for the CLI
//!
//! # Example
//!
//! ```
//! use kmlfit::{compute_fit, parse_document};
//!
//! let tree = parse_document(r#"{
//!     "kind": "folder",
//!     "children": [
//!         {"kind": "placemark", "geometry": {"kind": "point", "lat": 10.0, "lng": 20.0}},
//!         {"kind": "placemark", "geometry": {"kind": "point", "lat": 12.0, "lng": 22.0}}
//!     ]
//! }"#).unwrap();
//!
//! let look_at = compute_fit(&tree, Some(1.5)).unwrap();
//! assert!((look_at.latitude - 11.0).abs() < 1e-9);
//! ```

pub mod catalog;
pub mod config;
pub mod coord;
pub mod document;
pub mod extract;
pub mod fit;
pub mod logging;
pub mod walk;

pub use catalog::build_catalog;
pub use config::ConfigFile;
pub use coord::{great_circle_distance, Coordinate, LatLng, LatLngBounds};
pub use document::{load_document, parse_document, AltitudeMode, Node};
pub use extract::{extract, Extraction};
pub use fit::{compute_fit, FitCalculator, FitConfig, LookAt};
pub use logging::init_logging;
pub use walk::{walk, Step, WalkOptions, WalkOutcome};
