//! Camera fitting.
//!
//! Computes a [`LookAt`] that frames every coordinate of a document subtree.
//!
//! # Range calculation
//!
//! For two or more points the bounding box is measured in meters along the
//! center parallel (`lng_span`) and the center meridian (`lat_span`). The
//! wider of the two is turned into an angle subtended at the Earth's center
//! and combined with an empirically tuned field-of-view term:
//!
//! ```text
//! aspect_use = max(aspect_ratio, min(1, lng_span / lat_span))
//! alpha      = 45 / (aspect_use + 0.4) - 2                      (degrees)
//! beta       = min(90°, alpha + wider_span / 2 / EARTH_RADIUS)
//! range      = pad * EARTH_RADIUS * (sin(beta) * sqrt(1 / tan(alpha)² + 1) - 1)
//! ```
//!
//! The constants were calibrated against a globe renderer's framing and are
//! kept as-is.
//!
//! # Example
//!
//! ```
//! use kmlfit::document::Node;
//! use kmlfit::fit::compute_fit;
//!
//! let tree = Node::group(vec![
//!     Node::point(37.0, -122.0, 0.0),
//!     Node::point(38.0, -121.0, 0.0),
//! ]);
//!
//! let look_at = compute_fit(&tree, None).unwrap();
//! assert!((look_at.latitude - 37.5).abs() < 1e-9);
//! assert!(look_at.range > 0.0);
//! ```

mod lookat;

pub use lookat::LookAt;

use tracing::{debug, warn};

use crate::coord::{great_circle_distance, LatLng, EARTH_RADIUS_M};
use crate::document::Node;
use crate::extract::{extract, Extraction};

/// Default padding multiplier applied to the computed range (50% margin).
pub const DEFAULT_PAD_FACTOR: f64 = 1.5;

/// Default range in meters when there is only one point to frame.
pub const DEFAULT_SINGLE_POINT_RANGE: f64 = 1000.0;

/// Default viewport aspect ratio (width / height).
pub const DEFAULT_ASPECT_RATIO: f64 = 1.0;

/// Tunable constants for the fit calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    /// Multiplier applied to the computed range.
    pub pad_factor: f64,
    /// Range used when the extent cannot be measured.
    pub single_point_range: f64,
    /// Aspect ratio used when the caller supplies none.
    pub default_aspect_ratio: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            pad_factor: DEFAULT_PAD_FACTOR,
            single_point_range: DEFAULT_SINGLE_POINT_RANGE,
            default_aspect_ratio: DEFAULT_ASPECT_RATIO,
        }
    }
}

impl FitConfig {
    /// Set the padding multiplier.
    pub fn with_pad_factor(mut self, pad_factor: f64) -> Self {
        self.pad_factor = pad_factor;
        self
    }

    /// Set the single point range.
    pub fn with_single_point_range(mut self, range: f64) -> Self {
        self.single_point_range = range;
        self
    }

    /// Set the fallback aspect ratio.
    pub fn with_default_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.default_aspect_ratio = aspect_ratio;
        self
    }
}

/// Computes [`LookAt`] views for document subtrees.
#[derive(Debug, Clone, Default)]
pub struct FitCalculator {
    config: FitConfig,
}

impl FitCalculator {
    /// Create a calculator with custom constants.
    pub fn new(config: FitConfig) -> Self {
        Self { config }
    }

    /// The constants in use.
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Compute the view that frames `node`.
    ///
    /// An authored view on the node is returned verbatim. Returns `None` when
    /// there is nothing to frame.
    ///
    /// # Arguments
    ///
    /// * `node` - Root of the subtree to frame
    /// * `aspect_ratio` - Viewport width / height; absent, zero or non-finite
    ///   values fall back to the configured default
    pub fn compute(&self, node: &Node, aspect_ratio: Option<f64>) -> Option<LookAt> {
        let extraction = extract(Some(node));

        if let Some(view) = node.view() {
            debug!(kind = node.kind(), "using authored view");
            return Some(view.clone());
        }

        self.fit_extraction(&extraction, aspect_ratio)
    }

    /// Compute the view that frames an existing extraction.
    pub fn fit_extraction(
        &self,
        extraction: &Extraction,
        aspect_ratio: Option<f64>,
    ) -> Option<LookAt> {
        let (center, range) = match extraction.coordinates.as_slice() {
            [] => return None,
            [only] => (only.lat_lng(), self.config.single_point_range),
            _ => {
                let bounds = extraction.bounds()?;
                let center = bounds.center();
                let lng_span = great_circle_distance(
                    LatLng::new(center.lat, bounds.west),
                    LatLng::new(center.lat, bounds.east),
                );
                let lat_span = great_circle_distance(
                    LatLng::new(bounds.south, center.lng),
                    LatLng::new(bounds.north, center.lng),
                );
                (center, self.range_for_spans(lng_span, lat_span, aspect_ratio))
            }
        };

        debug!(
            points = extraction.len(),
            center = %center,
            range,
            "computed fit"
        );

        Some(LookAt {
            latitude: center.lat,
            longitude: center.lng,
            altitude: extraction.max_altitude.unwrap_or_default(),
            altitude_mode: extraction.altitude_mode,
            tilt: 0.0,
            heading: 0.0,
            range,
        })
    }

    /// Camera range in meters for a box measuring `lng_span` by `lat_span`.
    pub fn range_for_spans(&self, lng_span: f64, lat_span: f64, aspect_ratio: Option<f64>) -> f64 {
        if lng_span == 0.0 && lat_span == 0.0 {
            // Coincident points have no extent
            return self.config.single_point_range;
        }

        let aspect_ratio = match aspect_ratio {
            Some(r) if r != 0.0 && r.is_finite() => r,
            _ => self.config.default_aspect_ratio,
        };

        // A zero-height box is as wide as it gets
        let span_ratio = if lat_span == 0.0 {
            1.0
        } else {
            (lng_span / lat_span).min(1.0)
        };
        let aspect_use = aspect_ratio.max(span_ratio);

        let alpha = (45.0 / (aspect_use + 0.4) - 2.0).to_radians();
        let wider_span = if lng_span > lat_span {
            lng_span
        } else {
            lat_span
        };
        let beta = 90.0_f64
            .to_radians()
            .min(alpha + wider_span / 2.0 / EARTH_RADIUS_M);

        let range = self.config.pad_factor
            * EARTH_RADIUS_M
            * (beta.sin() * (1.0 / alpha.tan().powi(2) + 1.0).sqrt() - 1.0);

        if range.is_finite() && range >= 0.0 {
            range
        } else {
            warn!(
                lng_span,
                lat_span, aspect_use, "degenerate fit, falling back to single point range"
            );
            self.config.single_point_range
        }
    }
}

/// Compute the view that frames `node` with the default constants.
///
/// See [`FitCalculator::compute`].
pub fn compute_fit(node: &Node, aspect_ratio: Option<f64>) -> Option<LookAt> {
    FitCalculator::default().compute(node, aspect_ratio)
}
