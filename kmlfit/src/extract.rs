//! Coordinate extraction from document trees.
//!
//! Walks a [`Node`] and collects every coordinate reachable from it, in
//! document order, together with the highest altitude seen and the first
//! altitude mode declared along the way.
//!
//! # Altitude mode
//!
//! The first declared mode wins. A node's own mode is claimed before its
//! children are visited, and a child's mode is only adopted while the parent's
//! is still unset, so siblings and ancestors never overwrite it.

use tracing::trace;

use crate::coord::{Coordinate, LatLngBounds};
use crate::document::{AltitudeMode, Node};

/// Everything extracted from a document subtree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Coordinates in traversal order.
    pub coordinates: Vec<Coordinate>,
    /// Highest altitude among `coordinates`, `None` when empty.
    pub max_altitude: Option<f64>,
    /// First altitude mode declared in the subtree.
    pub altitude_mode: Option<AltitudeMode>,
}

impl Extraction {
    /// Create an empty extraction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of extracted coordinates.
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Bounding box over the extracted coordinates.
    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.coordinates.iter().map(Coordinate::lat_lng))
    }

    /// Append a coordinate and track its altitude.
    pub fn push(&mut self, coordinate: Coordinate) {
        self.raise_max_altitude(Some(coordinate.altitude));
        self.coordinates.push(coordinate);
    }

    /// Adopt `mode` unless a mode is already set.
    pub fn claim_altitude_mode(&mut self, mode: Option<AltitudeMode>) {
        if self.altitude_mode.is_none() {
            self.altitude_mode = mode;
        }
    }

    /// Merge a child extraction into this one.
    ///
    /// Coordinates are appended, the max altitude is the larger of the two and
    /// the child's altitude mode only fills an unset one.
    pub fn merge(&mut self, child: Extraction) {
        self.coordinates.extend(child.coordinates);
        self.raise_max_altitude(child.max_altitude);
        self.claim_altitude_mode(child.altitude_mode);
    }

    fn raise_max_altitude(&mut self, altitude: Option<f64>) {
        self.max_altitude = match (self.max_altitude, altitude) {
            (Some(current), Some(new)) => Some(current.max(new)),
            (current, new) => current.or(new),
        };
    }
}

/// Extract all coordinates reachable from `node`.
///
/// An absent node or a kind without geometry yields an empty extraction.
pub fn extract(node: Option<&Node>) -> Extraction {
    let mut out = Extraction::new();
    let Some(node) = node else {
        return out;
    };

    out.claim_altitude_mode(node.altitude_mode());

    match node {
        Node::Group(group) => {
            for child in &group.children {
                out.merge(extract(Some(child)));
            }
        }
        Node::Placemark(placemark) => {
            // The placemark is exactly its geometry
            return extract(placemark.geometry.as_deref());
        }
        Node::GroundOverlay(overlay) => {
            let b = overlay.lat_lon_box;
            let alt = overlay.altitude;
            out.push(Coordinate::new(b.north, b.east, alt));
            out.push(Coordinate::new(b.north, b.west, alt));
            out.push(Coordinate::new(b.south, b.east, alt));
            out.push(Coordinate::new(b.south, b.west, alt));
        }
        Node::MultiGeometry(multi) => {
            for geometry in &multi.geometries {
                out.merge(extract(Some(geometry)));
            }
        }
        Node::Model(model) => out.push(model.location),
        Node::Polygon(polygon) => {
            // Holes never widen the extent
            out.merge(extract(polygon.outer_boundary.as_deref()));
        }
        Node::LinearRing(path) | Node::LineString(path) => {
            for &coordinate in &path.coordinates {
                out.push(coordinate);
            }
        }
        Node::Point(point) => out.push(point.coordinate),
        Node::Coordinate(coordinate) | Node::Location(coordinate) => out.push(*coordinate),
        Node::Unsupported => {}
    }

    trace!(kind = node.kind(), points = out.len(), "extracted node");
    out
}

impl Node {
    /// Extract all coordinates reachable from this node.
    pub fn extract(&self) -> Extraction {
        extract(Some(self))
    }
}
