//! KML-style document tree.
//!
//! A document is a tree of [`Node`]s. Features (groups, placemarks, ground
//! overlays) organise the tree and geometries (points, lines, rings, polygons,
//! models) carry the coordinates. Every kind is a variant of one closed enum so
//! consumers dispatch with an exhaustive `match`.
//!
//! Documents are usually loaded from JSON, see [`parse_document`] and
//! [`load_document`]. The `"kind"` field selects the variant:
//!
//! ```
//! use kmlfit::document::{parse_document, Node};
//!
//! let node = parse_document(r#"{
//!     "kind": "placemark",
//!     "name": "Googleplex",
//!     "geometry": { "kind": "point", "lat": 37.4219, "lng": -122.0840 }
//! }"#).unwrap();
//!
//! assert!(matches!(node, Node::Placemark(_)));
//! ```

mod load;

pub use load::{load_document, parse_document, DocumentError, DocumentResult};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coord::Coordinate;
use crate::fit::LookAt;

/// How altitudes of a geometry are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AltitudeMode {
    /// Altitude is ignored, the geometry sits on the terrain.
    ClampToGround,
    /// Altitude is relative to the terrain.
    RelativeToGround,
    /// Altitude is relative to sea level.
    Absolute,
    /// Altitude is ignored, the geometry sits on the sea floor.
    ClampToSeaFloor,
    /// Altitude is relative to the sea floor.
    RelativeToSeaFloor,
}

impl AltitudeMode {
    /// The KML element value for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            AltitudeMode::ClampToGround => "clampToGround",
            AltitudeMode::RelativeToGround => "relativeToGround",
            AltitudeMode::Absolute => "absolute",
            AltitudeMode::ClampToSeaFloor => "clampToSeaFloor",
            AltitudeMode::RelativeToSeaFloor => "relativeToSeaFloor",
        }
    }

    /// Whether this is one of the sea floor extension modes.
    pub fn is_sea_floor(&self) -> bool {
        matches!(
            self,
            AltitudeMode::ClampToSeaFloor | AltitudeMode::RelativeToSeaFloor
        )
    }
}

impl fmt::Display for AltitudeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown altitude mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown altitude mode: {0}")]
pub struct ParseAltitudeModeError(pub String);

impl FromStr for AltitudeMode {
    type Err = ParseAltitudeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clampToGround" => Ok(AltitudeMode::ClampToGround),
            "relativeToGround" => Ok(AltitudeMode::RelativeToGround),
            "absolute" => Ok(AltitudeMode::Absolute),
            "clampToSeaFloor" => Ok(AltitudeMode::ClampToSeaFloor),
            "relativeToSeaFloor" => Ok(AltitudeMode::RelativeToSeaFloor),
            other => Err(ParseAltitudeModeError(other.to_string())),
        }
    }
}

/// North/south/east/west extent of a ground overlay, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLonBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// A folder or document: an ordered list of child features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Authored camera view, takes precedence over a computed fit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<LookAt>,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A feature with at most one attached geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placemark {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Authored camera view, takes precedence over a computed fit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<LookAt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Box<Node>>,
}

/// An image draped over a lat/lon box at a single altitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Authored camera view, takes precedence over a computed fit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<LookAt>,
    pub lat_lon_box: LatLonBox,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_mode: Option<AltitudeMode>,
}

/// A collection of geometries treated as one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiGeometry {
    #[serde(default)]
    pub geometries: Vec<Node>,
}

/// A 3D model placed at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub location: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_mode: Option<AltitudeMode>,
}

/// A polygon with one outer boundary and any number of holes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_boundary: Option<Box<Node>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inner_boundaries: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_mode: Option<AltitudeMode>,
}

/// An ordered coordinate list, shared by line strings and linear rings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_mode: Option<AltitudeMode>,
}

/// A single placed point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_mode: Option<AltitudeMode>,
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    #[serde(alias = "folder", alias = "document")]
    Group(Group),
    Placemark(Placemark),
    GroundOverlay(GroundOverlay),
    MultiGeometry(MultiGeometry),
    Model(Model),
    Polygon(Polygon),
    LinearRing(Path),
    LineString(Path),
    Point(Point),
    Coordinate(Coordinate),
    Location(Coordinate),
    /// A kind that carries no geometry (screen overlay, network link, ...).
    #[serde(other)]
    Unsupported,
}

impl Node {
    /// Short kind name, as used in the JSON `"kind"` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Group(_) => "group",
            Node::Placemark(_) => "placemark",
            Node::GroundOverlay(_) => "ground_overlay",
            Node::MultiGeometry(_) => "multi_geometry",
            Node::Model(_) => "model",
            Node::Polygon(_) => "polygon",
            Node::LinearRing(_) => "linear_ring",
            Node::LineString(_) => "line_string",
            Node::Point(_) => "point",
            Node::Coordinate(_) => "coordinate",
            Node::Location(_) => "location",
            Node::Unsupported => "unsupported",
        }
    }

    /// Feature name, if this kind has one and it is set.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Group(g) => g.name.as_deref(),
            Node::Placemark(p) => p.name.as_deref(),
            Node::GroundOverlay(o) => o.name.as_deref(),
            _ => None,
        }
    }

    /// The altitude mode declared on this node, if any.
    pub fn altitude_mode(&self) -> Option<AltitudeMode> {
        match self {
            Node::GroundOverlay(o) => o.altitude_mode,
            Node::Model(m) => m.altitude_mode,
            Node::Polygon(p) => p.altitude_mode,
            Node::LinearRing(path) | Node::LineString(path) => path.altitude_mode,
            Node::Point(p) => p.altitude_mode,
            _ => None,
        }
    }

    /// The authored camera view of a feature.
    pub fn view(&self) -> Option<&LookAt> {
        match self {
            Node::Group(g) => g.view.as_ref(),
            Node::Placemark(p) => p.view.as_ref(),
            Node::GroundOverlay(o) => o.view.as_ref(),
            _ => None,
        }
    }

    /// Child features of a group. `None` for every other kind.
    pub fn features(&self) -> Option<&[Node]> {
        match self {
            Node::Group(g) => Some(&g.children),
            _ => None,
        }
    }

    /// The geometry attached to a placemark.
    pub fn geometry(&self) -> Option<&Node> {
        match self {
            Node::Placemark(p) => p.geometry.as_deref(),
            _ => None,
        }
    }

    /// Child geometries of a multi-geometry. `None` for every other kind.
    pub fn geometries(&self) -> Option<&[Node]> {
        match self {
            Node::MultiGeometry(m) => Some(&m.geometries),
            _ => None,
        }
    }

    /// Inner boundaries (holes) of a polygon. `None` for every other kind.
    pub fn inner_boundaries(&self) -> Option<&[Node]> {
        match self {
            Node::Polygon(p) => Some(&p.inner_boundaries),
            _ => None,
        }
    }
}

/// Builders used by tests and callers assembling trees in code.
impl Node {
    /// A group of child features.
    pub fn group(children: Vec<Node>) -> Self {
        Node::Group(Group {
            children,
            ..Default::default()
        })
    }

    /// A placemark wrapping a geometry.
    pub fn placemark(geometry: Node) -> Self {
        Node::Placemark(Placemark {
            geometry: Some(Box::new(geometry)),
            ..Default::default()
        })
    }

    /// A point at the given position.
    pub fn point(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Node::Point(Point {
            coordinate: Coordinate::new(latitude, longitude, altitude),
            altitude_mode: None,
        })
    }

    /// A line string through the given coordinates.
    pub fn line_string(coordinates: Vec<Coordinate>) -> Self {
        Node::LineString(Path {
            coordinates,
            altitude_mode: None,
        })
    }

    /// A linear ring through the given coordinates.
    pub fn linear_ring(coordinates: Vec<Coordinate>) -> Self {
        Node::LinearRing(Path {
            coordinates,
            altitude_mode: None,
        })
    }

    /// Set the altitude mode on kinds that carry one; other kinds are
    /// returned unchanged.
    pub fn with_altitude_mode(mut self, mode: AltitudeMode) -> Self {
        match &mut self {
            Node::GroundOverlay(o) => o.altitude_mode = Some(mode),
            Node::Model(m) => m.altitude_mode = Some(mode),
            Node::Polygon(p) => p.altitude_mode = Some(mode),
            Node::LinearRing(path) | Node::LineString(path) => path.altitude_mode = Some(mode),
            Node::Point(p) => p.altitude_mode = Some(mode),
            _ => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_altitude_mode_roundtrip_names() {
        for mode in [
            AltitudeMode::ClampToGround,
            AltitudeMode::RelativeToGround,
            AltitudeMode::Absolute,
            AltitudeMode::ClampToSeaFloor,
            AltitudeMode::RelativeToSeaFloor,
        ] {
            assert_eq!(mode.as_str().parse::<AltitudeMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_altitude_mode_parse_unknown() {
        let err = "floating".parse::<AltitudeMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown altitude mode: floating");
    }

    #[test]
    fn test_altitude_mode_sea_floor() {
        assert!(AltitudeMode::ClampToSeaFloor.is_sea_floor());
        assert!(!AltitudeMode::Absolute.is_sea_floor());
    }

    #[test]
    fn test_capabilities_by_kind() {
        let group = Node::group(vec![Node::point(0.0, 0.0, 0.0)]);
        assert_eq!(group.features().map(<[Node]>::len), Some(1));
        assert!(group.geometry().is_none());
        assert!(group.geometries().is_none());

        let placemark = Node::placemark(Node::point(1.0, 2.0, 3.0));
        assert!(placemark.features().is_none());
        assert_eq!(placemark.geometry().map(Node::kind), Some("point"));

        let polygon = Node::Polygon(Polygon {
            outer_boundary: Some(Box::new(Node::linear_ring(vec![]))),
            inner_boundaries: vec![Node::linear_ring(vec![])],
            altitude_mode: None,
        });
        assert_eq!(polygon.inner_boundaries().map(<[Node]>::len), Some(1));
    }

    #[test]
    fn test_with_altitude_mode() {
        let point = Node::point(0.0, 0.0, 0.0).with_altitude_mode(AltitudeMode::Absolute);
        assert_eq!(point.altitude_mode(), Some(AltitudeMode::Absolute));

        // Groups have no altitude mode
        let group = Node::group(vec![]).with_altitude_mode(AltitudeMode::Absolute);
        assert_eq!(group.altitude_mode(), None);
    }

    #[test]
    fn test_name_and_view() {
        let node = Node::Group(Group {
            name: Some("Trip".to_string()),
            ..Default::default()
        });
        assert_eq!(node.name(), Some("Trip"));
        assert!(node.view().is_none());
        assert_eq!(Node::point(0.0, 0.0, 0.0).name(), None);
    }
}
