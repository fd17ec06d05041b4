//! Loading documents from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::Node;

/// Result type for document loading.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that can occur while loading a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not describe a node tree.
    #[error("invalid document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a document tree from a JSON string.
pub fn parse_document(json: &str) -> DocumentResult<Node> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a JSON document file.
pub fn load_document(path: &Path) -> DocumentResult<Node> {
    let json = fs::read_to_string(path).map_err(|source| DocumentError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let node = parse_document(&json)?;
    debug!(path = %path.display(), kind = node.kind(), "loaded document");
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinate;
    use crate::document::{AltitudeMode, Group, LatLonBox, Path as NodePath};

    #[test]
    fn test_parse_folder_alias() {
        let node = parse_document(r#"{"kind": "folder", "name": "Trip", "children": []}"#).unwrap();
        assert_eq!(
            node,
            Node::Group(Group {
                name: Some("Trip".to_string()),
                view: None,
                children: vec![],
            })
        );
    }

    #[test]
    fn test_parse_document_alias_without_children() {
        let node = parse_document(r#"{"kind": "document"}"#).unwrap();
        assert_eq!(node.features().map(<[Node]>::len), Some(0));
    }

    #[test]
    fn test_parse_point_with_mode() {
        let node = parse_document(
            r#"{"kind": "point", "lat": 37.4, "lng": -122.1, "alt": 12, "altitude_mode": "relativeToGround"}"#,
        )
        .unwrap();
        assert_eq!(
            node,
            Node::point(37.4, -122.1, 12.0).with_altitude_mode(AltitudeMode::RelativeToGround)
        );
    }

    #[test]
    fn test_parse_line_string() {
        let node = parse_document(
            r#"{"kind": "line_string", "coordinates": [
                {"lat": 0, "lng": 0},
                {"lat": 1, "lng": 1, "alt": 5}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            node,
            Node::LineString(NodePath {
                coordinates: vec![Coordinate::new(0.0, 0.0, 0.0), Coordinate::new(1.0, 1.0, 5.0)],
                altitude_mode: None,
            })
        );
    }

    #[test]
    fn test_parse_ground_overlay() {
        let node = parse_document(
            r#"{"kind": "ground_overlay",
                "lat_lon_box": {"north": 10, "south": 0, "east": 10, "west": 0},
                "altitude": 5}"#,
        )
        .unwrap();
        match node {
            Node::GroundOverlay(overlay) => {
                assert_eq!(
                    overlay.lat_lon_box,
                    LatLonBox {
                        north: 10.0,
                        south: 0.0,
                        east: 10.0,
                        west: 0.0
                    }
                );
                assert_eq!(overlay.altitude, 5.0);
            }
            other => panic!("expected ground overlay, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_kind_is_unsupported() {
        let node = parse_document(
            r#"{"kind": "group", "children": [{"kind": "screen_overlay", "href": "logo.png"}]}"#,
        )
        .unwrap();
        assert_eq!(node.features(), Some(&[Node::Unsupported][..]));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_document("{not json").unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
        assert!(err.to_string().starts_with("invalid document"));
    }

    #[test]
    fn test_parse_missing_kind() {
        assert!(parse_document(r#"{"lat": 1, "lng": 2}"#).is_err());
    }

    #[test]
    fn test_load_document_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, DocumentError::ReadFailed { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_load_document_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(
            &path,
            r#"{"kind": "placemark", "geometry": {"kind": "point", "lat": 1, "lng": 2}}"#,
        )
        .unwrap();

        let node = load_document(&path).unwrap();
        assert_eq!(node, Node::placemark(Node::point(1.0, 2.0, 0.0)));
    }
}
