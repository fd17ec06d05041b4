//! Directory catalog of KML files.
//!
//! Scans a directory tree and builds the item tree a document browser lists:
//! every directory holding KML files (directly or deeper) becomes a branch,
//! every `.kml` file a leaf.
//!
//! # Naming
//!
//! - Directories: the directory name with `_` replaced by spaces
//! - Files: the dot-separated segment right before `.kml`, so
//!   `03.Grand_Canyon.kml` is listed as `Grand Canyon`; files without an
//!   extra dot keep their full file name
//!
//! A leaf gets a `descSource` when an HTML description sits next to it as
//! `<file>.kml.html`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A directory could not be listed.
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog root is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// A catalog: item tree plus the field names a tree widget keys on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    /// Field holding the display label.
    pub label: &'static str,
    /// Field holding the unique identifier.
    pub identifier: &'static str,
    pub items: Vec<CatalogEntry>,
}

/// A directory branch or a KML file leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    /// Path of the file or directory.
    pub source: String,
    /// Path of the HTML description, leaves only.
    #[serde(rename = "descSource", skip_serializing_if = "Option::is_none")]
    pub desc_source: Option<String>,
    /// Child entries, branches only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CatalogEntry>>,
}

impl CatalogEntry {
    /// Whether this entry is a KML file.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Number of KML files at or below this entry.
    pub fn leaf_count(&self) -> usize {
        match &self.children {
            None => 1,
            Some(children) => children.iter().map(CatalogEntry::leaf_count).sum(),
        }
    }
}

impl Catalog {
    /// Total number of KML files in the catalog.
    pub fn leaf_count(&self) -> usize {
        self.items.iter().map(CatalogEntry::leaf_count).sum()
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Build the catalog of every KML file under `root`.
pub fn build_catalog(root: &Path) -> CatalogResult<Catalog> {
    if !root.is_dir() {
        return Err(CatalogError::NotADirectory(root.to_path_buf()));
    }

    let catalog = Catalog {
        label: "name",
        identifier: "source",
        items: scan_dir(root)?,
    };
    info!(
        root = %root.display(),
        files = catalog.leaf_count(),
        "built catalog"
    );
    Ok(catalog)
}

fn scan_dir(path: &Path) -> CatalogResult<Vec<CatalogEntry>> {
    let read_err = |source| CatalogError::ReadDir {
        path: path.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(path)
        .map_err(read_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut items = Vec::new();
    for entry in entries {
        let entry_path = entry.path();
        let file_name = entry.file_name().to_string_lossy().into_owned();

        if entry_path.is_dir() {
            let children = scan_dir(&entry_path)?;
            if children.is_empty() {
                debug!(path = %entry_path.display(), "skipping directory without KML");
                continue;
            }
            items.push(CatalogEntry {
                name: file_name.replace('_', " "),
                source: entry_path.to_string_lossy().into_owned(),
                desc_source: None,
                children: Some(children),
            });
        } else if entry_path.is_file() && file_name.ends_with(".kml") {
            let mut desc = entry_path.clone().into_os_string();
            desc.push(".html");
            let desc_path = PathBuf::from(desc);
            items.push(CatalogEntry {
                name: leaf_name(&file_name),
                source: entry_path.to_string_lossy().into_owned(),
                desc_source: desc_path
                    .is_file()
                    .then(|| desc_path.to_string_lossy().into_owned()),
                children: None,
            });
        }
    }
    Ok(items)
}

/// Display name of a `.kml` file.
fn leaf_name(file_name: &str) -> String {
    let name = file_name
        .strip_suffix(".kml")
        .and_then(|stem| stem.rsplit_once('.'))
        .map(|(_, last)| last)
        .unwrap_or(file_name);
    name.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name("03.Grand_Canyon.kml"), "Grand Canyon");
        assert_eq!(leaf_name("a.b.c.kml"), "c");
        assert_eq!(leaf_name("plain_name.kml"), "plain name.kml");
        assert_eq!(leaf_name(".hidden.kml"), "hidden");
    }

    #[test]
    fn test_build_catalog_structure() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("Parks/01.Yosemite_Valley.kml"));
        touch(&root.join("Parks/01.Yosemite_Valley.kml.html"));
        touch(&root.join("Parks/00.Zion.kml"));
        touch(&root.join("Cities/notes.txt"));
        touch(&root.join("top.kml"));
        fs::create_dir_all(root.join("Empty_Dir")).unwrap();

        let catalog = build_catalog(root).unwrap();
        assert_eq!(catalog.label, "name");
        assert_eq!(catalog.identifier, "source");

        // Cities has no KML and Empty_Dir is empty, both skipped
        let names: Vec<&str> = catalog.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Parks", "top.kml"]);

        let parks = &catalog.items[0];
        assert!(!parks.is_leaf());
        let children = parks.children.as_ref().unwrap();
        let child_names: Vec<&str> = children.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(child_names, vec!["Zion", "Yosemite Valley"]);

        assert!(children[0].desc_source.is_none());
        let desc = children[1].desc_source.as_ref().unwrap();
        assert!(desc.ends_with("01.Yosemite_Valley.kml.html"));
        assert!(children[1].source.ends_with("01.Yosemite_Valley.kml"));

        assert_eq!(catalog.leaf_count(), 3);
    }

    #[test]
    fn test_directory_names_replace_underscores() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("North_America/x.kml"));

        let catalog = build_catalog(dir.path()).unwrap();
        assert_eq!(catalog.items[0].name, "North America");
    }

    #[test]
    fn test_empty_root() {
        let dir = TempDir::new().unwrap();
        let catalog = build_catalog(dir.path()).unwrap();
        assert!(catalog.items.is_empty());
        assert_eq!(catalog.leaf_count(), 0);
    }

    #[test]
    fn test_root_must_be_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.kml");
        touch(&file);
        let err = build_catalog(&file).unwrap_err();
        assert!(matches!(err, CatalogError::NotADirectory(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_description_found_for_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let kml = dir.path().join(OsStr::from_bytes(b"1.Caf\xe9.kml"));
        let html = dir.path().join(OsStr::from_bytes(b"1.Caf\xe9.kml.html"));
        if fs::write(&kml, "").is_err() {
            // Filesystem refuses non-UTF-8 names
            return;
        }
        fs::write(&html, "").unwrap();

        let catalog = build_catalog(dir.path()).unwrap();
        assert_eq!(catalog.items.len(), 1);
        let desc = catalog.items[0].desc_source.as_ref().unwrap();
        assert!(desc.ends_with(".kml.html"));
    }

    #[test]
    fn test_json_shape() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("Tours/1.First.kml"));
        touch(&dir.path().join("Tours/1.First.kml.html"));

        let json = build_catalog(dir.path()).unwrap().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["label"], "name");
        assert_eq!(value["identifier"], "source");
        let tours = &value["items"][0];
        assert_eq!(tours["name"], "Tours");
        assert!(tours.get("descSource").is_none());
        let leaf = &tours["children"][0];
        assert_eq!(leaf["name"], "First");
        assert!(leaf.get("children").is_none());
        assert!(leaf["descSource"].as_str().unwrap().ends_with(".kml.html"));
    }
}
