//! Catalog files.
//!
//! ```toml
//! [[kinds]]
//! id = "ferriswheel"
//! width = 3
//! height = 9
//! elevation = 0                 # optional
//! file_id = "ferris_wheel_v2"   # optional, defaults to id
//! display_name = "Ferris wheel" # optional, defaults to id
//! ```

use std::path::Path;

use parkcraft_core::{Catalog, ObjectKind};
use serde::Deserialize;
use tracing::info;

use crate::error::ToolError;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    kinds: Vec<KindEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KindEntry {
    id: String,
    width: u32,
    height: u32,
    #[serde(default)]
    elevation: i32,
    file_id: Option<String>,
    display_name: Option<String>,
}

impl From<KindEntry> for ObjectKind {
    fn from(entry: KindEntry) -> Self {
        let mut kind =
            ObjectKind::new(entry.id, entry.width, entry.height).with_elevation(entry.elevation);
        if let Some(file_id) = entry.file_id {
            kind = kind.with_file_id(file_id);
        }
        if let Some(name) = entry.display_name {
            kind = kind.with_display_name(name);
        }
        kind
    }
}

pub fn parse_catalog(content: &str) -> Result<Catalog, ToolError> {
    let file: CatalogFile = toml::from_str(content)?;
    Ok(Catalog::new(file.kinds.into_iter().map(ObjectKind::from))?)
}

/// Reads the catalog at `path`, or returns the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, ToolError> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };
    let content = std::fs::read_to_string(path).map_err(|source| ToolError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&content)?;
    info!(path = %path.display(), kinds = catalog.len(), "catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkcraft_core::CatalogError;

    #[test]
    fn parses_kinds_in_file_order() {
        let catalog = parse_catalog(
            r#"
            [[kinds]]
            id = "tower"
            width = 1
            height = 1
            elevation = 5
            file_id = "drop_tower"

            [[kinds]]
            id = "pond"
            width = 4
            height = 2
            display_name = "Duck pond"
            "#,
        )
        .unwrap();

        let ids: Vec<_> = catalog.iter().map(|k| k.id.as_str()).collect();
        assert_eq!(ids, vec!["tower", "pond"]);

        let tower = catalog.get("tower").unwrap();
        assert_eq!(tower.elevation, 5);
        assert_eq!(tower.file_id, "drop_tower");
        assert_eq!(tower.display_name, "tower");

        let pond = catalog.get("pond").unwrap();
        assert_eq!(pond.elevation, 0);
        assert_eq!(pond.file_id, "pond");
        assert_eq!(pond.display_name, "Duck pond");
    }

    #[test]
    fn rejects_invalid_catalogs() {
        assert!(matches!(
            parse_catalog(""),
            Err(ToolError::Catalog(CatalogError::Empty))
        ));
        assert!(matches!(
            parse_catalog("[[kinds]]\nid = \"a\"\nwidth = 0\nheight = 1\n"),
            Err(ToolError::Catalog(CatalogError::ZeroSize { .. }))
        ));
        assert!(matches!(
            parse_catalog(
                "[[kinds]]\nid = \"a\"\nwidth = 1\nheight = 1\n\
                 [[kinds]]\nid = \"a\"\nwidth = 2\nheight = 2\n"
            ),
            Err(ToolError::Catalog(CatalogError::DuplicateKind(_)))
        ));
        assert!(matches!(
            parse_catalog("[[kinds]]\nid = \"a\"\nwidth = 1\nheight = 1\ncolour = \"red\"\n"),
            Err(ToolError::Config(_))
        ));
    }

    #[test]
    fn no_path_means_builtin() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog, Catalog::builtin());
        assert_eq!(catalog.len(), 7);
    }
}
