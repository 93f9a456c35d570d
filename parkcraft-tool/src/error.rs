use std::path::PathBuf;

use parkcraft_core::{CatalogError, PlacementError, TargetError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot access {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid grid size {rows}x{cols}")]
    InvalidGrid { rows: usize, cols: usize },

    #[error("Script line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("Script line {line}: {source}")]
    Placement {
        line: usize,
        source: PlacementError,
    },

    #[error("Export error: {0}")]
    Target(#[from] TargetError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
