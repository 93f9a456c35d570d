use std::path::{Path, PathBuf};

use parkcraft_core::{DEFAULT_COLS, DEFAULT_ROWS, export::DEFAULT_SAMPLE_SIZE};
use serde::Deserialize;

use crate::error::ToolError;

pub const DEFAULT_EXPORT_FILE: &str = "blender_command.txt";

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    pub catalog: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub path: PathBuf,
    pub sample_size: usize,
    /// Keep one file handle and overwrite it, instead of a fresh file per export.
    pub reuse_handle: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_EXPORT_FILE),
            sample_size: DEFAULT_SAMPLE_SIZE,
            reuse_handle: true,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("parkcraft").join("config.toml"))
}

pub fn parse_config(content: &str) -> Result<Config, ToolError> {
    Ok(toml::from_str(content)?)
}

/// Loads `explicit` if given, failing on any read or parse error.
///
/// Otherwise reads the default config file, falling back to defaults if it
/// is missing or unreadable.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ToolError> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path).map_err(|source| ToolError::File {
            path: path.to_path_buf(),
            source,
        })?;
        return parse_config(&content);
    }

    let Some(path) = config_path() else {
        return Ok(Config::default());
    };

    let Ok(content) = std::fs::read_to_string(path) else {
        return Ok(Config::default());
    };

    Ok(parse_config(&content).unwrap_or_default())
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub catalog: Option<PathBuf>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

/// Effective settings after applying CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub catalog: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub rows: usize,
    pub cols: usize,
    pub export_path: PathBuf,
    pub sample_size: usize,
    pub reuse_handle: bool,
}

pub fn resolve_settings(overrides: Overrides, config: Config) -> Result<Settings, ToolError> {
    let rows = overrides.rows.unwrap_or(config.grid.rows);
    let cols = overrides.cols.unwrap_or(config.grid.cols);
    if rows == 0 || cols == 0 || i32::try_from(rows).is_err() || i32::try_from(cols).is_err() {
        return Err(ToolError::InvalidGrid { rows, cols });
    }

    Ok(Settings {
        catalog: overrides.catalog.or(config.catalog),
        log_file: config.log_file,
        rows,
        cols,
        export_path: config.export.path,
        sample_size: config.export.sample_size,
        reuse_handle: config.export.reuse_handle,
    })
}
