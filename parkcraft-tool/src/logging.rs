use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::ToolError;

const DEFAULT_FILTER: &str = "warn";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination<'a> {
    Stderr,
    /// Appends to a file; used while the terminal editor owns the screen.
    File(&'a Path),
    Disabled,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. `RUST_LOG` overrides the default `warn` level.
pub fn init(destination: LogDestination<'_>) -> Result<(), ToolError> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter());
    let result = match destination {
        LogDestination::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogDestination::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| ToolError::File {
                    path: path.to_path_buf(),
                    source,
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogDestination::Disabled => return Ok(()),
    };
    result.map_err(|e| ToolError::Logging(e.to_string()))
}
