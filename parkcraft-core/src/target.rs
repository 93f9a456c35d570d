use std::convert::Infallible;
use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    /// File written, if the target is file-backed.
    pub path: Option<PathBuf>,
    pub bytes: usize,
}

/// Destination for rendered exports.
///
/// Targets only move bytes; rendering is done by [`crate::export`].
pub trait ExportTarget {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Writes one complete export artifact.
    fn save(&mut self, contents: &str) -> Result<SaveReceipt, Self::Error>;
}

impl<T: ExportTarget + ?Sized> ExportTarget for &mut T {
    type Error = T::Error;

    fn save(&mut self, contents: &str) -> Result<SaveReceipt, Self::Error> {
        (**self).save(contents)
    }
}

/// An in-memory target that keeps every saved artifact.
///
/// Useful for testing.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    saves: Vec<String>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saves(&self) -> &[String] {
        &self.saves
    }

    pub fn latest(&self) -> Option<&str> {
        self.saves.last().map(String::as_str)
    }
}

impl ExportTarget for MemoryTarget {
    type Error = Infallible;

    fn save(&mut self, contents: &str) -> Result<SaveReceipt, Self::Error> {
        self.saves.push(contents.to_string());
        Ok(SaveReceipt {
            path: None,
            bytes: contents.len(),
        })
    }
}

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("export target unavailable: {0}")]
    Unavailable(String),
    /// The user dismissed the save prompt; nothing was written.
    #[error("export cancelled")]
    Cancelled,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug)]
enum Mode {
    OneShot { dir: PathBuf, file_name: String },
    Reusable { path: PathBuf, handle: File },
}

/// A file-backed export target.
///
/// A one-shot target writes each export to a fresh file and never overwrites,
/// like a download. A reusable target holds one file handle for its whole
/// lifetime and overwrites it on every save.
#[derive(Debug)]
pub struct FileTarget {
    mode: Mode,
}

impl FileTarget {
    /// Saves into `dir`, naming files `file_name`, `stem (1).ext`, `stem (2).ext`, ...
    pub fn one_shot(dir: impl AsRef<Path>, file_name: &str) -> Result<Self, TargetError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(TargetError::Unavailable(format!(
                "directory {} does not exist",
                dir.display()
            )));
        }
        Ok(Self {
            mode: Mode::OneShot {
                dir: dir.to_path_buf(),
                file_name: file_name.to_string(),
            },
        })
    }

    /// Acquires a handle on `path`, created if missing, for repeated overwrites.
    ///
    /// Existing contents are left alone until the first save.
    pub fn reusable(path: impl AsRef<Path>) -> Result<Self, TargetError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(TargetError::Unavailable(format!(
                    "directory {} does not exist",
                    parent.display()
                )));
            }
        }
        let handle = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        Ok(Self {
            mode: Mode::Reusable {
                path: path.to_path_buf(),
                handle,
            },
        })
    }

    pub fn is_reusable(&self) -> bool {
        matches!(self.mode, Mode::Reusable { .. })
    }

    /// The file a reusable target overwrites.
    pub fn path(&self) -> Option<&Path> {
        match &self.mode {
            Mode::OneShot { .. } => None,
            Mode::Reusable { path, .. } => Some(path),
        }
    }
}

impl ExportTarget for FileTarget {
    type Error = TargetError;

    fn save(&mut self, contents: &str) -> Result<SaveReceipt, Self::Error> {
        let path = match &mut self.mode {
            Mode::OneShot { dir, file_name } => {
                let path = next_free_path(dir, file_name);
                let mut file = OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&path)?;
                file.write_all(contents.as_bytes())?;
                file.flush()?;
                path
            }
            Mode::Reusable { path, handle } => {
                handle.set_len(0)?;
                handle.seek(SeekFrom::Start(0))?;
                handle.write_all(contents.as_bytes())?;
                handle.flush()?;
                path.clone()
            }
        };
        Ok(SaveReceipt {
            path: Some(path),
            bytes: contents.len(),
        })
    }
}

fn next_free_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }
    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let ext = name.extension().map(|e| e.to_string_lossy().into_owned());
    (1..)
        .map(|n| match &ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        })
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}
