//! Filesystem collaborator contracts.
//!
//! The core never touches `std::fs` directly outside this module; loaders
//! and existence checks go through the [`Filesystem`] trait so tests can
//! substitute deterministic in-memory implementations.

pub mod search;

use std::io;
use std::path::Path;

use thiserror::Error;

/// Categorized filesystem errors.
///
/// `NotFound`, `NotADirectory` and `IsADirectory` are the benign "entity is
/// absent or the wrong kind" conditions callers map to `None`/`false`;
/// everything else is unexpected and propagates.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("path component is not a directory: {0}")]
    NotADirectory(String),

    #[error("path is a directory: {0}")]
    IsADirectory(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("io error on {path}: {source}")]
    Other { path: String, source: io::Error },
}

impl FsError {
    fn categorize(err: io::Error, path: &Path) -> Self {
        let p = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(p),
            io::ErrorKind::NotADirectory => FsError::NotADirectory(p),
            io::ErrorKind::IsADirectory => FsError::IsADirectory(p),
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied(p),
            _ => FsError::Other { path: p, source: err },
        }
    }

    /// Absence and wrong-entity-kind conditions that callers treat as
    /// "no such file" rather than a failure.
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            FsError::NotFound(_) | FsError::NotADirectory(_) | FsError::IsADirectory(_)
        )
    }
}

/// Stat result for a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStat {
    pub is_dir: bool,
    pub is_file: bool,
}

/// Read-only filesystem access used by configuration loading.
pub trait Filesystem {
    fn stat(&self, path: &Path) -> Result<EntryStat, FsError>;
    fn read_text(&self, path: &Path) -> Result<String, FsError>;
}

/// Production filesystem backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFilesystem;

impl Filesystem for RealFilesystem {
    fn stat(&self, path: &Path) -> Result<EntryStat, FsError> {
        let meta = std::fs::metadata(path).map_err(|e| FsError::categorize(e, path))?;
        Ok(EntryStat {
            is_dir: meta.is_dir(),
            is_file: meta.is_file(),
        })
    }

    fn read_text(&self, path: &Path) -> Result<String, FsError> {
        std::fs::read_to_string(path).map_err(|e| FsError::categorize(e, path))
    }
}

/// Whether `path` exists and is a directory.
///
/// Benign stat errors map to `false`; unexpected errors propagate.
pub fn directory_exists<F: Filesystem + ?Sized>(fs: &F, path: &Path) -> anyhow::Result<bool> {
    match fs.stat(path) {
        Ok(stat) => Ok(stat.is_dir),
        Err(err) if err.is_benign() => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Whether `path` exists and is a regular file.
///
/// Benign stat errors map to `false`; unexpected errors propagate.
pub fn file_exists<F: Filesystem + ?Sized>(fs: &F, path: &Path) -> anyhow::Result<bool> {
    match fs.stat(path) {
        Ok(stat) => Ok(stat.is_file),
        Err(err) if err.is_benign() => Ok(false),
        Err(err) => Err(err.into()),
    }
}
