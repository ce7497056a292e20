//! FileSystem port - abstraction over file I/O operations
//!
//! The package model never touches the disk directly; ingest and outgest go
//! through this trait so tests and alternative stores can substitute their
//! own implementation.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io(std::io::Error),
    /// Other error
    Other(String),
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(PathBuf::new()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(PathBuf::new()),
            _ => FsError::Io(err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "file not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "permission denied: {}", path.display())
            }
            FsError::Io(err) => write!(f, "I/O error: {}", err),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard disk I/O with atomic writes
/// - in-memory doubles in tests
pub trait FileSystem {
    /// Read full file content
    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Write content to file atomically (temp file + rename)
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// True iff `path` denotes a regular file that is not a symlink
    fn is_regular_file(&self, path: &Path) -> bool;

    /// Size of the file in bytes
    fn file_size(&self, path: &Path) -> FsResult<u64>;

    /// Compute the content hash of the file
    fn hash(&self, path: &Path) -> FsResult<ContentHash>;
}
