//! Local disk implementation of the FileSystem port

use std::fs::{self, File};
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};
use crate::domain::value_objects::ContentHash;

/// Standard disk I/O with atomic manifest replacement
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

fn annotate(err: io::Error, path: &Path) -> FsError {
    match err.kind() {
        io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
        _ => FsError::Io(err),
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        fs::read(path).map_err(|e| annotate(e, path))
    }

    /// Write via a sibling temp file and an atomic rename, so readers never
    /// observe a half-written manifest
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        let parent = path.parent().ok_or_else(|| {
            FsError::Other(format!("path has no parent directory: {}", path.display()))
        })?;
        fs::create_dir_all(parent).map_err(|e| annotate(e, parent))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| annotate(e, parent))?;
        io::Write::write_all(&mut temp, content).map_err(|e| annotate(e, path))?;
        temp.persist(path)
            .map_err(|e| annotate(e.error, path))?;
        Ok(())
    }

    fn is_regular_file(&self, path: &Path) -> bool {
        // symlink_metadata does not follow links, so a symlink to a regular
        // file is rejected
        fs::symlink_metadata(path)
            .map(|meta| meta.file_type().is_file())
            .unwrap_or(false)
    }

    fn file_size(&self, path: &Path) -> FsResult<u64> {
        let meta = fs::symlink_metadata(path).map_err(|e| annotate(e, path))?;
        if !meta.file_type().is_file() {
            return Err(FsError::Other(format!(
                "not a regular file: {}",
                path.display()
            )));
        }
        Ok(meta.len())
    }

    fn hash(&self, path: &Path) -> FsResult<ContentHash> {
        let mut file = File::open(path).map_err(|e| annotate(e, path))?;
        let mut hasher = Sha256::new();
        io::copy(&mut file, &mut hasher).map_err(|e| annotate(e, path))?;
        let digest = hasher.finalize();
        Ok(ContentHash::new(&format!("{digest:x}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ASSETMAP.json");
        let fs = LocalFs::new();

        fs.write(&path, b"{}").unwrap();
        assert_eq!(fs.read(&path).unwrap(), b"{}");
        assert!(fs.is_regular_file(&path));
        assert_eq!(fs.file_size(&path).unwrap(), 2);
    }

    #[test]
    fn write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deep/PKL.json");
        LocalFs::new().write(&path, b"x").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn write_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        let fs = LocalFs::new();
        fs.write(&path, b"old").unwrap();
        fs.write(&path, b"new").unwrap();
        assert_eq!(fs.read(&path).unwrap(), b"new");
    }

    #[test]
    fn missing_file_is_not_regular() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFs::new();
        let missing = dir.path().join("absent.mxf");
        assert!(!fs.is_regular_file(&missing));
        assert!(!fs.is_regular_file(dir.path()));
        assert!(matches!(fs.read(&missing), Err(FsError::NotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real.mxf");
        let link = dir.path().join("link.mxf");
        let fs = LocalFs::new();
        fs.write(&target, b"essence").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();
        assert!(!fs.is_regular_file(&link));
    }

    #[test]
    fn hash_matches_from_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video.mxf");
        let fs = LocalFs::new();
        fs.write(&path, b"essence bytes").unwrap();
        assert_eq!(
            fs.hash(&path).unwrap(),
            ContentHash::from_bytes(b"essence bytes")
        );
    }
}
