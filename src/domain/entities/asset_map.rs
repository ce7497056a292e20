//! AssetMap entity - the singular location manifest
//!
//! One per package. Records package-level identity plus where every asset
//! lives; it owns no assets itself. Entry lists are derived from the asset
//! collection at outgest time, so the entity only carries the header.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::ports::file_system::FileSystem;
use crate::domain::records::{AmEntryRecord, AssetMapRecord};
use crate::domain::value_objects::{AssetId, UserText};

/// In-memory Asset Map manifest
#[derive(Debug, Clone)]
pub struct AssetMap {
    id: AssetId,
    issuer: UserText,
    issue_date: DateTime<Utc>,
    annotation: Option<UserText>,
    file_path: PathBuf,
}

impl AssetMap {
    /// Import an existing Asset Map (header fields from a parsed record)
    pub fn import(file_path: impl Into<PathBuf>, record: &AssetMapRecord) -> Self {
        Self {
            id: record.id,
            issuer: record.issuer.clone(),
            issue_date: record.issue_date,
            annotation: record.annotation.clone(),
            file_path: file_path.into(),
        }
    }

    /// Create a fresh Asset Map for a new package
    pub fn create(
        file_path: impl Into<PathBuf>,
        issuer: UserText,
        annotation: Option<UserText>,
    ) -> Self {
        Self {
            id: AssetId::generate(),
            issuer,
            issue_date: Utc::now(),
            annotation,
            file_path: file_path.into(),
        }
    }

    pub fn id(&self) -> AssetId {
        self.id
    }

    pub fn issuer(&self) -> &UserText {
        &self.issuer
    }

    pub fn issue_date(&self) -> DateTime<Utc> {
        self.issue_date
    }

    pub fn annotation(&self) -> Option<&UserText> {
        self.annotation.as_ref()
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn set_annotation(&mut self, annotation: Option<UserText>) {
        self.annotation = annotation;
    }

    pub fn set_issuer(&mut self, issuer: UserText) {
        self.issuer = issuer;
    }

    /// Check if the manifest physically exists (regular file, no symlink)
    pub fn exists(&self, fs: &dyn FileSystem) -> bool {
        fs.is_regular_file(&self.file_path)
    }

    /// Produce an immutable snapshot record for serialization.
    ///
    /// The record reflects in-memory state at the moment of the call; the
    /// caller owns persistence.
    pub fn write(&self, entries: Vec<AmEntryRecord>) -> AssetMapRecord {
        AssetMapRecord {
            id: self.id,
            annotation: self.annotation.clone(),
            issue_date: self.issue_date,
            issuer: self.issuer.clone(),
            entries,
        }
    }
}
