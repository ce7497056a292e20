//! PackingList entity - one content manifest
//!
//! Zero or more per package (normal operation requires at least one). Same
//! shape as the Asset Map header plus an optional icon asset reference and an
//! optional group id associating related lists across volumes.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::ports::file_system::FileSystem;
use crate::domain::records::{PackingListRecord, PklEntryRecord};
use crate::domain::value_objects::{AssetId, UserText};

/// In-memory Packing List manifest
#[derive(Debug, Clone)]
pub struct PackingList {
    id: AssetId,
    issuer: UserText,
    issue_date: DateTime<Utc>,
    annotation: Option<UserText>,
    icon_id: Option<AssetId>,
    group_id: Option<AssetId>,
    file_path: PathBuf,
}

impl PackingList {
    /// Import an existing Packing List (header fields from a parsed record)
    pub fn import(file_path: impl Into<PathBuf>, record: &PackingListRecord) -> Self {
        Self {
            id: record.id,
            issuer: record.issuer.clone(),
            issue_date: record.issue_date,
            annotation: record.annotation.clone(),
            icon_id: record.icon_id,
            group_id: record.group_id,
            file_path: file_path.into(),
        }
    }

    /// Create a fresh Packing List with a caller-chosen id
    pub fn create(
        file_path: impl Into<PathBuf>,
        id: AssetId,
        issuer: UserText,
        annotation: Option<UserText>,
    ) -> Self {
        Self {
            id,
            issuer,
            issue_date: Utc::now(),
            annotation,
            icon_id: None,
            group_id: None,
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

    pub fn icon_id(&self) -> Option<AssetId> {
        self.icon_id
    }

    pub fn group_id(&self) -> Option<AssetId> {
        self.group_id
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

    pub fn set_icon_id(&mut self, icon_id: Option<AssetId>) {
        self.icon_id = icon_id;
    }

    pub fn set_group_id(&mut self, group_id: Option<AssetId>) {
        self.group_id = group_id;
    }

    /// Check if the manifest physically exists (regular file, no symlink)
    pub fn exists(&self, fs: &dyn FileSystem) -> bool {
        fs.is_regular_file(&self.file_path)
    }

    /// Produce an immutable snapshot record for serialization
    pub fn write(&self, entries: Vec<PklEntryRecord>) -> PackingListRecord {
        PackingListRecord {
            id: self.id,
            annotation: self.annotation.clone(),
            issue_date: self.issue_date,
            issuer: self.issuer.clone(),
            icon_id: self.icon_id,
            group_id: self.group_id,
            entries,
        }
    }
}
