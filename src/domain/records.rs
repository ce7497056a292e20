//! Typed Manifest Records
//!
//! Immutable snapshots of the two package manifests, as exchanged with the
//! marshalling layer (`ManifestCodec`). Entities produce these on outgest and
//! are built from them on ingest; the records themselves carry no behavior.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{AssetId, ContentHash, UserText};

/// One Asset Map entry: where an asset lives inside the package directory
#[derive(Debug, Clone, PartialEq)]
pub struct AmEntryRecord {
    pub id: AssetId,
    /// Path relative to the package root
    pub path: PathBuf,
    pub annotation: Option<UserText>,
}

/// Full Asset Map manifest snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct AssetMapRecord {
    pub id: AssetId,
    pub annotation: Option<UserText>,
    pub issue_date: DateTime<Utc>,
    pub issuer: UserText,
    pub entries: Vec<AmEntryRecord>,
}

/// One Packing List entry: what an asset's content is
#[derive(Debug, Clone, PartialEq)]
pub struct PklEntryRecord {
    pub id: AssetId,
    pub annotation: Option<UserText>,
    pub hash: ContentHash,
    pub size: u64,
    /// MIME type label, e.g. `application/mxf` or `text/xml`
    pub kind: String,
    pub original_file_name: Option<UserText>,
}

/// Full Packing List manifest snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct PackingListRecord {
    pub id: AssetId,
    pub annotation: Option<UserText>,
    pub issue_date: DateTime<Utc>,
    pub issuer: UserText,
    /// Asset used as a cover icon for this list, if any
    pub icon_id: Option<AssetId>,
    /// Associates related lists, e.g. across disc volumes of one title
    pub group_id: Option<AssetId>,
    pub entries: Vec<PklEntryRecord>,
}
