//! JSON implementation of the ManifestCodec port
//!
//! Serde mirror structs keep the wire schema out of the domain records: the
//! domain exchanges typed records, this module owns field names, the
//! `urn:uuid` forms and path normalization. Paths are stored with forward
//! slashes regardless of platform, matching the manifest convention.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::manifest_codec::{CodecError, CodecResult, ManifestCodec};
use crate::domain::records::{AmEntryRecord, AssetMapRecord, PackingListRecord, PklEntryRecord};
use crate::domain::value_objects::{AssetId, ContentHash, UserText};

/// JSON marshalling for Asset Map and Packing List manifests
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonManifestCodec;

impl JsonManifestCodec {
    pub fn new() -> Self {
        Self
    }
}

// --- Wire schema ---

#[derive(Serialize, Deserialize)]
struct JsonAssetMap {
    id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotation: Option<String>,
    issue_date: DateTime<Utc>,
    issuer: String,
    assets: Vec<JsonAmEntry>,
}

#[derive(Serialize, Deserialize)]
struct JsonAmEntry {
    id: Uuid,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotation: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonPackingList {
    id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotation: Option<String>,
    issue_date: DateTime<Utc>,
    issuer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_id: Option<Uuid>,
    assets: Vec<JsonPklEntry>,
}

#[derive(Serialize, Deserialize)]
struct JsonPklEntry {
    id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotation: Option<String>,
    hash: String,
    size: u64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_file_name: Option<String>,
}

// --- Conversions ---

fn path_to_wire(path: &std::path::Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn path_from_wire(path: &str) -> PathBuf {
    path.split('/').collect()
}

fn text_to_wire(text: &Option<UserText>) -> Option<String> {
    text.as_ref().map(|t| t.as_str().to_string())
}

fn text_from_wire(text: Option<String>) -> Option<UserText> {
    text.map(UserText::from)
}

impl From<&AssetMapRecord> for JsonAssetMap {
    fn from(record: &AssetMapRecord) -> Self {
        Self {
            id: record.id.as_uuid(),
            annotation: text_to_wire(&record.annotation),
            issue_date: record.issue_date,
            issuer: record.issuer.as_str().to_string(),
            assets: record
                .entries
                .iter()
                .map(|entry| JsonAmEntry {
                    id: entry.id.as_uuid(),
                    path: path_to_wire(&entry.path),
                    annotation: text_to_wire(&entry.annotation),
                })
                .collect(),
        }
    }
}

impl From<JsonAssetMap> for AssetMapRecord {
    fn from(wire: JsonAssetMap) -> Self {
        Self {
            id: AssetId::from(wire.id),
            annotation: text_from_wire(wire.annotation),
            issue_date: wire.issue_date,
            issuer: UserText::from(wire.issuer),
            entries: wire
                .assets
                .into_iter()
                .map(|entry| AmEntryRecord {
                    id: AssetId::from(entry.id),
                    path: path_from_wire(&entry.path),
                    annotation: text_from_wire(entry.annotation),
                })
                .collect(),
        }
    }
}

impl From<&PackingListRecord> for JsonPackingList {
    fn from(record: &PackingListRecord) -> Self {
        Self {
            id: record.id.as_uuid(),
            annotation: text_to_wire(&record.annotation),
            issue_date: record.issue_date,
            issuer: record.issuer.as_str().to_string(),
            icon_id: record.icon_id.map(|id| id.as_uuid()),
            group_id: record.group_id.map(|id| id.as_uuid()),
            assets: record
                .entries
                .iter()
                .map(|entry| JsonPklEntry {
                    id: entry.id.as_uuid(),
                    annotation: text_to_wire(&entry.annotation),
                    hash: entry.hash.as_str().to_string(),
                    size: entry.size,
                    kind: entry.kind.clone(),
                    original_file_name: text_to_wire(&entry.original_file_name),
                })
                .collect(),
        }
    }
}

impl From<JsonPackingList> for PackingListRecord {
    fn from(wire: JsonPackingList) -> Self {
        Self {
            id: AssetId::from(wire.id),
            annotation: text_from_wire(wire.annotation),
            issue_date: wire.issue_date,
            issuer: UserText::from(wire.issuer),
            icon_id: wire.icon_id.map(AssetId::from),
            group_id: wire.group_id.map(AssetId::from),
            entries: wire
                .assets
                .into_iter()
                .map(|entry| PklEntryRecord {
                    id: AssetId::from(entry.id),
                    annotation: text_from_wire(entry.annotation),
                    hash: ContentHash::new(&entry.hash),
                    size: entry.size,
                    kind: entry.kind,
                    original_file_name: text_from_wire(entry.original_file_name),
                })
                .collect(),
        }
    }
}

impl ManifestCodec for JsonManifestCodec {
    fn decode_asset_map(&self, bytes: &[u8]) -> CodecResult<AssetMapRecord> {
        let wire: JsonAssetMap =
            serde_json::from_slice(bytes).map_err(|e| CodecError::Parse(e.to_string()))?;
        Ok(wire.into())
    }

    fn encode_asset_map(&self, record: &AssetMapRecord) -> CodecResult<Vec<u8>> {
        serde_json::to_vec_pretty(&JsonAssetMap::from(record))
            .map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode_packing_list(&self, bytes: &[u8]) -> CodecResult<PackingListRecord> {
        let wire: JsonPackingList =
            serde_json::from_slice(bytes).map_err(|e| CodecError::Parse(e.to_string()))?;
        Ok(wire.into())
    }

    fn encode_packing_list(&self, record: &PackingListRecord) -> CodecResult<Vec<u8>> {
        serde_json::to_vec_pretty(&JsonPackingList::from(record))
            .map_err(|e| CodecError::Encode(e.to_string()))
    }
}
