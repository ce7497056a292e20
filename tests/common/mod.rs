//! Common test utilities: on-disk package fixtures built from typed records
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::Utc;
use imfpack::domain::records::{
    AmEntryRecord, AssetMapRecord, PackingListRecord, PklEntryRecord,
};
use imfpack::{
    packing_list_file_name, AssetId, ContentHash, FileSystem, JsonManifestCodec, LocalFs,
    ManifestCodec, UserText, ASSET_MAP_FILE_NAME, MIME_MXF,
};

pub const VIDEO_BYTES: &[u8] = b"pretend video essence";
pub const AUDIO_BYTES: &[u8] = b"pretend audio essence";

/// Identifiers of a written fixture package
pub struct FixturePackage {
    pub root: PathBuf,
    pub asset_map_id: AssetId,
    pub pkl_id: AssetId,
    pub video_id: AssetId,
    pub audio_id: AssetId,
}

/// Write a complete two-track package under `root`: an Asset Map, one
/// Packing List (listed in the Asset Map) and two essence files whose
/// recorded hashes match the bytes on disk.
pub fn write_package(root: &Path) -> FixturePackage {
    let fs = LocalFs::new();
    let codec = JsonManifestCodec::new();

    let asset_map_id = AssetId::generate();
    let pkl_id = AssetId::generate();
    let video_id = AssetId::generate();
    let audio_id = AssetId::generate();

    fs.write(&root.join("video.mxf"), VIDEO_BYTES).unwrap();
    fs.write(&root.join("audio.mxf"), AUDIO_BYTES).unwrap();

    let pkl = PackingListRecord {
        id: pkl_id,
        annotation: None,
        issue_date: Utc::now(),
        issuer: UserText::from("Acme"),
        icon_id: None,
        group_id: None,
        entries: vec![
            pkl_entry(video_id, VIDEO_BYTES, "video.mxf"),
            pkl_entry(audio_id, AUDIO_BYTES, "audio.mxf"),
        ],
    };
    let pkl_name = packing_list_file_name(&pkl_id);
    fs.write(
        &root.join(&pkl_name),
        &codec.encode_packing_list(&pkl).unwrap(),
    )
    .unwrap();

    let asset_map = AssetMapRecord {
        id: asset_map_id,
        annotation: Some(UserText::from("fixture")),
        issue_date: Utc::now(),
        issuer: UserText::from("Acme"),
        entries: vec![
            AmEntryRecord {
                id: pkl_id,
                path: PathBuf::from(&pkl_name),
                annotation: None,
            },
            AmEntryRecord {
                id: video_id,
                path: PathBuf::from("video.mxf"),
                annotation: Some(UserText::from("hero shot")),
            },
            AmEntryRecord {
                id: audio_id,
                path: PathBuf::from("audio.mxf"),
                annotation: None,
            },
        ],
    };
    fs.write(
        &root.join(ASSET_MAP_FILE_NAME),
        &codec.encode_asset_map(&asset_map).unwrap(),
    )
    .unwrap();

    FixturePackage {
        root: root.to_path_buf(),
        asset_map_id,
        pkl_id,
        video_id,
        audio_id,
    }
}

fn pkl_entry(id: AssetId, bytes: &[u8], name: &str) -> PklEntryRecord {
    PklEntryRecord {
        id,
        annotation: None,
        hash: ContentHash::from_bytes(bytes),
        size: bytes.len() as u64,
        kind: MIME_MXF.to_string(),
        original_file_name: Some(UserText::from(name)),
    }
}
