//! Ingest/outgest integration tests against a real package directory

mod common;

use std::fs;

use common::{write_package, AUDIO_BYTES, VIDEO_BYTES};
use imfpack::{
    Asset, AssetId, AssetKind, ContentHash, ImfPackage, ImfError, IngestWarning,
    JsonManifestCodec, LocalFs, UserText, ASSET_MAP_FILE_NAME,
};

fn harness() -> (LocalFs, JsonManifestCodec) {
    (LocalFs::new(), JsonManifestCodec::new())
}

#[test]
fn ingest_resolves_all_assets() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_package(dir.path());
    let (fs, codec) = harness();

    let mut package = ImfPackage::open(&fixture.root);
    let report = package.ingest(&fs, &codec).unwrap();

    assert!(report.is_clean(), "warnings: {:?}", report.warnings());
    assert!(!package.is_dirty());
    assert_eq!(package.asset_count(), 3);
    assert_eq!(package.packing_lists().len(), 1);
    assert_eq!(package.asset_map().unwrap().id(), fixture.asset_map_id);

    let video = package.asset(&fixture.video_id).unwrap();
    assert_eq!(video.kind(), AssetKind::Track);
    assert!(video.is_finalized());
    assert!(video.has_affinity());
    assert_eq!(video.size(), VIDEO_BYTES.len() as u64);
    assert!(video.validate_hash(&ContentHash::from_bytes(VIDEO_BYTES)));
    assert_eq!(video.annotation().unwrap().as_str(), "hero shot");

    // The packing list manifest is itself an asset with both affinities
    let list = package.asset(&fixture.pkl_id).unwrap();
    assert_eq!(list.kind(), AssetKind::PackingList);
    assert!(list.has_affinity());
}

#[test]
fn ingest_twice_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_package(dir.path());
    let (fs, codec) = harness();

    let mut package = ImfPackage::open(&fixture.root);
    package.ingest(&fs, &codec).unwrap();
    assert!(matches!(
        package.ingest(&fs, &codec),
        Err(ImfError::AlreadyIngested)
    ));
}

#[test]
fn edit_outgest_reingest_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_package(dir.path());
    let (fs, codec) = harness();

    let mut package = ImfPackage::open(&fixture.root);
    package.ingest(&fs, &codec).unwrap();
    package.set_asset_annotation(&fixture.audio_id, Some(UserText::from("stereo mix")));
    assert!(package.is_dirty());
    package.outgest(&fs, &codec).unwrap();
    assert!(!package.is_dirty());

    let mut reloaded = ImfPackage::open(&fixture.root);
    let report = reloaded.ingest(&fs, &codec).unwrap();
    assert!(report.is_clean(), "warnings: {:?}", report.warnings());
    assert_eq!(reloaded.asset_count(), 3);
    assert_eq!(
        reloaded
            .asset(&fixture.audio_id)
            .unwrap()
            .annotation()
            .unwrap()
            .as_str(),
        "stereo mix"
    );
}

#[test]
fn added_asset_survives_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_package(dir.path());
    let (fs, codec) = harness();

    let mut package = ImfPackage::open(&fixture.root);
    package.ingest(&fs, &codec).unwrap();

    let cpl_path = fixture.root.join("CPL_main.xml");
    fs::write(&cpl_path, b"<CompositionPlaylist/>").unwrap();
    let asset = Asset::new(
        AssetKind::CompositionPlaylist,
        &cpl_path,
        AssetId::generate(),
        None,
    );
    let id = asset.id();
    let pkl_id = package.packing_list_id(0).unwrap();
    package.add_asset(asset, &pkl_id).unwrap();
    package.set_asset_hash(&id, ContentHash::from_bytes(b"<CompositionPlaylist/>"));
    package.outgest(&fs, &codec).unwrap();

    let mut reloaded = ImfPackage::open(&fixture.root);
    let report = reloaded.ingest(&fs, &codec).unwrap();
    assert!(report.is_clean(), "warnings: {:?}", report.warnings());
    let cpl = reloaded.asset(&id).unwrap();
    assert_eq!(cpl.kind(), AssetKind::CompositionPlaylist);
    assert_eq!(cpl.size(), b"<CompositionPlaylist/>".len() as u64);
    assert!(cpl.validate_hash(&ContentHash::from_bytes(b"<CompositionPlaylist/>")));
}

#[test]
fn removed_asset_disappears_from_manifests() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_package(dir.path());
    let (fs, codec) = harness();

    let mut package = ImfPackage::open(&fixture.root);
    package.ingest(&fs, &codec).unwrap();
    package.remove_asset(&fixture.audio_id).unwrap();
    package.outgest(&fs, &codec).unwrap();

    let mut reloaded = ImfPackage::open(&fixture.root);
    reloaded.ingest(&fs, &codec).unwrap();
    assert_eq!(reloaded.asset_count(), 2);
    assert!(reloaded.asset(&fixture.audio_id).is_none());
    // The file itself is untouched, only the manifests forget it
    assert!(fixture.root.join("audio.mxf").is_file());
}

#[test]
fn tampered_essence_reports_hash_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_package(dir.path());
    let (fs, codec) = harness();
    fs::write(fixture.root.join("video.mxf"), b"tampered").unwrap();

    let mut package = ImfPackage::open(&fixture.root);
    let report = package.ingest(&fs, &codec).unwrap();
    assert_eq!(
        report.warnings(),
        [IngestWarning::HashMismatch {
            id: fixture.video_id
        }]
        .as_slice()
    );
    // The package still loads fully
    assert_eq!(package.asset_count(), 3);
}

#[test]
fn missing_essence_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_package(dir.path());
    let (fs, codec) = harness();
    fs::remove_file(fixture.root.join("audio.mxf")).unwrap();

    let mut package = ImfPackage::open(&fixture.root);
    let report = package.ingest(&fs, &codec).unwrap();
    assert!(report
        .warnings()
        .iter()
        .any(|w| matches!(w, IngestWarning::MissingFile { id, .. } if *id == fixture.audio_id)));
    assert!(package.asset(&fixture.audio_id).is_some());
}

#[test]
fn unlisted_asset_reports_unresolved_reference() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_package(dir.path());
    let (fs, codec) = harness();

    // Append an Asset Map entry no packing list describes
    let am_path = fixture.root.join(ASSET_MAP_FILE_NAME);
    let text = fs::read_to_string(&am_path).unwrap();
    let orphan_id = AssetId::generate();
    let patched = text.replacen(
        "\"assets\": [",
        &format!(
            "\"assets\": [\n    {{\"id\": \"{}\", \"path\": \"CPL_orphan.xml\"}},",
            orphan_id.as_uuid()
        ),
        1,
    );
    fs::write(&am_path, patched).unwrap();

    let mut package = ImfPackage::open(&fixture.root);
    let report = package.ingest(&fs, &codec).unwrap();
    assert!(report
        .warnings()
        .iter()
        .any(|w| matches!(w, IngestWarning::UnresolvedReference { id, .. } if *id == orphan_id)));
    // Kind falls back to the file-name convention
    let orphan = package.asset(&orphan_id).unwrap();
    assert_eq!(orphan.kind(), AssetKind::CompositionPlaylist);
    assert!(orphan.hash().is_none());
}

#[test]
fn missing_asset_map_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let (fs, codec) = harness();
    let mut package = ImfPackage::open(dir.path());
    assert!(matches!(
        package.ingest(&fs, &codec),
        Err(ImfError::AssetMapNotFound { .. })
    ));
    assert!(package.asset_map().is_none());
}

#[test]
fn missing_packing_list_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_package(dir.path());
    let (fs, codec) = harness();
    fs::remove_file(
        fixture
            .root
            .join(imfpack::packing_list_file_name(&fixture.pkl_id)),
    )
    .unwrap();

    let mut package = ImfPackage::open(&fixture.root);
    assert!(matches!(
        package.ingest(&fs, &codec),
        Err(ImfError::PackingListNotFound { .. })
    ));
    // Fatal errors leave the package untouched
    assert_eq!(package.asset_count(), 0);
    assert!(package.asset_map().is_none());
}

#[test]
fn malformed_asset_map_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_package(dir.path());
    let (fs, codec) = harness();
    fs::write(fixture.root.join(ASSET_MAP_FILE_NAME), b"not json").unwrap();

    let mut package = ImfPackage::open(&fixture.root);
    assert!(matches!(
        package.ingest(&fs, &codec),
        Err(ImfError::ManifestMalformed { .. })
    ));
}

#[test]
fn duplicate_asset_map_ids_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_package(dir.path());
    let (fs, codec) = harness();

    let am_path = fixture.root.join(ASSET_MAP_FILE_NAME);
    let text = fs::read_to_string(&am_path).unwrap();
    let patched = text.replace(
        &fixture.audio_id.as_uuid().to_string(),
        &fixture.video_id.as_uuid().to_string(),
    );
    fs::write(&am_path, patched).unwrap();

    let mut package = ImfPackage::open(&fixture.root);
    let err = package.ingest(&fs, &codec).unwrap_err();
    assert!(matches!(err, ImfError::ManifestMalformed { .. }));
    assert!(err.to_string().contains("duplicate asset id"));
}

#[test]
fn outgest_without_asset_map_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (fs, codec) = harness();
    let mut package = ImfPackage::open(dir.path());
    assert!(matches!(
        package.outgest(&fs, &codec),
        Err(ImfError::NoAssetMap)
    ));
}

#[test]
fn fresh_package_outgests_and_reingests() {
    let dir = tempfile::tempdir().unwrap();
    let (fs, codec) = harness();

    let mut package = ImfPackage::create(
        dir.path(),
        UserText::from("Acme"),
        Some(UserText::from("new delivery")),
    );
    assert!(package.is_dirty());
    package.outgest(&fs, &codec).unwrap();
    assert!(!package.is_dirty());
    assert!(dir.path().join(ASSET_MAP_FILE_NAME).is_file());

    let mut reloaded = ImfPackage::open(dir.path());
    let report = reloaded.ingest(&fs, &codec).unwrap();
    assert!(report.is_clean(), "warnings: {:?}", report.warnings());
    assert_eq!(reloaded.packing_lists().len(), 1);
    // The default packing list now shows up as a self-described asset
    assert_eq!(reloaded.asset_count(), 1);
    assert_eq!(
        reloaded.asset_at(0).unwrap().kind(),
        AssetKind::PackingList
    );
    assert_eq!(
        reloaded.asset_map().unwrap().annotation().unwrap().as_str(),
        "new delivery"
    );
}

#[test]
fn pending_asset_without_file_is_skipped_on_outgest() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_package(dir.path());
    let (fs, codec) = harness();

    let mut package = ImfPackage::open(&fixture.root);
    package.ingest(&fs, &codec).unwrap();
    let pending = Asset::new(
        AssetKind::Track,
        fixture.root.join("not_yet_wrapped.mxf"),
        AssetId::generate(),
        None,
    );
    let pending_id = pending.id();
    let pkl_id = package.packing_list_id(0).unwrap();
    package.add_asset(pending, &pkl_id).unwrap();
    package.outgest(&fs, &codec).unwrap();

    let mut reloaded = ImfPackage::open(&fixture.root);
    let report = reloaded.ingest(&fs, &codec).unwrap();
    assert!(report.is_clean(), "warnings: {:?}", report.warnings());
    assert!(reloaded.asset(&pending_id).is_none());
}
