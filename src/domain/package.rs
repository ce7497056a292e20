//! ImfPackage aggregate - the package model root
//!
//! Owns the Asset Map, the Packing Lists and the unified asset collection;
//! everything else holds non-owning id handles into these. All mutation goes
//! through this type so dirty tracking and event emission stay in one place.
//!
//! Lifecycle: a package is either *uncommitted* (freshly constructed, nothing
//! on disk yet) or *ingested* (backed by a real Asset Map); there is no
//! transition back.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::{Asset, AssetKind, AssetMap, PackingList};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::manifest_codec::ManifestCodec;
use crate::domain::ports::metadata::{ProxyImage, TrackMetadata};
use crate::domain::ports::package_events::{NoopEventSink, PackageEvent, PackageEventSink};
use crate::domain::records::{AmEntryRecord, PklEntryRecord};
use crate::domain::value_objects::{AssetId, ContentHash, UserText};
use crate::error::{ImfError, ImfResult};

/// Nominal Asset Map manifest file name inside the package root
pub const ASSET_MAP_FILE_NAME: &str = "ASSETMAP.json";

/// Nominal file name for a Packing List manifest
pub fn packing_list_file_name(id: &AssetId) -> String {
    format!("PKL_{id}.json")
}

fn is_packing_list_file_name(file_name: &str) -> bool {
    file_name.to_ascii_uppercase().starts_with("PKL")
}

/// Recoverable condition found during ingest. The package still loads;
/// callers must surface these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestWarning {
    /// Recorded hash differs from the hash recomputed from the file
    HashMismatch { id: AssetId },
    /// Asset Map references a payload file that is absent or unreadable
    MissingFile { id: AssetId, path: PathBuf },
    /// Asset Map entry that no Packing List describes
    UnresolvedReference { id: AssetId, path: PathBuf },
}

impl fmt::Display for IngestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestWarning::HashMismatch { id } => {
                write!(f, "content hash mismatch for asset {id}")
            }
            IngestWarning::MissingFile { id, path } => {
                write!(f, "asset {id} file missing: {}", path.display())
            }
            IngestWarning::UnresolvedReference { id, path } => write!(
                f,
                "asset {id} ({}) is not described by any packing list",
                path.display()
            ),
        }
    }
}

/// Outcome of a successful ingest
#[derive(Debug, Default)]
pub struct IngestReport {
    warnings: Vec<IngestWarning>,
}

impl IngestReport {
    pub fn warnings(&self) -> &[IngestWarning] {
        &self.warnings
    }

    /// True when the package loaded without any recoverable warnings
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// The package aggregate root
pub struct ImfPackage {
    root_dir: PathBuf,
    asset_map: Option<AssetMap>,
    packing_lists: Vec<PackingList>,
    assets: Vec<Asset>,
    dirty: bool,
    sink: Arc<dyn PackageEventSink>,
}

impl ImfPackage {
    /// Import mode: nothing is parsed until `ingest` is invoked
    pub fn open(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            asset_map: None,
            packing_lists: Vec::new(),
            assets: Vec::new(),
            dirty: false,
            sink: Arc::new(NoopEventSink),
        }
    }

    /// Create mode: synthesizes a fresh empty Asset Map and a default
    /// Packing List in memory. The package is dirty from construction.
    pub fn create(
        root_dir: impl Into<PathBuf>,
        issuer: UserText,
        annotation: Option<UserText>,
    ) -> Self {
        let root_dir = root_dir.into();
        let asset_map = AssetMap::create(
            root_dir.join(ASSET_MAP_FILE_NAME),
            issuer.clone(),
            annotation.clone(),
        );
        let pkl_id = AssetId::generate();
        let packing_list = PackingList::create(
            root_dir.join(packing_list_file_name(&pkl_id)),
            pkl_id,
            issuer,
            annotation,
        );
        Self {
            root_dir,
            asset_map: Some(asset_map),
            packing_lists: vec![packing_list],
            assets: Vec::new(),
            dirty: true,
            sink: Arc::new(NoopEventSink),
        }
    }

    /// Install an observer for dirty/asset/structure events
    pub fn set_event_sink(&mut self, sink: Arc<dyn PackageEventSink>) {
        self.sink = sink;
    }

    // --- Accessors ---

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Check if the package is in an unsaved state
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn asset_map(&self) -> Option<&AssetMap> {
        self.asset_map.as_ref()
    }

    pub fn packing_lists(&self) -> &[PackingList] {
        &self.packing_lists
    }

    pub fn packing_list(&self, id: &AssetId) -> Option<&PackingList> {
        self.packing_lists.iter().find(|p| p.id() == *id)
    }

    /// Id of the "next best" Packing List; index 0 is the default list used
    /// when the caller doesn't care which one a new asset joins. Ties break
    /// by insertion order.
    pub fn packing_list_id(&self, index: usize) -> Option<AssetId> {
        self.packing_lists.get(index).map(PackingList::id)
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Lookup by identifier; no ordering guarantee
    pub fn asset(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id() == *id)
    }

    /// Lookup by stable positional index (insertion order)
    pub fn asset_at(&self, index: usize) -> Option<&Asset> {
        self.assets.get(index)
    }

    // --- Ingest ---

    /// Ingest an existing package from the file system.
    ///
    /// Two-pass resolution: pass 1 parses the Asset Map and every Packing
    /// List manifest and builds an identifier index; pass 2 constructs the
    /// assets and wires affinities. This tolerates Asset Map entries that
    /// appear before their owning Packing List.
    ///
    /// Recoverable conditions (hash mismatch, missing payload, unresolved
    /// reference) are aggregated into the returned report. A missing or
    /// malformed Asset Map or Packing List is fatal and leaves the package
    /// untouched. Importing is not an edit: the package stays clean.
    pub fn ingest(
        &mut self,
        fs: &dyn FileSystem,
        codec: &dyn ManifestCodec,
    ) -> ImfResult<IngestReport> {
        if self.asset_map.is_some() {
            return Err(ImfError::AlreadyIngested);
        }

        let am_path = self.root_dir.join(ASSET_MAP_FILE_NAME);
        if !fs.is_regular_file(&am_path) {
            return Err(ImfError::AssetMapNotFound { path: am_path });
        }
        let bytes = fs.read(&am_path)?;
        let am_record = codec
            .decode_asset_map(&bytes)
            .map_err(|e| ImfError::ManifestMalformed {
                path: am_path.clone(),
                message: e.to_string(),
            })?;

        let mut seen = HashSet::new();
        for entry in &am_record.entries {
            if !seen.insert(entry.id) {
                return Err(ImfError::ManifestMalformed {
                    path: am_path,
                    message: format!("duplicate asset id {}", entry.id),
                });
            }
        }

        // Pass 1: parse every packing list manifest, index entries by id
        let mut packing_lists = Vec::new();
        let mut pkl_manifest_ids = HashSet::new();
        let mut pkl_entries: HashMap<AssetId, (AssetId, PklEntryRecord)> = HashMap::new();
        for entry in &am_record.entries {
            let file_name = entry_file_name(&entry.path);
            if !is_packing_list_file_name(&file_name) {
                continue;
            }
            let path = self.root_dir.join(&entry.path);
            if !fs.is_regular_file(&path) {
                return Err(ImfError::PackingListNotFound { path });
            }
            let bytes = fs.read(&path)?;
            let record =
                codec
                    .decode_packing_list(&bytes)
                    .map_err(|e| ImfError::ManifestMalformed {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
            for pkl_entry in &record.entries {
                pkl_entries.insert(pkl_entry.id, (record.id, pkl_entry.clone()));
            }
            packing_lists.push(PackingList::import(path, &record));
            pkl_manifest_ids.insert(entry.id);
        }

        // Pass 2: construct assets and wire affinities
        let mut report = IngestReport::default();
        let mut assets = Vec::new();
        let am_id = am_record.id;
        for entry in &am_record.entries {
            let path = self.root_dir.join(&entry.path);
            let file_name = entry_file_name(&entry.path);

            if pkl_manifest_ids.contains(&entry.id) {
                // A packing list describes itself: both affinities point home
                let mut asset = Asset::import(
                    AssetKind::PackingList,
                    path,
                    entry.id,
                    entry.annotation.clone(),
                    None,
                );
                asset.win_affinity(Some(am_id), Some(entry.id));
                assets.push(asset);
                continue;
            }

            match pkl_entries.get(&entry.id) {
                Some((list_id, pkl_entry)) => {
                    let kind = AssetKind::classify(&pkl_entry.kind, &file_name);
                    let mut asset = Asset::import(
                        kind,
                        path.clone(),
                        entry.id,
                        entry.annotation.clone(),
                        Some(pkl_entry),
                    );
                    asset.win_affinity(Some(am_id), Some(*list_id));
                    if fs.is_regular_file(&path) {
                        match fs.hash(&path) {
                            Ok(actual) if !asset.validate_hash(&actual) => {
                                report
                                    .warnings
                                    .push(IngestWarning::HashMismatch { id: entry.id });
                            }
                            Ok(_) => {}
                            Err(_) => report.warnings.push(IngestWarning::MissingFile {
                                id: entry.id,
                                path: entry.path.clone(),
                            }),
                        }
                    } else {
                        report.warnings.push(IngestWarning::MissingFile {
                            id: entry.id,
                            path: entry.path.clone(),
                        });
                    }
                    assets.push(asset);
                }
                None => {
                    report.warnings.push(IngestWarning::UnresolvedReference {
                        id: entry.id,
                        path: entry.path.clone(),
                    });
                    let kind = AssetKind::from_file_name(&file_name);
                    let mut asset =
                        Asset::import(kind, path, entry.id, entry.annotation.clone(), None);
                    asset.win_affinity(Some(am_id), None);
                    assets.push(asset);
                }
            }
        }

        // Commit only now, so a fatal error above never leaves a
        // partially-populated package observable.
        self.asset_map = Some(AssetMap::import(am_path, &am_record));
        self.packing_lists = packing_lists;
        self.assets = assets;
        Ok(report)
    }

    // --- Outgest ---

    /// Write every manifest back to the file system.
    ///
    /// All records are serialized before the first byte hits the disk, and
    /// each file is then replaced atomically, so a serialization failure
    /// never leaves the on-disk package in a mixed old/new state. Assets
    /// whose file doesn't exist yet are skipped. Clears the dirty flag on
    /// success.
    pub fn outgest(&mut self, fs: &dyn FileSystem, codec: &dyn ManifestCodec) -> ImfResult<()> {
        let asset_map = self.asset_map.as_ref().ok_or(ImfError::NoAssetMap)?;

        let mut pending: Vec<(PathBuf, Vec<u8>)> = Vec::new();

        for list in &self.packing_lists {
            let mut entries = Vec::new();
            for asset in &self.assets {
                // Lists never describe themselves
                if asset.kind() == AssetKind::PackingList {
                    continue;
                }
                if asset.packing_list_id() != Some(list.id()) {
                    continue;
                }
                if !asset.exists(fs) {
                    continue;
                }
                let size = fs.file_size(asset.file_path()).ok();
                if let Some(entry) = asset.pkl_entry(size) {
                    entries.push(entry);
                }
            }
            let record = list.write(entries);
            let bytes = codec
                .encode_packing_list(&record)
                .map_err(|e| ImfError::Serialization(e.to_string()))?;
            pending.push((list.file_path().to_path_buf(), bytes));
        }

        let mut entries = Vec::new();
        let mut listed = HashSet::new();
        for asset in &self.assets {
            if asset.asset_map_id() != Some(asset_map.id()) {
                continue;
            }
            // Packing list manifests are written by this very outgest, so
            // they stay listed even before their file first exists.
            if asset.kind() != AssetKind::PackingList && !asset.exists(fs) {
                continue;
            }
            entries.push(asset.am_entry(&self.root_dir));
            listed.insert(asset.id());
        }
        // Fresh packing lists have no mirror asset yet; synthesize their
        // location entries directly.
        for list in &self.packing_lists {
            if listed.contains(&list.id()) {
                continue;
            }
            let path = list
                .file_path()
                .strip_prefix(&self.root_dir)
                .unwrap_or(list.file_path())
                .to_path_buf();
            entries.push(AmEntryRecord {
                id: list.id(),
                path,
                annotation: None,
            });
        }
        let record = asset_map.write(entries);
        let bytes = codec
            .encode_asset_map(&record)
            .map_err(|e| ImfError::Serialization(e.to_string()))?;
        pending.push((asset_map.file_path().to_path_buf(), bytes));

        for (path, bytes) in pending {
            fs.write(&path, &bytes)?;
        }
        self.clear_dirty();
        Ok(())
    }

    // --- Structural edits ---

    /// Add an asset to the package and the Packing List with `pkl_id`.
    ///
    /// Rejects duplicates and unknown Packing List targets without mutating
    /// anything; the target list must already exist. On success both
    /// affinities are established atomically relative to observers.
    pub fn add_asset(&mut self, mut asset: Asset, pkl_id: &AssetId) -> ImfResult<()> {
        let asset_map = self.asset_map.as_ref().ok_or(ImfError::NoAssetMap)?;
        if self.assets.iter().any(|a| a.id() == asset.id()) {
            return Err(ImfError::DuplicateAsset { id: asset.id() });
        }
        if !self.packing_lists.iter().any(|p| p.id() == *pkl_id) {
            return Err(ImfError::UnknownPackingList { id: *pkl_id });
        }
        asset.win_affinity(Some(asset_map.id()), Some(*pkl_id));
        let id = asset.id();
        self.assets.push(asset);
        self.sink.on_event(PackageEvent::AssetAdded { id });
        self.mark_dirty();
        Ok(())
    }

    /// Remove an asset by id. Clears both affinities. Removing a
    /// non-existent asset is a no-op.
    pub fn remove_asset(&mut self, id: &AssetId) -> Option<Asset> {
        let index = self.assets.iter().position(|a| a.id() == *id)?;
        self.remove_asset_at(index)
    }

    /// Remove an asset by positional index
    pub fn remove_asset_at(&mut self, index: usize) -> Option<Asset> {
        if index >= self.assets.len() {
            return None;
        }
        let mut asset = self.assets.remove(index);
        asset.lose_affinity();
        self.sink
            .on_event(PackageEvent::AssetRemoved { id: asset.id() });
        self.mark_dirty();
        Some(asset)
    }

    // --- Asset mutation wrappers ---
    // These exist so dirty tracking and event emission happen in one place,
    // and so late completion callbacks for removed assets fall through
    // harmlessly (each returns false for an unknown id).

    /// Record an externally computed hash for an asset
    pub fn set_asset_hash(&mut self, id: &AssetId, hash: ContentHash) -> bool {
        let Some(asset) = self.assets.iter_mut().find(|a| a.id() == *id) else {
            return false;
        };
        asset.set_hash(hash);
        self.sink.on_event(PackageEvent::AssetModified { id: *id });
        self.mark_dirty();
        true
    }

    /// External signal that an asset's file changed on disk
    pub fn notify_file_modified(&mut self, id: &AssetId) -> bool {
        let Some(asset) = self.assets.iter_mut().find(|a| a.id() == *id) else {
            return false;
        };
        asset.mark_file_modified();
        self.sink.on_event(PackageEvent::AssetModified { id: *id });
        self.mark_dirty();
        true
    }

    /// Edit an asset's annotation text
    pub fn set_asset_annotation(&mut self, id: &AssetId, annotation: Option<UserText>) -> bool {
        let Some(asset) = self.assets.iter_mut().find(|a| a.id() == *id) else {
            return false;
        };
        asset.set_annotation(annotation);
        self.sink.on_event(PackageEvent::AssetModified { id: *id });
        self.mark_dirty();
        true
    }

    /// Apply a completed metadata/proxy extraction to a track asset.
    ///
    /// Display caches only; manifests are unaffected, so the package does
    /// not become dirty. Stale callbacks referencing a removed asset are
    /// ignored.
    pub fn apply_track_metadata(
        &mut self,
        id: &AssetId,
        metadata: Option<TrackMetadata>,
        proxy_image: Option<ProxyImage>,
    ) -> bool {
        let Some(asset) = self.assets.iter_mut().find(|a| a.id() == *id) else {
            return false;
        };
        if !asset.apply_extraction(metadata, proxy_image) {
            return false;
        }
        self.sink.on_event(PackageEvent::AssetModified { id: *id });
        true
    }

    // --- Manifest header edits ---

    /// Set the Asset Map issuer
    pub fn set_issuer(&mut self, issuer: UserText) -> ImfResult<()> {
        let asset_map = self.asset_map.as_mut().ok_or(ImfError::NoAssetMap)?;
        asset_map.set_issuer(issuer);
        self.mark_dirty();
        Ok(())
    }

    /// Set the Asset Map annotation
    pub fn set_annotation(&mut self, annotation: Option<UserText>) -> ImfResult<()> {
        let asset_map = self.asset_map.as_mut().ok_or(ImfError::NoAssetMap)?;
        asset_map.set_annotation(annotation);
        self.mark_dirty();
        Ok(())
    }

    /// Set a Packing List's annotation
    pub fn set_packing_list_annotation(
        &mut self,
        id: &AssetId,
        annotation: Option<UserText>,
    ) -> bool {
        let Some(list) = self.packing_lists.iter_mut().find(|p| p.id() == *id) else {
            return false;
        };
        list.set_annotation(annotation);
        self.mark_dirty();
        true
    }

    // --- Dirty state (edge-triggered) ---

    fn mark_dirty(&mut self) {
        if !self.dirty {
            self.dirty = true;
            self.sink
                .on_event(PackageEvent::DirtyChanged { dirty: true });
        }
    }

    fn clear_dirty(&mut self) {
        if self.dirty {
            self.dirty = false;
            self.sink
                .on_event(PackageEvent::DirtyChanged { dirty: false });
        }
    }
}

fn entry_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
