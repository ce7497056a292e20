//! Asset entity - one physical file plus its two manifest reflections
//!
//! An asset exists three times: as a payload file on disk, as an Asset Map
//! entry (location) and, usually, as a Packing List entry (content hash,
//! size, type). All three share one identifier, and asset equality is
//! defined over that identifier alone.

use std::path::{Path, PathBuf};

use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::metadata::{ProxyImage, TrackMetadata};
use crate::domain::records::{AmEntryRecord, PklEntryRecord};
use crate::domain::value_objects::{
    AssetId, ContentHash, Duration, EditRate, SoundfieldGroup, UserText,
};

/// MIME label for wrapped essence
pub const MIME_MXF: &str = "application/mxf";
/// MIME label for XML playlists and packing lists
pub const MIME_XML: &str = "text/xml";

/// Kind of package asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetKind {
    /// Essence-wrapped track (video, audio, timed text)
    Track,
    /// Composition playlist
    CompositionPlaylist,
    /// Output profile list
    OutputPlaylist,
    /// A packing list manifest, itself listed in the Asset Map
    PackingList,
    #[default]
    Unknown,
}

impl AssetKind {
    /// Human-readable label for table views
    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Track => "MXF Track",
            AssetKind::CompositionPlaylist => "Composition Playlist",
            AssetKind::OutputPlaylist => "Output Playlist",
            AssetKind::PackingList => "Packing List",
            AssetKind::Unknown => "Unknown",
        }
    }

    /// MIME type recorded in Packing List entries
    pub fn mime_type(&self) -> &'static str {
        match self {
            AssetKind::Track => MIME_MXF,
            _ => MIME_XML,
        }
    }

    /// Classify from a Packing List entry's MIME label plus the file name.
    ///
    /// The MIME type separates essence from XML documents; XML documents are
    /// told apart by the standard `CPL_`/`OPL_`/`PKL_` name prefixes.
    pub fn classify(mime: &str, file_name: &str) -> Self {
        if mime.eq_ignore_ascii_case(MIME_MXF) {
            return AssetKind::Track;
        }
        Self::from_file_name(file_name)
    }

    /// Best-effort classification from the file name alone (used for Asset
    /// Map entries no Packing List describes)
    pub fn from_file_name(file_name: &str) -> Self {
        let upper = file_name.to_ascii_uppercase();
        if upper.ends_with(".MXF") {
            AssetKind::Track
        } else if upper.starts_with("CPL") {
            AssetKind::CompositionPlaylist
        } else if upper.starts_with("OPL") {
            AssetKind::OutputPlaylist
        } else if upper.starts_with("PKL") {
            AssetKind::PackingList
        } else {
            AssetKind::Unknown
        }
    }
}

/// The asset's Packing List reflection: content description fields that only
/// exist once the asset is (or is about to be) registered in a Packing List.
#[derive(Debug, Clone, Default, PartialEq)]
struct PklReflection {
    hash: Option<ContentHash>,
    size: u64,
    original_file_name: Option<UserText>,
}

/// Track-only payload: wrapping parameters and display caches
#[derive(Debug, Clone, Default)]
struct TrackPayload {
    metadata: TrackMetadata,
    /// Source files not yet wrapped into the track
    source_files: Vec<PathBuf>,
    proxy_image: Option<ProxyImage>,
    /// Imported from an already-wrapped file; wrapping parameters are frozen
    finalized: bool,
}

/// One package asset
///
/// Back-references to the owning Asset Map and Packing List are held as
/// non-owning id handles ("affinity"); the package aggregate is the sole
/// owner of all three collections.
#[derive(Debug, Clone)]
pub struct Asset {
    id: AssetId,
    kind: AssetKind,
    /// Prospective or actual location on disk (absolute)
    file_path: PathBuf,
    annotation: Option<UserText>,
    pkl: Option<PklReflection>,
    needs_new_hash: bool,
    asset_map_id: Option<AssetId>,
    packing_list_id: Option<AssetId>,
    track: Option<TrackPayload>,
}

impl Asset {
    /// Create a new asset not yet materialized on disk.
    ///
    /// `file_path` is the prospective location; if the file still doesn't
    /// exist when the package is outgested, the asset is skipped.
    pub fn new(
        kind: AssetKind,
        file_path: impl Into<PathBuf>,
        id: AssetId,
        annotation: Option<UserText>,
    ) -> Self {
        Self {
            id,
            kind,
            file_path: file_path.into(),
            annotation,
            pkl: None,
            needs_new_hash: true,
            asset_map_id: None,
            packing_list_id: None,
            track: (kind == AssetKind::Track).then(TrackPayload::default),
        }
    }

    /// Import an existing asset from its manifest entries.
    ///
    /// Track assets imported with a Packing List entry are finalized: their
    /// wrapping parameters can no longer be edited, which protects the
    /// recorded hash and size from silent invalidation.
    pub fn import(
        kind: AssetKind,
        file_path: impl Into<PathBuf>,
        id: AssetId,
        annotation: Option<UserText>,
        pkl_entry: Option<&PklEntryRecord>,
    ) -> Self {
        let pkl = pkl_entry.map(|entry| PklReflection {
            hash: Some(entry.hash.clone()),
            size: entry.size,
            original_file_name: entry.original_file_name.clone(),
        });
        let finalized = pkl.is_some();
        Self {
            id,
            kind,
            file_path: file_path.into(),
            annotation,
            needs_new_hash: pkl.is_none(),
            pkl,
            asset_map_id: None,
            packing_list_id: None,
            track: (kind == AssetKind::Track).then(|| TrackPayload {
                finalized,
                ..TrackPayload::default()
            }),
        }
    }

    // --- Identity & classification ---

    pub fn id(&self) -> AssetId {
        self.id
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn annotation(&self) -> Option<&UserText> {
        self.annotation.as_ref()
    }

    // --- Physical presence ---

    /// True iff the file path denotes a regular, non-symlink file
    pub fn exists(&self, fs: &dyn FileSystem) -> bool {
        fs.is_regular_file(&self.file_path)
    }

    // --- Affinity ---

    /// Package membership. Packing-List assets are self-describing and need
    /// both back-references; every other kind needs Asset Map affinity alone.
    pub fn has_affinity(&self) -> bool {
        match self.kind {
            AssetKind::PackingList => {
                self.asset_map_id.is_some() && self.packing_list_id.is_some()
            }
            _ => self.asset_map_id.is_some(),
        }
    }

    /// Id of the Asset Map this asset belongs to, if any
    pub fn asset_map_id(&self) -> Option<AssetId> {
        self.asset_map_id
    }

    /// Id of the Packing List this asset belongs to, if any
    pub fn packing_list_id(&self) -> Option<AssetId> {
        self.packing_list_id
    }

    /// Establish back-references. The package emits the asset-modified event
    /// after calling this, so observers re-read derived state.
    pub(crate) fn win_affinity(
        &mut self,
        asset_map_id: Option<AssetId>,
        packing_list_id: Option<AssetId>,
    ) {
        self.asset_map_id = asset_map_id;
        self.packing_list_id = packing_list_id;
    }

    /// Clear both back-references (asset was removed from the package)
    pub(crate) fn lose_affinity(&mut self) {
        self.asset_map_id = None;
        self.packing_list_id = None;
    }

    // --- Hash & integrity ---

    /// Recorded content hash, if the asset is Packing-List-backed
    pub fn hash(&self) -> Option<&ContentHash> {
        self.pkl.as_ref().and_then(|p| p.hash.as_ref())
    }

    /// Recorded content size in bytes (0 when unregistered)
    pub fn size(&self) -> u64 {
        self.pkl.as_ref().map_or(0, |p| p.size)
    }

    /// File name the asset had when first packaged, if recorded
    pub fn original_file_name(&self) -> Option<&UserText> {
        self.pkl.as_ref().and_then(|p| p.original_file_name.as_ref())
    }

    /// Compare a freshly computed hash against the recorded one.
    /// False whenever they differ, including when no hash is recorded.
    pub fn validate_hash(&self, candidate: &ContentHash) -> bool {
        self.hash().is_some_and(|recorded| recorded.matches(candidate))
    }

    /// True if the file changed since the last hash, or no hash was ever
    /// recorded. Hashes are computed externally; supply the result through
    /// `set_hash`.
    pub fn needs_new_hash(&self) -> bool {
        self.needs_new_hash || self.hash().is_none()
    }

    /// Record a freshly computed hash and clear the dirty-hash flag
    pub fn set_hash(&mut self, hash: ContentHash) {
        let original_file_name = self
            .file_path
            .file_name()
            .map(|name| UserText::new(name.to_string_lossy().into_owned()));
        let reflection = self.pkl.get_or_insert_with(|| PklReflection {
            original_file_name,
            ..PklReflection::default()
        });
        reflection.hash = Some(hash);
        self.needs_new_hash = false;
    }

    /// External signal that the underlying file changed
    pub fn mark_file_modified(&mut self) {
        self.needs_new_hash = true;
    }

    /// Mutate the annotation; it is reflected into whichever manifest
    /// entries the asset currently has affinity with at outgest time
    pub fn set_annotation(&mut self, annotation: Option<UserText>) {
        self.annotation = annotation;
    }

    // --- Manifest snapshots ---

    /// Build this asset's Asset Map entry; the stored path is made relative
    /// to the package root
    pub fn am_entry(&self, root: &Path) -> AmEntryRecord {
        let path = self
            .file_path
            .strip_prefix(root)
            .unwrap_or(&self.file_path)
            .to_path_buf();
        AmEntryRecord {
            id: self.id,
            path,
            annotation: self.annotation.clone(),
        }
    }

    /// Build this asset's Packing List entry. None until a hash has been
    /// recorded. `size_on_disk` overrides the recorded size when the caller
    /// has fresher information.
    pub fn pkl_entry(&self, size_on_disk: Option<u64>) -> Option<PklEntryRecord> {
        let reflection = self.pkl.as_ref()?;
        let hash = reflection.hash.clone()?;
        let original_file_name = reflection.original_file_name.clone().or_else(|| {
            self.file_path
                .file_name()
                .map(|name| UserText::new(name.to_string_lossy().into_owned()))
        });
        Some(PklEntryRecord {
            id: self.id,
            annotation: self.annotation.clone(),
            hash,
            size: size_on_disk.unwrap_or(reflection.size),
            kind: self.kind.mime_type().to_string(),
            original_file_name,
        })
    }

    // --- Track specialization ---

    /// Finalized track assets were imported already wrapped; their wrapping
    /// parameters are immutable
    pub fn is_finalized(&self) -> bool {
        self.track.as_ref().is_some_and(|t| t.finalized)
    }

    pub fn metadata(&self) -> Option<&TrackMetadata> {
        self.track.as_ref().map(|t| &t.metadata)
    }

    pub fn proxy_image(&self) -> Option<&ProxyImage> {
        self.track.as_ref().and_then(|t| t.proxy_image.as_ref())
    }

    pub fn source_files(&self) -> &[PathBuf] {
        self.track.as_ref().map_or(&[], |t| &t.source_files)
    }

    pub fn has_source_files(&self) -> bool {
        !self.source_files().is_empty()
    }

    /// Set the source files that should be wrapped. Does nothing if
    /// finalized or not a track.
    pub fn set_source_files(&mut self, source_files: Vec<PathBuf>) {
        if let Some(track) = self.mutable_track() {
            track.source_files = source_files;
        }
    }

    /// Set the frame rate. Does nothing if finalized.
    pub fn set_edit_rate(&mut self, edit_rate: EditRate) {
        if let Some(track) = self.mutable_track() {
            track.metadata.edit_rate = edit_rate;
        }
    }

    /// Set the soundfield group for a PCM track. Does nothing if finalized.
    pub fn set_soundfield_group(&mut self, soundfield_group: SoundfieldGroup) {
        if let Some(track) = self.mutable_track() {
            track.metadata.soundfield_group = soundfield_group;
        }
    }

    /// Set the duration for a timed-text track. Does nothing if finalized.
    pub fn set_duration(&mut self, duration: Duration) {
        if let Some(track) = self.mutable_track() {
            track.metadata.duration = duration;
        }
    }

    /// Apply a completed extraction result. The proxy image is a display
    /// cache and applies even to finalized tracks; probed metadata only
    /// lands while the track is still editable.
    pub(crate) fn apply_extraction(
        &mut self,
        metadata: Option<TrackMetadata>,
        proxy_image: Option<ProxyImage>,
    ) -> bool {
        let Some(track) = self.track.as_mut() else {
            return false;
        };
        if let Some(image) = proxy_image {
            track.proxy_image = Some(image);
        }
        if let Some(metadata) = metadata {
            if !track.finalized {
                track.metadata = metadata;
            }
        }
        true
    }

    fn mutable_track(&mut self) -> Option<&mut TrackPayload> {
        self.track.as_mut().filter(|t| !t.finalized)
    }
}

// Identity-based equality: two assets with the same id are the same asset,
// whatever their content.
impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Asset {}
