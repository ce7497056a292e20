//! Imfpack - IMF package model and manifest tooling
//!
//! Imfpack maintains Interoperable Master Format delivery packages: the
//! Asset Map location manifest, the Packing List content manifests, and the
//! unified asset collection they both describe. It ingests existing
//! packages, tracks membership and content-hash integrity, and outgests
//! manifests atomically.

pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use domain::entities::{Asset, AssetKind, AssetMap, PackingList, MIME_MXF, MIME_XML};
pub use domain::package::{
    packing_list_file_name, ImfPackage, IngestReport, IngestWarning, ASSET_MAP_FILE_NAME,
};
pub use domain::ports::file_system::{FileSystem, FsError, FsResult};
pub use domain::ports::manifest_codec::{CodecError, CodecResult, ManifestCodec};
pub use domain::ports::metadata::{EssenceKind, ProxyImage, TrackMetadata};
pub use domain::ports::package_events::{NoopEventSink, PackageEvent, PackageEventSink};
pub use domain::projection::{AssetTable, Cell, Column};
pub use domain::value_objects::{AssetId, ContentHash, Duration, EditRate, SoundfieldGroup, UserText};
pub use error::{ImfError, ImfResult};
pub use infrastructure::fs::LocalFs;
pub use infrastructure::manifests::JsonManifestCodec;
