//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the package model.
//! Infrastructure (or an embedding application) provides implementations.

pub mod file_system;
pub mod manifest_codec;
pub mod metadata;
pub mod package_events;

pub use file_system::{FileSystem, FsError, FsResult};
pub use manifest_codec::{CodecError, CodecResult, ManifestCodec};
pub use metadata::{EssenceKind, ProxyImage, TrackMetadata};
pub use package_events::{NoopEventSink, PackageEvent, PackageEventSink};
