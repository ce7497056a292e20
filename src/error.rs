//! Error types for package operations

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ports::file_system::FsError;
use crate::domain::value_objects::AssetId;

/// Result alias for package operations
pub type ImfResult<T> = Result<T, ImfError>;

/// Fatal package error. Recoverable ingest conditions are reported as
/// warnings instead (see `IngestReport`).
#[derive(Error, Debug)]
pub enum ImfError {
    #[error("no asset map found at {path}")]
    AssetMapNotFound { path: PathBuf },

    #[error("malformed manifest {path}: {message}")]
    ManifestMalformed { path: PathBuf, message: String },

    #[error("packing list manifest missing: {path}")]
    PackingListNotFound { path: PathBuf },

    #[error("asset {id} is already in the package")]
    DuplicateAsset { id: AssetId },

    #[error("no packing list with id {id} in the package")]
    UnknownPackingList { id: AssetId },

    #[error("package was already ingested")]
    AlreadyIngested,

    #[error("package has no asset map")]
    NoAssetMap,

    #[error("manifest serialization failed: {0}")]
    Serialization(String),

    #[error("file system error: {0}")]
    Fs(#[from] FsError),
}
