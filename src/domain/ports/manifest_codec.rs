//! ManifestCodec port - abstraction for manifest marshalling
//!
//! The Asset Map and Packing List schemas are externally standardized; this
//! trait keeps the package model agnostic of the wire grammar. The codec
//! produces and consumes the typed records in `domain::records`.

use crate::domain::records::{AssetMapRecord, PackingListRecord};

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Manifest marshalling errors
#[derive(Debug)]
pub enum CodecError {
    /// Input bytes don't parse against the manifest schema
    Parse(String),
    /// Record could not be serialized
    Encode(String),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Parse(msg) => write!(f, "manifest parse error: {}", msg),
            CodecError::Encode(msg) => write!(f, "manifest encode error: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {}

/// Marshalling layer for package manifests
///
/// Decode must reject structurally invalid input rather than guessing;
/// encode must produce bytes that decode back to an equal record.
pub trait ManifestCodec {
    fn decode_asset_map(&self, bytes: &[u8]) -> CodecResult<AssetMapRecord>;
    fn encode_asset_map(&self, record: &AssetMapRecord) -> CodecResult<Vec<u8>>;

    fn decode_packing_list(&self, bytes: &[u8]) -> CodecResult<PackingListRecord>;
    fn encode_packing_list(&self, record: &PackingListRecord) -> CodecResult<Vec<u8>>;
}
