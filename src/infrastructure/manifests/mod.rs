//! Manifest codec adapters

mod json;

pub use json::JsonManifestCodec;
