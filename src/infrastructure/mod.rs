//! Infrastructure Layer
//!
//! Adapters implementing the domain ports against real technology: the
//! local file system and the JSON manifest codec.

pub mod fs;
pub mod manifests;
