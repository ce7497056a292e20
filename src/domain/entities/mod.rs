//! Domain Entities
//!
//! Core entities with identity and lifecycle:
//! - `Asset` - one physical file plus its two manifest reflections
//! - `AssetMap` - the singular location manifest
//! - `PackingList` - one content manifest

mod asset;
mod asset_map;
mod packing_list;

pub use asset::{Asset, AssetKind, MIME_MXF, MIME_XML};
pub use asset_map::AssetMap;
pub use packing_list::PackingList;
