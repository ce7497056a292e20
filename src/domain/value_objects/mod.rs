//! Domain Value Objects
//!
//! Immutable value types that represent package concepts: identifiers,
//! content hashes, manifest text and essence timing parameters.

mod edit_rate;
mod hash;
mod id;
mod soundfield;
mod user_text;

pub use edit_rate::{Duration, EditRate};
pub use hash::ContentHash;
pub use id::AssetId;
pub use soundfield::SoundfieldGroup;
pub use user_text::UserText;
