//! Asset Identifier Value Object
//!
//! A 128-bit UUID shared between an asset's Asset Map entry, its Packing
//! List entry and the in-memory `Asset` itself. The id is the only stable
//! cross-reference key inside a package.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// UUID-based identifier for package-level entities.
///
/// Immutable after construction; asset equality is defined solely over this
/// id, independent of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(Uuid);

impl AssetId {
    /// Generate a fresh random (v4) identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil identifier (all zero bits)
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Check for the nil identifier
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Access the underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Render as a `urn:uuid:` URN, the form manifests carry on the wire
    pub fn urn(&self) -> String {
        format!("urn:uuid:{}", self.0)
    }
}

impl From<Uuid> for AssetId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AssetId {
    type Err = uuid::Error;

    /// Parse either a bare hyphenated UUID or the `urn:uuid:` form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("urn:uuid:").unwrap_or(s);
        Uuid::parse_str(raw).map(Self)
    }
}
