//! Metadata Extraction Result Types
//!
//! Essence probing and proxy-image generation run in an external worker and
//! deliver their result asynchronously. These are the completed-result types
//! the worker hands back; `ImfPackage::apply_track_metadata` applies them.

use crate::domain::value_objects::{Duration, EditRate, SoundfieldGroup};

/// Essence variant of a wrapped track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EssenceKind {
    Video,
    Pcm,
    TimedText,
    #[default]
    Unknown,
}

impl EssenceKind {
    pub fn label(&self) -> &'static str {
        match self {
            EssenceKind::Video => "video",
            EssenceKind::Pcm => "pcm",
            EssenceKind::TimedText => "timed text",
            EssenceKind::Unknown => "unknown",
        }
    }
}

/// Probed metadata of an essence track
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMetadata {
    pub essence: EssenceKind,
    pub edit_rate: EditRate,
    pub duration: Duration,
    pub soundfield_group: SoundfieldGroup,
    /// Essence wrapping profile, when the wrapper reports one
    pub profile: Option<String>,
}

impl TrackMetadata {
    /// One-line summary for table views
    pub fn describe(&self) -> String {
        match self.essence {
            EssenceKind::Pcm => format!(
                "{} {} @ {} ({} units)",
                self.essence.label(),
                self.soundfield_group,
                self.edit_rate,
                self.duration
            ),
            _ => format!(
                "{} @ {} ({} units)",
                self.essence.label(),
                self.edit_rate,
                self.duration
            ),
        }
    }
}

/// Representative still image extracted from essence, for display only.
/// Never persisted into manifests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyImage {
    pub width: u32,
    pub height: u32,
    /// Raw RGBA pixels, row-major
    pub rgba: Vec<u8>,
}

impl ProxyImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rgba.is_empty()
    }
}
