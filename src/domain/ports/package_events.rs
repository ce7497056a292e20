//! Package Event Port
//!
//! Observable interface over package mutations. A UI layer (table views,
//! save buttons) subscribes here instead of polling the model.
//!
//! Ordering guarantee: within one package API call, at most one event per
//! logical change is emitted, after the mutation is fully applied.

use crate::domain::value_objects::AssetId;

/// Event emitted by the package aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageEvent {
    /// Unsaved-changes state flipped (edge-triggered, never repeated)
    DirtyChanged { dirty: bool },

    /// An asset's content or derived state changed; observers should re-read
    /// the corresponding row
    AssetModified { id: AssetId },

    /// Asset joined the package (affinity established)
    AssetAdded { id: AssetId },

    /// Asset left the package (affinity lost)
    AssetRemoved { id: AssetId },
}

/// Trait for receiving package events
///
/// Implementations can be a UI bridge, an NDJSON stream for automation, or
/// the silent `NoopEventSink`.
pub trait PackageEventSink: Send + Sync {
    /// Handle a package event
    fn on_event(&self, event: PackageEvent);
}

/// No-op event sink for headless operation
pub struct NoopEventSink;

impl PackageEventSink for NoopEventSink {
    fn on_event(&self, _event: PackageEvent) {
        // Do nothing
    }
}
