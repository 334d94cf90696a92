//! Observability side-channel for report assembly
//!
//! Assembly itself is a pure transformation. Anything worth logging along the
//! way (fallbacks, pass-through labels, placeholder sections) is handed to an
//! [`AssemblyObserver`] so callers decide where it goes.

use crate::content::ContentKind;
use crate::labels::LabelTable;
use tracing::{debug, warn};

/// Something noteworthy that happened while assembling a report
#[derive(Debug, Clone, PartialEq)]
pub enum AssemblyEvent {
    /// A module's content was classified and formatted
    SectionDispatched { key: String, kind: ContentKind },
    /// A module had no content and got the "no data" placeholder
    PlaceholderEmitted { key: String },
    /// A field had an unexpected shape and was coerced to a string
    FieldCoerced { field: String, raw: String },
    /// A value was missing from a lookup table and passed through verbatim
    LabelPassedThrough { table: LabelTable, value: String },
}

/// Receiver of assembly events
#[cfg_attr(test, mockall::automock)]
pub trait AssemblyObserver: Send + Sync {
    fn observe(&self, event: &AssemblyEvent);
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl AssemblyObserver for TracingObserver {
    fn observe(&self, event: &AssemblyEvent) {
        match event {
            AssemblyEvent::SectionDispatched { key, kind } => {
                debug!(module = %key, kind = ?kind, "Section dispatched");
            }
            AssemblyEvent::PlaceholderEmitted { key } => {
                debug!(module = %key, "No data for module, emitting placeholder");
            }
            AssemblyEvent::FieldCoerced { field, raw } => {
                warn!(field = %field, raw = %raw, "Unexpected field shape, coerced to string");
            }
            AssemblyEvent::LabelPassedThrough { table, value } => {
                debug!(table = ?table, value = %value, "Unknown value, passing through");
            }
        }
    }
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl AssemblyObserver for NoopObserver {
    fn observe(&self, _event: &AssemblyEvent) {}
}
