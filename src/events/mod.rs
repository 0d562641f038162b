//! Diagram domain events

pub mod diagram_events;

pub use diagram_events::*;

use crate::aggregate::ids::DiagramId;

/// Common behavior of diagram domain events
pub trait DomainEvent {
    /// The diagram this event belongs to
    fn diagram_id(&self) -> &DiagramId;

    /// Stable discriminant for logging and routing
    fn event_type(&self) -> &'static str;
}
