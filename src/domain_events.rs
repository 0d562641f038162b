//! Domain events enum for the diagram store

use serde::{Deserialize, Serialize};

use crate::aggregate::ids::DiagramId;
use crate::events::{
    DiagramActivated, DiagramCreated, DomainEvent, EdgeAdded, EdgeRemoved, NodeAdded,
    NodeRelabeled, NodeRemoved, ScoreChanged, SelectionChanged, SelectionCleared,
};

/// Enum wrapper for diagram domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiagramEvent {
    /// A diagram was created in the registry
    DiagramCreated(DiagramCreated),
    /// The active diagram changed
    DiagramActivated(DiagramActivated),
    /// A node was added to a diagram
    NodeAdded(NodeAdded),
    /// A node was removed from a diagram
    NodeRemoved(NodeRemoved),
    /// An edge was added to a diagram
    EdgeAdded(EdgeAdded),
    /// An edge was removed from a diagram
    EdgeRemoved(EdgeRemoved),
    /// A node's label changed
    NodeRelabeled(NodeRelabeled),
    /// A node or edge was rated
    ScoreChanged(ScoreChanged),
    /// Renderer-reported selection changes were applied
    SelectionChanged(SelectionChanged),
    /// Every selection flag was cleared
    SelectionCleared(SelectionCleared),
}

impl DomainEvent for DiagramEvent {
    fn diagram_id(&self) -> &DiagramId {
        match self {
            Self::DiagramCreated(e) => e.diagram_id(),
            Self::DiagramActivated(e) => e.diagram_id(),
            Self::NodeAdded(e) => e.diagram_id(),
            Self::NodeRemoved(e) => e.diagram_id(),
            Self::EdgeAdded(e) => e.diagram_id(),
            Self::EdgeRemoved(e) => e.diagram_id(),
            Self::NodeRelabeled(e) => e.diagram_id(),
            Self::ScoreChanged(e) => e.diagram_id(),
            Self::SelectionChanged(e) => e.diagram_id(),
            Self::SelectionCleared(e) => e.diagram_id(),
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            Self::DiagramCreated(e) => e.event_type(),
            Self::DiagramActivated(e) => e.event_type(),
            Self::NodeAdded(e) => e.event_type(),
            Self::NodeRemoved(e) => e.event_type(),
            Self::EdgeAdded(e) => e.event_type(),
            Self::EdgeRemoved(e) => e.event_type(),
            Self::NodeRelabeled(e) => e.event_type(),
            Self::ScoreChanged(e) => e.event_type(),
            Self::SelectionChanged(e) => e.event_type(),
            Self::SelectionCleared(e) => e.event_type(),
        }
    }
}
