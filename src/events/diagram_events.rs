//! Diagram event payloads
//!
//! One struct per fact. Events are published to observers after the
//! mutation that produced them has fully applied, so a subscriber always
//! sees consistent state when it re-reads the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::diagram::DiagramKind;
use crate::aggregate::ids::{ArguableId, DiagramId, EdgeId, NodeId, SelectionChange};
use crate::events::DomainEvent;
use crate::value_objects::{FlowDirection, NodeKind, Score};

/// A diagram was created in the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramCreated {
    /// The new diagram's id
    pub diagram_id: DiagramId,
    /// Root or claim
    pub kind: DiagramKind,
    /// The diagram's flow direction
    pub direction: FlowDirection,
    /// Id of the seed node the diagram starts with
    pub seed_node_id: NodeId,
    /// When the diagram was created
    pub created_at: DateTime<Utc>,
}

/// The active diagram changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramActivated {
    /// The now-active diagram
    pub diagram_id: DiagramId,
    /// The previously active diagram
    pub previous: DiagramId,
}

/// A node was added to a diagram
///
/// Carries the owning diagram id so a viewport collaborator can scroll the
/// new node into view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAdded {
    /// The diagram the node was added to
    pub diagram_id: DiagramId,
    /// The new node's id
    pub node_id: NodeId,
    /// The new node's kind
    pub kind: NodeKind,
}

/// A node was removed from a diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRemoved {
    /// The diagram the node was removed from
    pub diagram_id: DiagramId,
    /// The removed node's id
    pub node_id: NodeId,
}

/// An edge was added to a diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeAdded {
    /// The diagram the edge was added to
    pub diagram_id: DiagramId,
    /// The new edge's id
    pub edge_id: EdgeId,
    /// Parent node of the edge
    pub source: NodeId,
    /// Child node of the edge
    pub target: NodeId,
}

/// An edge was removed from a diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRemoved {
    /// The diagram the edge was removed from
    pub diagram_id: DiagramId,
    /// The removed edge's id
    pub edge_id: EdgeId,
}

/// A node's label changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRelabeled {
    /// The diagram containing the node
    pub diagram_id: DiagramId,
    /// The relabeled node's id
    pub node_id: NodeId,
    /// The new label text
    pub label: String,
}

/// A node or edge was rated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreChanged {
    /// The diagram containing the element
    pub diagram_id: DiagramId,
    /// The rated element
    pub target: ArguableId,
    /// The new rating
    pub score: Score,
}

/// Renderer-reported selection changes were applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionChanged {
    /// The diagram the changes apply to
    pub diagram_id: DiagramId,
    /// The applied changes, in report order
    pub changes: Vec<SelectionChange>,
}

/// Every selection flag was cleared
///
/// Published unconditionally, even when nothing was selected: the rendering
/// collaborator relies on the notification to clear transient highlight
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionCleared {
    /// The diagram whose selection was cleared
    pub diagram_id: DiagramId,
    /// How many elements were actually selected before the clear
    pub cleared: usize,
}

impl DomainEvent for DiagramCreated {
    fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    fn event_type(&self) -> &'static str {
        "DiagramCreated"
    }
}

impl DomainEvent for DiagramActivated {
    fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    fn event_type(&self) -> &'static str {
        "DiagramActivated"
    }
}

impl DomainEvent for NodeAdded {
    fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    fn event_type(&self) -> &'static str {
        "NodeAdded"
    }
}

impl DomainEvent for NodeRemoved {
    fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    fn event_type(&self) -> &'static str {
        "NodeRemoved"
    }
}

impl DomainEvent for EdgeAdded {
    fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    fn event_type(&self) -> &'static str {
        "EdgeAdded"
    }
}

impl DomainEvent for EdgeRemoved {
    fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    fn event_type(&self) -> &'static str {
        "EdgeRemoved"
    }
}

impl DomainEvent for NodeRelabeled {
    fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    fn event_type(&self) -> &'static str {
        "NodeRelabeled"
    }
}

impl DomainEvent for ScoreChanged {
    fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    fn event_type(&self) -> &'static str {
        "ScoreChanged"
    }
}

impl DomainEvent for SelectionChanged {
    fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    fn event_type(&self) -> &'static str {
        "SelectionChanged"
    }
}

impl DomainEvent for SelectionCleared {
    fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    fn event_type(&self) -> &'static str {
        "SelectionCleared"
    }
}
