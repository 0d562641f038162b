//! Diagram commands
//!
//! Commands represent gesture-translated intent from the rendering
//! collaborator: each user action (right-click add, drag-to-connect, click
//! select, text-edit commit, score pick) becomes one command applied to the
//! store. They are plain data so the rendering boundary can queue and
//! serialize them.

use serde::{Deserialize, Serialize};

use crate::aggregate::ids::{ArguableId, DiagramId, EdgeId, NodeId, SelectionChange};
use crate::value_objects::{NodeKind, NodeRelation, Score};

/// Commands for diagram operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiagramCommand {
    /// Add a node attached to an existing node of the active diagram
    AddNode {
        /// The existing node to attach to
        to: NodeId,
        /// Whether the new node becomes a parent or child of `to`
        relation: NodeRelation,
        /// The kind of node to create
        kind: NodeKind,
    },

    /// Connect two existing nodes of the active diagram
    ConnectNodes {
        /// Parent node of the new edge
        source: NodeId,
        /// Child node of the new edge
        target: NodeId,
    },

    /// Delete a node and every edge referencing it
    DeleteNode {
        /// The node to delete
        node_id: NodeId,
    },

    /// Delete an edge
    DeleteEdge {
        /// The edge to delete
        edge_id: EdgeId,
    },

    /// Apply renderer-reported selection changes
    SetSelected {
        /// The changes, in report order
        changes: Vec<SelectionChange>,
    },

    /// Clear every selection flag, publishing unconditionally
    DeselectAll,

    /// Replace a node's label
    SetNodeLabel {
        /// The node to relabel
        node_id: NodeId,
        /// The new label text
        label: String,
    },

    /// Rate a node or edge
    SetScore {
        /// The element being rated
        target: ArguableId,
        /// The rating
        score: Score,
    },

    /// Switch the active diagram, creating a claim diagram on first use
    SetActiveDiagram {
        /// The diagram to activate
        diagram_id: DiagramId,
    },

    /// Navigate into the claim diagram of an element of the active diagram
    OpenClaimDiagram {
        /// The element to argue about
        target: ArguableId,
    },

    /// Navigate back to the root diagram
    CloseClaimDiagram,
}

/// Result type for diagram operations
pub type DiagramResult<T> = Result<T, DiagramError>;

/// Errors that can occur while mutating diagram state
///
/// Reference errors indicate a caller/UI bug (a stale id), not a
/// recoverable user-facing condition; the failed operation leaves state
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum DiagramError {
    /// A node id was not found in the active diagram
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// An edge id was not found in the active diagram
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// A diagram id was not found in the registry
    #[error("diagram not found: {0}")]
    DiagramNotFound(DiagramId),

    /// A structural operation would break a claim diagram's tree shape
    #[error("claim diagram {0} is a tree; existing nodes cannot be connected")]
    InvalidTopology(DiagramId),
}
