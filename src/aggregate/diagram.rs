//! Diagram aggregate
//!
//! A diagram is one independent directed graph: ordered node and edge
//! arrays plus a flow direction. Structural operations validate before
//! mutating so a failed call never partially applies, and node removal
//! cascades to every edge referencing the node.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::ids::{ArguableId, EdgeId, NodeId, SelectionChange};
use crate::commands::DiagramError;
use crate::value_objects::{EdgeKind, FlowDirection, NodeKind, Position, Score};

/// Default node width, a layout hint for the rendering collaborator
pub const DEFAULT_NODE_WIDTH: f64 = 300.0;

/// User-editable content of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// User text displayed in the node
    pub label: String,
    /// Rating of the node
    pub score: Score,
    /// Width layout hint
    pub width: f64,
}

/// A node in a diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier of the node
    pub id: NodeId,
    /// Semantic kind, fixed at creation
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// User-editable content
    pub data: NodeData,
    /// Position computed by the layout engine
    pub position: Position,
    /// Whether the node is currently selected
    pub selected: bool,
}

impl Node {
    /// Build a well-formed node with placeholder position
    ///
    /// The layout engine overwrites the position on the next structural
    /// mutation of the owning diagram.
    pub fn build(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            data: NodeData {
                label: format!("text{id}"),
                score: Score::default(),
                width: DEFAULT_NODE_WIDTH,
            },
            position: Position::default(),
            selected: false,
        }
    }
}

/// User-editable content of an edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Rating of the edge
    pub score: Score,
}

/// A directed edge in a diagram
///
/// `source -> target` encodes parent -> child meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier of the edge
    pub id: EdgeId,
    /// Parent node id
    pub source: NodeId,
    /// Child node id
    pub target: NodeId,
    /// User-editable content
    pub data: EdgeData,
    /// Rendering-kind tag
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    /// Whether the edge is currently selected
    pub selected: bool,
}

impl Edge {
    /// Build a well-formed edge
    pub fn build(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self {
            id,
            source,
            target,
            data: EdgeData {
                score: Score::default(),
            },
            kind: EdgeKind::default(),
            selected: false,
        }
    }
}

/// What shape of graph a diagram permits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    /// The topic diagram; arbitrary connections between existing nodes
    Root,
    /// A claim diagram; a tree by construction
    Claim,
}

/// One independent directed graph of nodes and edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    direction: FlowDirection,
    kind: DiagramKind,
    created_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
}

impl Diagram {
    /// Create an empty diagram
    pub fn new(kind: DiagramKind, direction: FlowDirection) -> Self {
        let now = Utc::now();
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            direction,
            kind,
            created_at: now,
            last_modified: now,
        }
    }

    /// Get all nodes in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get all edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get the flow direction
    pub fn direction(&self) -> FlowDirection {
        self.direction
    }

    /// Get the diagram kind
    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    /// Get creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get last modified timestamp
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a node by id
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == node_id)
    }

    /// Look up an edge by id
    pub fn edge(&self, edge_id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == edge_id)
    }

    /// Whether a node with this id exists
    pub fn contains_node(&self, node_id: NodeId) -> bool {
        self.node(node_id).is_some()
    }

    /// Whether an edge with this id exists
    pub fn contains_edge(&self, edge_id: EdgeId) -> bool {
        self.edge(edge_id).is_some()
    }

    /// Whether the addressed arguable exists
    pub fn contains_arguable(&self, target: ArguableId) -> bool {
        match target {
            ArguableId::Node(id) => self.contains_node(id),
            ArguableId::Edge(id) => self.contains_edge(id),
        }
    }

    /// Append a node to the diagram
    pub fn insert_node(&mut self, node: Node) {
        self.nodes.push(node);
        self.touch();
    }

    /// Append an edge to the diagram
    ///
    /// Both endpoints must already exist in this diagram.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<(), DiagramError> {
        if !self.contains_node(edge.source) {
            return Err(DiagramError::NodeNotFound(edge.source));
        }
        if !self.contains_node(edge.target) {
            return Err(DiagramError::NodeNotFound(edge.target));
        }

        self.edges.push(edge);
        self.touch();
        Ok(())
    }

    /// Remove a node and every edge referencing it
    ///
    /// Returns the removed node and the cascaded edges so the caller can
    /// publish removal events and clean up claim diagrams.
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<(Node, Vec<Edge>), DiagramError> {
        let index = self
            .nodes
            .iter()
            .position(|node| node.id == node_id)
            .ok_or(DiagramError::NodeNotFound(node_id))?;

        let node = self.nodes.remove(index);

        let mut cascaded = Vec::new();
        self.edges.retain(|edge| {
            let incident = edge.source == node_id || edge.target == node_id;
            if incident {
                cascaded.push(edge.clone());
            }
            !incident
        });

        self.touch();
        Ok((node, cascaded))
    }

    /// Remove an edge
    pub fn remove_edge(&mut self, edge_id: EdgeId) -> Result<Edge, DiagramError> {
        let index = self
            .edges
            .iter()
            .position(|edge| edge.id == edge_id)
            .ok_or(DiagramError::EdgeNotFound(edge_id))?;

        let edge = self.edges.remove(index);
        self.touch();
        Ok(edge)
    }

    /// Update a node's label
    pub fn set_node_label(&mut self, node_id: NodeId, label: &str) -> Result<(), DiagramError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|node| node.id == node_id)
            .ok_or(DiagramError::NodeNotFound(node_id))?;

        node.data.label = label.to_string();
        self.touch();
        Ok(())
    }

    /// Set the score of a node or edge
    pub fn set_score(&mut self, target: ArguableId, score: Score) -> Result<(), DiagramError> {
        match target {
            ArguableId::Node(node_id) => {
                let node = self
                    .nodes
                    .iter_mut()
                    .find(|node| node.id == node_id)
                    .ok_or(DiagramError::NodeNotFound(node_id))?;
                node.data.score = score;
            }
            ArguableId::Edge(edge_id) => {
                let edge = self
                    .edges
                    .iter_mut()
                    .find(|edge| edge.id == edge_id)
                    .ok_or(DiagramError::EdgeNotFound(edge_id))?;
                edge.data.score = score;
            }
        }

        self.touch();
        Ok(())
    }

    /// Apply a renderer-reported selection change
    pub fn set_selected(&mut self, change: &SelectionChange) -> Result<(), DiagramError> {
        match change.target {
            ArguableId::Node(node_id) => {
                let node = self
                    .nodes
                    .iter_mut()
                    .find(|node| node.id == node_id)
                    .ok_or(DiagramError::NodeNotFound(node_id))?;
                node.selected = change.selected;
            }
            ArguableId::Edge(edge_id) => {
                let edge = self
                    .edges
                    .iter_mut()
                    .find(|edge| edge.id == edge_id)
                    .ok_or(DiagramError::EdgeNotFound(edge_id))?;
                edge.selected = change.selected;
            }
        }

        Ok(())
    }

    /// Clear every node's and edge's selection flag
    ///
    /// Returns how many elements were actually selected.
    pub fn clear_selection(&mut self) -> usize {
        let mut cleared = 0;

        for node in &mut self.nodes {
            if node.selected {
                cleared += 1;
            }
            node.selected = false;
        }
        for edge in &mut self.edges {
            if edge.selected {
                cleared += 1;
            }
            edge.selected = false;
        }

        cleared
    }

    /// Move the node and edge arrays out for a layout pass
    pub fn take_topology(&mut self) -> (Vec<Node>, Vec<Edge>) {
        (std::mem::take(&mut self.nodes), std::mem::take(&mut self.edges))
    }

    /// Put the layouted node and edge arrays back
    ///
    /// The layout engine's output fully replaces the arrays; every field
    /// other than `position` must have passed through unchanged.
    pub fn restore_topology(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        self.nodes = nodes;
        self.edges = edges;
        self.touch();
    }

    fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagram_with_nodes(ids: &[u64]) -> Diagram {
        let mut diagram = Diagram::new(DiagramKind::Root, FlowDirection::TopToBottom);
        for id in ids {
            diagram.insert_node(Node::build(NodeId::from(*id), NodeKind::Problem));
        }
        diagram
    }

    #[test]
    fn test_built_node_defaults() {
        let node = Node::build(NodeId::from(4), NodeKind::Solution);

        assert_eq!(node.data.label, "text4");
        assert_eq!(node.data.score, Score::Unscored);
        assert_eq!(node.data.width, DEFAULT_NODE_WIDTH);
        assert_eq!(node.position, Position::default());
        assert!(!node.selected);
    }

    #[test]
    fn test_built_edge_defaults() {
        let edge = Edge::build(EdgeId::from(0), NodeId::from(0), NodeId::from(1));

        assert_eq!(edge.data.score, Score::Unscored);
        assert_eq!(edge.kind, EdgeKind::Score);
        assert!(!edge.selected);
    }

    #[test]
    fn test_insert_edge_validates_endpoints() {
        let mut diagram = diagram_with_nodes(&[0, 1]);

        let valid = Edge::build(EdgeId::from(0), NodeId::from(0), NodeId::from(1));
        assert!(diagram.insert_edge(valid).is_ok());

        let dangling = Edge::build(EdgeId::from(1), NodeId::from(0), NodeId::from(9));
        let result = diagram.insert_edge(dangling);
        assert_eq!(result, Err(DiagramError::NodeNotFound(NodeId::from(9))));
        assert_eq!(diagram.edge_count(), 1);
    }

    #[test]
    fn test_remove_node_cascades_to_edges() {
        let mut diagram = diagram_with_nodes(&[0, 1, 2]);
        diagram
            .insert_edge(Edge::build(EdgeId::from(0), NodeId::from(0), NodeId::from(1)))
            .unwrap();
        diagram
            .insert_edge(Edge::build(EdgeId::from(1), NodeId::from(1), NodeId::from(2)))
            .unwrap();
        diagram
            .insert_edge(Edge::build(EdgeId::from(2), NodeId::from(0), NodeId::from(2)))
            .unwrap();

        let (node, cascaded) = diagram.remove_node(NodeId::from(1)).unwrap();

        assert_eq!(node.id, NodeId::from(1));
        assert_eq!(cascaded.len(), 2);
        assert_eq!(diagram.node_count(), 2);
        assert_eq!(diagram.edge_count(), 1);
        assert!(diagram.contains_edge(EdgeId::from(2)));
    }

    #[test]
    fn test_remove_missing_node_fails_without_changes() {
        let mut diagram = diagram_with_nodes(&[0]);

        let result = diagram.remove_node(NodeId::from(5));
        assert_eq!(result, Err(DiagramError::NodeNotFound(NodeId::from(5))));
        assert_eq!(diagram.node_count(), 1);
    }

    #[test]
    fn test_set_score_on_node_and_edge() {
        let mut diagram = diagram_with_nodes(&[0, 1]);
        diagram
            .insert_edge(Edge::build(EdgeId::from(0), NodeId::from(0), NodeId::from(1)))
            .unwrap();

        diagram
            .set_score(ArguableId::Node(NodeId::from(0)), Score::Seven)
            .unwrap();
        diagram
            .set_score(ArguableId::Edge(EdgeId::from(0)), Score::Two)
            .unwrap();

        assert_eq!(diagram.node(NodeId::from(0)).unwrap().data.score, Score::Seven);
        assert_eq!(diagram.edge(EdgeId::from(0)).unwrap().data.score, Score::Two);

        let missing = diagram.set_score(ArguableId::Edge(EdgeId::from(9)), Score::One);
        assert_eq!(missing, Err(DiagramError::EdgeNotFound(EdgeId::from(9))));
    }

    #[test]
    fn test_clear_selection_counts_selected_elements() {
        let mut diagram = diagram_with_nodes(&[0, 1]);
        diagram
            .insert_edge(Edge::build(EdgeId::from(0), NodeId::from(0), NodeId::from(1)))
            .unwrap();
        diagram
            .set_selected(&SelectionChange {
                target: ArguableId::Node(NodeId::from(1)),
                selected: true,
            })
            .unwrap();
        diagram
            .set_selected(&SelectionChange {
                target: ArguableId::Edge(EdgeId::from(0)),
                selected: true,
            })
            .unwrap();

        assert_eq!(diagram.clear_selection(), 2);
        assert!(diagram.nodes().iter().all(|node| !node.selected));
        assert!(diagram.edges().iter().all(|edge| !edge.selected));

        // idempotent; nothing left to clear
        assert_eq!(diagram.clear_selection(), 0);
    }

    #[test]
    fn test_topology_round_trip_preserves_content() {
        let mut diagram = diagram_with_nodes(&[0, 1]);
        diagram
            .insert_edge(Edge::build(EdgeId::from(0), NodeId::from(0), NodeId::from(1)))
            .unwrap();
        diagram.set_node_label(NodeId::from(0), "renamed").unwrap();

        let (nodes, edges) = diagram.take_topology();
        assert_eq!(diagram.node_count(), 0);

        diagram.restore_topology(nodes, edges);
        assert_eq!(diagram.node_count(), 2);
        assert_eq!(diagram.node(NodeId::from(0)).unwrap().data.label, "renamed");
    }
}
