//! Layout collaborator seam
//!
//! The store never computes positions itself: after every structural
//! mutation it hands the affected diagram's full node and edge arrays to a
//! [`LayoutEngine`] and replaces the arrays with the engine's output. The
//! engine must be deterministic for identical topology and direction so
//! re-renders are stable, and it must pass every field other than
//! `position` through unchanged.
//!
//! [`LayeredLayout`] is the default engine, a longest-path layered layout.
//! External engines (e.g. a dagre-style collaborator on the rendering side)
//! plug in through the trait.

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use std::collections::HashMap;
use tracing::debug;

use crate::aggregate::diagram::{Edge, Node};
use crate::aggregate::ids::NodeId;
use crate::value_objects::{FlowDirection, Position};

/// Computes node positions from graph topology and a flow direction
///
/// Implementations receive plain data and therefore cannot reenter the
/// store; the call completes synchronously inside the mutation that
/// triggered it.
pub trait LayoutEngine {
    /// Recompute positions for the full node set
    fn layout(
        &self,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        direction: FlowDirection,
    ) -> (Vec<Node>, Vec<Edge>);
}

/// Deterministic longest-path layered layout
///
/// Nodes are assigned to layers by longest path from a root, then centered
/// within their layer with stable id tie-breaking. Cycles in the root
/// diagram are tolerated: back edges simply stop contributing to layering.
#[derive(Debug, Clone)]
pub struct LayeredLayout {
    /// Distance between consecutive layers
    layer_spacing: f64,
    /// Distance between nodes within a layer
    node_spacing: f64,
}

impl LayeredLayout {
    /// Create a layout with explicit spacing
    pub fn new(layer_spacing: f64, node_spacing: f64) -> Self {
        Self {
            layer_spacing,
            node_spacing,
        }
    }
}

impl Default for LayeredLayout {
    fn default() -> Self {
        // node width is 300; leave a margin between columns
        Self::new(150.0, 350.0)
    }
}

impl LayoutEngine for LayeredLayout {
    fn layout(
        &self,
        mut nodes: Vec<Node>,
        edges: Vec<Edge>,
        direction: FlowDirection,
    ) -> (Vec<Node>, Vec<Edge>) {
        if nodes.is_empty() {
            return (nodes, edges);
        }

        let mut graph: DiGraphMap<NodeId, ()> = DiGraphMap::new();
        for node in &nodes {
            graph.add_node(node.id);
        }
        for edge in &edges {
            graph.add_edge(edge.source, edge.target, ());
        }

        // Longest-path layering over a topological order. If the graph has
        // a cycle, fall back to id order; edges from not-yet-assigned nodes
        // then stop contributing, which keeps the result deterministic.
        let order = match toposort(&graph, None) {
            Ok(order) => order,
            Err(_) => {
                let mut ids: Vec<NodeId> = nodes.iter().map(|node| node.id).collect();
                ids.sort();
                ids
            }
        };

        let mut layers: HashMap<NodeId, usize> = HashMap::new();
        for node_id in &order {
            let layer = graph
                .neighbors_directed(*node_id, petgraph::Direction::Incoming)
                .filter_map(|parent| layers.get(&parent))
                .map(|parent_layer| parent_layer + 1)
                .max()
                .unwrap_or(0);
            layers.insert(*node_id, layer);
        }

        // Stable within-layer ordering by id
        let mut members: HashMap<usize, Vec<NodeId>> = HashMap::new();
        for (node_id, layer) in &layers {
            members.entry(*layer).or_default().push(*node_id);
        }
        for ids in members.values_mut() {
            ids.sort();
        }

        for node in &mut nodes {
            let layer = layers[&node.id];
            let siblings = &members[&layer];
            let index = siblings
                .iter()
                .position(|id| *id == node.id)
                .unwrap_or(0);
            let count = siblings.len();

            let centered = (index as f64 - (count - 1) as f64 / 2.0) * self.node_spacing;
            let depth = layer as f64 * self.layer_spacing;

            node.position = match direction {
                FlowDirection::TopToBottom => Position::new(centered, depth),
                FlowDirection::LeftToRight => Position::new(depth, centered),
            };
        }

        debug!(
            node_count = nodes.len(),
            edge_count = edges.len(),
            direction = %direction,
            "computed layered layout"
        );

        (nodes, edges)
    }
}
