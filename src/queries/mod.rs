//! Selection and scoring queries
//!
//! Pure reads derived from a diagram's current node and edge flags; no
//! storage of their own. UI chrome uses these to decide things like whether
//! a "show claims" affordance should be enabled.

use crate::aggregate::diagram::{Diagram, Edge, Node};
use crate::aggregate::ids::ArguableId;
use crate::value_objects::Score;

/// Whether any node or edge of the diagram is selected
pub fn any_arguable_selected(diagram: &Diagram) -> bool {
    diagram.nodes().iter().any(|node| node.selected)
        || diagram.edges().iter().any(|edge| edge.selected)
}

/// Every selected node or edge, nodes first, in insertion order
pub fn selected_arguables(diagram: &Diagram) -> Vec<ArguableId> {
    let nodes = diagram
        .nodes()
        .iter()
        .filter(|node| node.selected)
        .map(|node| ArguableId::Node(node.id));
    let edges = diagram
        .edges()
        .iter()
        .filter(|edge| edge.selected)
        .map(|edge| ArguableId::Edge(edge.id));

    nodes.chain(edges).collect()
}

/// Selected nodes, in insertion order
pub fn selected_nodes(diagram: &Diagram) -> Vec<&Node> {
    diagram.nodes().iter().filter(|node| node.selected).collect()
}

/// Selected edges, in insertion order
pub fn selected_edges(diagram: &Diagram) -> Vec<&Edge> {
    diagram.edges().iter().filter(|edge| edge.selected).collect()
}

/// Score of the addressed element, if it exists
pub fn score_of(diagram: &Diagram, target: ArguableId) -> Option<Score> {
    match target {
        ArguableId::Node(id) => diagram.node(id).map(|node| node.data.score),
        ArguableId::Edge(id) => diagram.edge(id).map(|edge| edge.data.score),
    }
}

/// Every scored element with its rating, nodes first, in insertion order
pub fn scored_arguables(diagram: &Diagram) -> Vec<(ArguableId, Score)> {
    let nodes = diagram
        .nodes()
        .iter()
        .filter(|node| node.data.score.is_scored())
        .map(|node| (ArguableId::Node(node.id), node.data.score));
    let edges = diagram
        .edges()
        .iter()
        .filter(|edge| edge.data.score.is_scored())
        .map(|edge| (ArguableId::Edge(edge.id), edge.data.score));

    nodes.chain(edges).collect()
}
