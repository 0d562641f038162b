//! Worked argument-mapping example
//!
//! Drives the diagram store through a small solve session (a problem, two
//! solutions, a criterion, a claim diagram, scores) and prints the
//! resulting diagrams as JSON.

use anyhow::Result;

use claimgraph::{
    ArguableId, DiagramStore, NodeKind, NodeRelation, Score,
};

fn main() -> Result<()> {
    let mut store = DiagramStore::default();

    // The root diagram starts with a single Problem seed node.
    let problem = store.nodes()[0].id;
    store.set_node_label(problem, "City bike lanes are underused")?;

    let paint = store.add_node(problem, NodeRelation::Child, NodeKind::Solution)?;
    store.set_node_label(paint, "Repaint and widen the lanes")?;

    let rental = store.add_node(problem, NodeRelation::Child, NodeKind::Solution)?;
    store.set_node_label(rental, "Subsidize bike rentals")?;

    let cost = store.add_node(paint, NodeRelation::Child, NodeKind::Criterion)?;
    store.set_node_label(cost, "Low cost to the city")?;
    store.connect_nodes(rental, cost)?;

    // Argue about one of the solutions in its claim diagram.
    let claim_diagram = store.open_claim_diagram(ArguableId::Node(paint))?;
    let root_claim = store.nodes()[0].id;
    store.set_node_label(root_claim, "Repainting is worth doing")?;

    let support = store.add_node(root_claim, NodeRelation::Child, NodeKind::Support)?;
    store.set_node_label(support, "Wider lanes feel safer")?;

    let critique = store.add_node(root_claim, NodeRelation::Child, NodeKind::Critique)?;
    store.set_node_label(critique, "Paint fades within two years")?;

    store.set_score(ArguableId::Node(support), Score::Eight)?;
    store.set_score(ArguableId::Node(critique), Score::Four)?;

    println!("claim diagram {claim_diagram}:");
    println!("{}", serde_json::to_string_pretty(store.active_diagram())?);

    // Back to the root diagram; score the competing solutions.
    store.close_claim_diagram();
    store.set_score(ArguableId::Node(paint), Score::Seven)?;
    store.set_score(ArguableId::Node(rental), Score::Five)?;

    println!("\nroot diagram:");
    println!("{}", serde_json::to_string_pretty(store.active_diagram())?);

    println!("\nclaim diagrams registered:");
    for diagram_id in store.claim_diagram_ids() {
        println!("  {diagram_id}");
    }

    Ok(())
}
