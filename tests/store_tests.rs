//! Diagram store integration tests
//!
//! End-to-end scenarios across the store, registry and layout engine: the
//! solve flow a rendering collaborator would drive.

use std::cell::RefCell;
use std::rc::Rc;

use claimgraph::{
    any_arguable_selected, ArguableId, DiagramCommand, DiagramError, DiagramEvent, DiagramId,
    DiagramStore, EdgeId, FlowDirection, NodeId, NodeKind, NodeRelation, Score, SelectionChange,
};

fn seed_node_id(store: &DiagramStore) -> NodeId {
    store.nodes()[0].id
}

#[test]
fn add_solution_under_seed_problem() {
    let mut store = DiagramStore::default();

    // the root diagram starts with seed node "0" of kind Problem
    let seed = seed_node_id(&store);
    assert_eq!(seed.to_string(), "0");
    assert_eq!(store.nodes()[0].kind, NodeKind::Problem);

    let node_count = store.nodes().len();
    let edge_count = store.edges().len();

    let solution = store
        .add_node(seed, NodeRelation::Child, NodeKind::Solution)
        .unwrap();

    assert_eq!(solution.to_string(), "1");
    let node = store
        .nodes()
        .iter()
        .find(|node| node.id == solution)
        .unwrap();
    assert_eq!(node.kind, NodeKind::Solution);

    let edge = &store.edges()[0];
    assert_eq!(edge.source.to_string(), "0");
    assert_eq!(edge.target.to_string(), "1");

    assert_eq!(store.nodes().len(), node_count + 1);
    assert_eq!(store.edges().len(), edge_count + 1);
}

#[test]
fn ids_stay_unique_across_diagrams() {
    let mut store = DiagramStore::default();
    let seed = seed_node_id(&store);

    let mut node_ids = vec![seed];
    let mut edge_ids: Vec<EdgeId> = Vec::new();

    node_ids.push(
        store
            .add_node(seed, NodeRelation::Child, NodeKind::Solution)
            .unwrap(),
    );
    edge_ids.extend(store.edges().iter().map(|edge| edge.id));

    // creating a claim diagram allocates its seed node from the same counter
    store.set_active_diagram(&DiagramId::claim_for_node(seed));
    let claim_seed = seed_node_id(&store);
    node_ids.push(claim_seed);

    node_ids.push(
        store
            .add_node(claim_seed, NodeRelation::Child, NodeKind::Support)
            .unwrap(),
    );
    edge_ids.extend(store.edges().iter().map(|edge| edge.id));

    store.close_claim_diagram();
    node_ids.push(
        store
            .add_node(seed, NodeRelation::Child, NodeKind::Criterion)
            .unwrap(),
    );

    let mut sorted_nodes = node_ids.clone();
    sorted_nodes.sort();
    sorted_nodes.dedup();
    assert_eq!(sorted_nodes.len(), node_ids.len());

    let mut sorted_edges = edge_ids.clone();
    sorted_edges.sort();
    sorted_edges.dedup();
    assert_eq!(sorted_edges.len(), edge_ids.len());
}

#[test]
fn set_active_diagram_is_idempotent_in_content() {
    let mut store = DiagramStore::default();
    let claim_id = DiagramId::new("node-0-claims");

    store.set_active_diagram(&claim_id);
    let first_nodes = store.nodes().to_vec();
    let first_edges = store.edges().to_vec();
    let first_direction = store.direction();

    store.set_active_diagram(&claim_id);

    assert_eq!(store.nodes(), &first_nodes[..]);
    assert_eq!(store.edges(), &first_edges[..]);
    assert_eq!(store.direction(), first_direction);

    // the first call created it with exactly one RootClaim seed
    assert_eq!(first_nodes.len(), 1);
    assert_eq!(first_nodes[0].kind, NodeKind::RootClaim);
    assert_eq!(first_direction, FlowDirection::LeftToRight);
}

#[test]
fn mutations_survive_switching_away_and_back() {
    let mut store = DiagramStore::default();
    let root_seed = seed_node_id(&store);

    let claim_id = DiagramId::claim_for_node(root_seed);
    store.set_active_diagram(&claim_id);
    let claim_seed = seed_node_id(&store);

    store.set_node_label(claim_seed, "this holds up").unwrap();
    let support = store
        .add_node(claim_seed, NodeRelation::Child, NodeKind::Support)
        .unwrap();
    store
        .set_score(ArguableId::Node(support), Score::Nine)
        .unwrap();

    store.set_active_diagram(&DiagramId::root());
    store.set_active_diagram(&claim_id);

    assert_eq!(store.nodes().len(), 2);
    assert_eq!(store.nodes()[0].data.label, "this holds up");
    let support_node = store
        .nodes()
        .iter()
        .find(|node| node.id == support)
        .unwrap();
    assert_eq!(support_node.data.score, Score::Nine);
    assert_eq!(store.edges().len(), 1);
}

#[test]
fn score_persists_across_diagram_switch() {
    let mut store = DiagramStore::default();
    let seed = seed_node_id(&store);

    store
        .set_score(ArguableId::Node(seed), Score::Seven)
        .unwrap();

    store.set_active_diagram(&DiagramId::new("node-0-claims"));
    store.set_active_diagram(&DiagramId::root());

    assert_eq!(store.nodes()[0].data.score, Score::Seven);
}

#[test]
fn deselect_notifies_even_when_already_deselected() {
    let mut store = DiagramStore::default();
    let notifications = Rc::new(RefCell::new(0_usize));
    let sink = Rc::clone(&notifications);
    store.subscribe(move |event| {
        if matches!(event, DiagramEvent::SelectionCleared(_)) {
            *sink.borrow_mut() += 1;
        }
    });

    let seed = seed_node_id(&store);
    store
        .set_selected(&[SelectionChange {
            target: ArguableId::Node(seed),
            selected: true,
        }])
        .unwrap();
    assert!(any_arguable_selected(store.active_diagram()));

    store.deselect_all();
    assert!(!any_arguable_selected(store.active_diagram()));
    assert!(store.nodes().iter().all(|node| !node.selected));

    // nothing selected anymore, the notification still fires
    let revision = store.revision();
    store.deselect_all();

    assert_eq!(*notifications.borrow(), 2);
    assert!(store.revision() > revision);
}

#[test]
fn connect_is_forbidden_on_claim_diagrams_only() {
    let mut store = DiagramStore::default();
    let seed = seed_node_id(&store);
    let solution = store
        .add_node(seed, NodeRelation::Child, NodeKind::Solution)
        .unwrap();
    let criterion = store
        .add_node(seed, NodeRelation::Child, NodeKind::Criterion)
        .unwrap();

    // root diagram: connecting two existing nodes adds exactly one edge
    let edges_before = store.edges().len();
    let node_ids_before: Vec<NodeId> = store.nodes().iter().map(|node| node.id).collect();
    store.connect_nodes(criterion, solution).unwrap();
    assert_eq!(store.edges().len(), edges_before + 1);
    let node_ids_after: Vec<NodeId> = store.nodes().iter().map(|node| node.id).collect();
    assert_eq!(node_ids_before, node_ids_after);

    // claim diagram: the same gesture is an invalid topology operation
    let claim_id = store
        .open_claim_diagram(ArguableId::Node(solution))
        .unwrap();
    let claim_seed = seed_node_id(&store);
    let claim_child = store
        .add_node(claim_seed, NodeRelation::Child, NodeKind::Critique)
        .unwrap();

    let result = store.connect_nodes(claim_seed, claim_child);
    assert_eq!(result, Err(DiagramError::InvalidTopology(claim_id)));
}

#[test]
fn failed_mutation_leaves_state_untouched() {
    let mut store = DiagramStore::default();
    let seed = seed_node_id(&store);
    store
        .add_node(seed, NodeRelation::Child, NodeKind::Solution)
        .unwrap();

    let nodes_before = store.nodes().to_vec();
    let edges_before = store.edges().to_vec();
    let revision_before = store.revision();

    let stale = NodeId::from(123);
    assert!(store
        .add_node(stale, NodeRelation::Child, NodeKind::Effect)
        .is_err());
    assert!(store.set_node_label(stale, "nope").is_err());
    assert!(store
        .set_score(ArguableId::Node(stale), Score::One)
        .is_err());
    assert!(store.delete_node(stale).is_err());
    assert!(store.delete_edge(EdgeId::from(123)).is_err());

    assert_eq!(store.nodes(), &nodes_before[..]);
    assert_eq!(store.edges(), &edges_before[..]);
    assert_eq!(store.revision(), revision_before);
}

#[test]
fn delete_node_cascades_incident_edges() {
    let mut store = DiagramStore::default();
    let seed = seed_node_id(&store);
    let solution = store
        .add_node(seed, NodeRelation::Child, NodeKind::Solution)
        .unwrap();
    let effect = store
        .add_node(solution, NodeRelation::Child, NodeKind::Effect)
        .unwrap();

    let removed_edges = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&removed_edges);
    store.subscribe(move |event| {
        if let DiagramEvent::EdgeRemoved(removed) = event {
            sink.borrow_mut().push(removed.edge_id);
        }
    });

    store.delete_node(solution).unwrap();

    assert_eq!(store.nodes().len(), 2);
    assert!(store.edges().is_empty());
    assert_eq!(removed_edges.borrow().len(), 2);
    assert!(store.nodes().iter().any(|node| node.id == effect));
}

#[test]
fn layout_runs_after_every_structural_change() {
    let mut store = DiagramStore::default();
    let seed = seed_node_id(&store);

    let solution = store
        .add_node(seed, NodeRelation::Child, NodeKind::Solution)
        .unwrap();

    // children are placed a layer away from their parent
    let seed_position = store
        .nodes()
        .iter()
        .find(|node| node.id == seed)
        .unwrap()
        .position;
    let solution_position = store
        .nodes()
        .iter()
        .find(|node| node.id == solution)
        .unwrap()
        .position;
    assert!(solution_position.y > seed_position.y);

    // claim diagrams flow left to right from their seed
    store.open_claim_diagram(ArguableId::Node(solution)).unwrap();
    let claim_seed = seed_node_id(&store);
    let support = store
        .add_node(claim_seed, NodeRelation::Child, NodeKind::Support)
        .unwrap();
    let claim_seed_position = store.nodes()[0].position;
    let support_position = store
        .nodes()
        .iter()
        .find(|node| node.id == support)
        .unwrap()
        .position;
    assert!(support_position.x > claim_seed_position.x);
}

#[test]
fn gesture_commands_drive_a_full_session() {
    let mut store = DiagramStore::default();
    let seed = seed_node_id(&store);

    store
        .apply(DiagramCommand::SetNodeLabel {
            node_id: seed,
            label: "Too much traffic downtown".to_string(),
        })
        .unwrap();
    store
        .apply(DiagramCommand::AddNode {
            to: seed,
            relation: NodeRelation::Child,
            kind: NodeKind::Solution,
        })
        .unwrap();

    let solution = store.nodes()[1].id;
    store
        .apply(DiagramCommand::OpenClaimDiagram {
            target: ArguableId::Node(solution),
        })
        .unwrap();
    assert_eq!(
        store.active_diagram_id(),
        &DiagramId::claim_for_node(solution)
    );

    let root_claim = seed_node_id(&store);
    store
        .apply(DiagramCommand::AddNode {
            to: root_claim,
            relation: NodeRelation::Child,
            kind: NodeKind::Support,
        })
        .unwrap();
    store
        .apply(DiagramCommand::SetScore {
            target: ArguableId::Node(root_claim),
            score: Score::Six,
        })
        .unwrap();
    store.apply(DiagramCommand::CloseClaimDiagram).unwrap();

    assert!(store.active_diagram_id().is_root());
    assert_eq!(
        store.claim_diagram_ids(),
        vec![DiagramId::claim_for_node(solution)]
    );

    // stale gesture after the UI fell behind: rejected, state intact
    let result = store.apply(DiagramCommand::DeleteNode {
        node_id: NodeId::from(77),
    });
    assert_eq!(result, Err(DiagramError::NodeNotFound(NodeId::from(77))));
    assert_eq!(store.nodes().len(), 2);
}
