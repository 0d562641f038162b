//! Central diagram state container
//!
//! [`DiagramStore`] is the single source of truth: it owns the
//! [`DiagramRegistry`] (every diagram, keyed by id, plus the id allocator),
//! the active-diagram index, the revision counter and the subscriber list.
//! All mutation operations are synchronous and transactional: validate
//! first, then mutate, then re-layout, then publish. A failed operation
//! returns an error with state exactly as it was before the call.
//!
//! The "active diagram" is an index into the registry, so switching
//! diagrams never copies node or edge arrays; mutations made while a
//! diagram was active are simply still there when it becomes active again.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::aggregate::diagram::{Diagram, DiagramKind, Edge, Node};
use crate::aggregate::ids::{
    ArguableId, DiagramId, EdgeId, IdAllocator, NodeId, SelectionChange,
};
use crate::commands::{DiagramCommand, DiagramError, DiagramResult};
use crate::domain_events::DiagramEvent;
use crate::events::{
    DiagramActivated, DiagramCreated, DomainEvent, EdgeAdded, EdgeRemoved, NodeAdded,
    NodeRelabeled, NodeRemoved, ScoreChanged, SelectionChanged, SelectionCleared,
};
use crate::layout::{LayeredLayout, LayoutEngine};
use crate::value_objects::{FlowDirection, NodeKind, NodeRelation, Score};

/// Observer of published diagram events
pub type Subscriber = Box<dyn Fn(&DiagramEvent)>;

/// Every diagram in the process, keyed by id
///
/// Always contains the `root` entry. Insertion order is preserved, so the
/// ordered list of claim-diagram ids is derived rather than separately
/// maintained. The registry owns the id allocator: ids are unique across
/// all diagrams, not per diagram.
#[derive(Debug)]
pub struct DiagramRegistry {
    entries: IndexMap<DiagramId, Diagram>,
    ids: IdAllocator,
}

impl DiagramRegistry {
    fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Look up a diagram by id
    pub fn get(&self, diagram_id: &DiagramId) -> Option<&Diagram> {
        self.entries.get(diagram_id)
    }

    /// Whether a diagram with this id exists
    pub fn contains(&self, diagram_id: &DiagramId) -> bool {
        self.entries.contains_key(diagram_id)
    }

    /// Number of registered diagrams
    pub fn diagram_count(&self) -> usize {
        self.entries.len()
    }

    /// Claim-diagram ids in creation order
    pub fn claim_diagram_ids(&self) -> Vec<DiagramId> {
        self.entries
            .keys()
            .filter(|id| !id.is_root())
            .cloned()
            .collect()
    }

    fn get_mut(&mut self, diagram_id: &DiagramId) -> Option<&mut Diagram> {
        self.entries.get_mut(diagram_id)
    }

    fn remove(&mut self, diagram_id: &DiagramId) -> Option<Diagram> {
        self.entries.shift_remove(diagram_id)
    }
}

/// Create a diagram holding a single laid-out seed node
fn seed_diagram(
    ids: &IdAllocator,
    layout: &dyn LayoutEngine,
    kind: DiagramKind,
    direction: FlowDirection,
    seed_kind: NodeKind,
) -> (Diagram, NodeId) {
    let seed_id = ids.next_node_id();
    let mut diagram = Diagram::new(kind, direction);
    diagram.insert_node(Node::build(seed_id, seed_kind));

    let (nodes, edges) = diagram.take_topology();
    let (nodes, edges) = layout.layout(nodes, edges, direction);
    diagram.restore_topology(nodes, edges);

    (diagram, seed_id)
}

/// The central state container for all diagrams
pub struct DiagramStore {
    registry: DiagramRegistry,
    active: DiagramId,
    revision: u64,
    layout: Box<dyn LayoutEngine>,
    subscribers: Vec<Subscriber>,
}

impl Default for DiagramStore {
    fn default() -> Self {
        Self::new(Box::new(LayeredLayout::default()))
    }
}

impl DiagramStore {
    /// Create a store with the given layout engine
    ///
    /// The registry starts with the root diagram: a single `Problem` seed
    /// node, flowing top to bottom.
    pub fn new(layout: Box<dyn LayoutEngine>) -> Self {
        let mut registry = DiagramRegistry::new();
        let (root, seed_id) = seed_diagram(
            &registry.ids,
            layout.as_ref(),
            DiagramKind::Root,
            FlowDirection::TopToBottom,
            NodeKind::Problem,
        );
        registry.entries.insert(DiagramId::root(), root);
        debug!(%seed_id, "seeded root diagram");

        Self {
            registry,
            active: DiagramId::root(),
            revision: 0,
            layout,
            subscribers: Vec::new(),
        }
    }

    /// Nodes of the active diagram, in insertion order
    pub fn nodes(&self) -> &[Node] {
        self.active_ref().nodes()
    }

    /// Edges of the active diagram, in insertion order
    pub fn edges(&self) -> &[Edge] {
        self.active_ref().edges()
    }

    /// Flow direction of the active diagram
    pub fn direction(&self) -> FlowDirection {
        self.active_ref().direction()
    }

    /// The active diagram
    pub fn active_diagram(&self) -> &Diagram {
        self.active_ref()
    }

    /// Id of the active diagram
    pub fn active_diagram_id(&self) -> &DiagramId {
        &self.active
    }

    /// Monotone publish counter
    ///
    /// Bumped by every publish, including value-unchanged deselection
    /// publishes, so observers comparing revisions always see a change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Read access to every registered diagram
    pub fn registry(&self) -> &DiagramRegistry {
        &self.registry
    }

    /// Whether a diagram with this id exists
    pub fn diagram_exists(&self, diagram_id: &DiagramId) -> bool {
        self.registry.contains(diagram_id)
    }

    /// Claim-diagram ids in creation order
    pub fn claim_diagram_ids(&self) -> Vec<DiagramId> {
        self.registry.claim_diagram_ids()
    }

    /// Register an observer of published events
    ///
    /// Subscribers are called after the mutation that produced an event has
    /// fully applied; they cannot mutate the store reentrantly.
    pub fn subscribe(&mut self, subscriber: impl Fn(&DiagramEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Dispatch a gesture-translated command
    pub fn apply(&mut self, command: DiagramCommand) -> DiagramResult<()> {
        match command {
            DiagramCommand::AddNode { to, relation, kind } => {
                self.add_node(to, relation, kind)?;
                Ok(())
            }
            DiagramCommand::ConnectNodes { source, target } => {
                self.connect_nodes(source, target)?;
                Ok(())
            }
            DiagramCommand::DeleteNode { node_id } => self.delete_node(node_id),
            DiagramCommand::DeleteEdge { edge_id } => self.delete_edge(edge_id),
            DiagramCommand::SetSelected { changes } => self.set_selected(&changes),
            DiagramCommand::DeselectAll => {
                self.deselect_all();
                Ok(())
            }
            DiagramCommand::SetNodeLabel { node_id, label } => {
                self.set_node_label(node_id, &label)
            }
            DiagramCommand::SetScore { target, score } => self.set_score(target, score),
            DiagramCommand::SetActiveDiagram { diagram_id } => {
                self.set_active_diagram(&diagram_id);
                Ok(())
            }
            DiagramCommand::OpenClaimDiagram { target } => {
                self.open_claim_diagram(target)?;
                Ok(())
            }
            DiagramCommand::CloseClaimDiagram => {
                self.close_claim_diagram();
                Ok(())
            }
        }
    }

    /// Add a node attached to an existing node of the active diagram
    ///
    /// `Parent` makes the new node the source of the connecting edge,
    /// `Child` the target. Returns the new node's id.
    pub fn add_node(
        &mut self,
        to: NodeId,
        relation: NodeRelation,
        kind: NodeKind,
    ) -> DiagramResult<NodeId> {
        if !self.active_ref().contains_node(to) {
            return Err(DiagramError::NodeNotFound(to));
        }

        let node_id = self.registry.ids.next_node_id();
        let edge_id = self.registry.ids.next_edge_id();
        let (source, target) = match relation {
            NodeRelation::Parent => (node_id, to),
            NodeRelation::Child => (to, node_id),
        };

        let diagram = self.active_mut();
        diagram.insert_node(Node::build(node_id, kind));
        diagram.insert_edge(Edge::build(edge_id, source, target))?;
        self.relayout_active();

        let diagram_id = self.active.clone();
        info!(%node_id, %edge_id, diagram_id = %diagram_id, kind = %kind, "added node");
        self.publish(vec![
            DiagramEvent::NodeAdded(NodeAdded {
                diagram_id: diagram_id.clone(),
                node_id,
                kind,
            }),
            DiagramEvent::EdgeAdded(EdgeAdded {
                diagram_id,
                edge_id,
                source,
                target,
            }),
        ]);

        Ok(node_id)
    }

    /// Connect two existing nodes of the active diagram
    ///
    /// Claim diagrams are trees; connecting existing nodes there is an
    /// invalid topology operation.
    pub fn connect_nodes(&mut self, source: NodeId, target: NodeId) -> DiagramResult<EdgeId> {
        let diagram = self.active_ref();
        if diagram.kind() == DiagramKind::Claim {
            return Err(DiagramError::InvalidTopology(self.active.clone()));
        }
        if !diagram.contains_node(source) {
            return Err(DiagramError::NodeNotFound(source));
        }
        if !diagram.contains_node(target) {
            return Err(DiagramError::NodeNotFound(target));
        }

        let edge_id = self.registry.ids.next_edge_id();
        self.active_mut()
            .insert_edge(Edge::build(edge_id, source, target))?;
        self.relayout_active();

        let diagram_id = self.active.clone();
        info!(%edge_id, %source, %target, diagram_id = %diagram_id, "connected nodes");
        self.publish(vec![DiagramEvent::EdgeAdded(EdgeAdded {
            diagram_id,
            edge_id,
            source,
            target,
        })]);

        Ok(edge_id)
    }

    /// Delete a node and every edge referencing it
    ///
    /// Claim diagrams registered for the removed elements are dropped with
    /// them.
    pub fn delete_node(&mut self, node_id: NodeId) -> DiagramResult<()> {
        let (node, cascaded) = self.active_mut().remove_node(node_id)?;

        self.registry.remove(&DiagramId::claim_for_node(node.id));
        for edge in &cascaded {
            self.registry.remove(&DiagramId::claim_for_edge(edge.id));
        }
        self.relayout_active();

        let diagram_id = self.active.clone();
        info!(%node_id, cascaded = cascaded.len(), diagram_id = %diagram_id, "deleted node");
        let mut events = vec![DiagramEvent::NodeRemoved(NodeRemoved {
            diagram_id: diagram_id.clone(),
            node_id,
        })];
        for edge in cascaded {
            events.push(DiagramEvent::EdgeRemoved(EdgeRemoved {
                diagram_id: diagram_id.clone(),
                edge_id: edge.id,
            }));
        }
        self.publish(events);

        Ok(())
    }

    /// Delete an edge
    pub fn delete_edge(&mut self, edge_id: EdgeId) -> DiagramResult<()> {
        let edge = self.active_mut().remove_edge(edge_id)?;

        self.registry.remove(&DiagramId::claim_for_edge(edge.id));
        self.relayout_active();

        let diagram_id = self.active.clone();
        info!(%edge_id, diagram_id = %diagram_id, "deleted edge");
        self.publish(vec![DiagramEvent::EdgeRemoved(EdgeRemoved {
            diagram_id,
            edge_id,
        })]);

        Ok(())
    }

    /// Apply renderer-reported selection changes
    pub fn set_selected(&mut self, changes: &[SelectionChange]) -> DiagramResult<()> {
        // validate everything up front so a stale id cannot leave a
        // partial write
        for change in changes {
            if !self.active_ref().contains_arguable(change.target) {
                return Err(arguable_not_found(change.target));
            }
        }

        let diagram = self.active_mut();
        for change in changes {
            diagram.set_selected(change)?;
        }

        let diagram_id = self.active.clone();
        self.publish(vec![DiagramEvent::SelectionChanged(SelectionChanged {
            diagram_id,
            changes: changes.to_vec(),
        })]);

        Ok(())
    }

    /// Clear every selection flag of the active diagram
    ///
    /// Publishes a new revision unconditionally: the rendering collaborator
    /// relies on the notification even when nothing was selected.
    pub fn deselect_all(&mut self) {
        let cleared = self.active_mut().clear_selection();

        let diagram_id = self.active.clone();
        debug!(cleared, diagram_id = %diagram_id, "deselected all");
        self.publish(vec![DiagramEvent::SelectionCleared(SelectionCleared {
            diagram_id,
            cleared,
        })]);
    }

    /// Replace a node's label
    ///
    /// Labels do not move nodes, so no re-layout happens here.
    pub fn set_node_label(&mut self, node_id: NodeId, label: &str) -> DiagramResult<()> {
        self.active_mut().set_node_label(node_id, label)?;

        let diagram_id = self.active.clone();
        self.publish(vec![DiagramEvent::NodeRelabeled(NodeRelabeled {
            diagram_id,
            node_id,
            label: label.to_string(),
        })]);

        Ok(())
    }

    /// Rate a node or edge of the active diagram
    pub fn set_score(&mut self, target: ArguableId, score: Score) -> DiagramResult<()> {
        self.active_mut().set_score(target, score)?;

        let diagram_id = self.active.clone();
        info!(%target, score = %score, diagram_id = %diagram_id, "scored arguable");
        self.publish(vec![DiagramEvent::ScoreChanged(ScoreChanged {
            diagram_id,
            target,
            score,
        })]);

        Ok(())
    }

    /// Switch the active diagram
    ///
    /// Unknown ids create a claim diagram on first use: one `RootClaim`
    /// seed node, flowing left to right. Calling this twice in a row with
    /// no mutation in between publishes the same content both times.
    pub fn set_active_diagram(&mut self, diagram_id: &DiagramId) {
        let mut events = Vec::new();

        if !self.registry.contains(diagram_id) {
            let (diagram, seed_node_id) = seed_diagram(
                &self.registry.ids,
                self.layout.as_ref(),
                DiagramKind::Claim,
                FlowDirection::LeftToRight,
                NodeKind::RootClaim,
            );
            let created_at = diagram.created_at();
            self.registry.entries.insert(diagram_id.clone(), diagram);

            info!(diagram_id = %diagram_id, %seed_node_id, "created claim diagram");
            events.push(DiagramEvent::DiagramCreated(DiagramCreated {
                diagram_id: diagram_id.clone(),
                kind: DiagramKind::Claim,
                direction: FlowDirection::LeftToRight,
                seed_node_id,
                created_at,
            }));
        }

        let previous = std::mem::replace(&mut self.active, diagram_id.clone());
        debug!(diagram_id = %diagram_id, previous = %previous, "activated diagram");
        events.push(DiagramEvent::DiagramActivated(DiagramActivated {
            diagram_id: diagram_id.clone(),
            previous,
        }));
        self.publish(events);
    }

    /// Navigate into the claim diagram of an element of the active diagram
    pub fn open_claim_diagram(&mut self, target: ArguableId) -> DiagramResult<DiagramId> {
        if !self.active_ref().contains_arguable(target) {
            return Err(arguable_not_found(target));
        }

        let diagram_id = target.claim_diagram_id();
        self.set_active_diagram(&diagram_id);
        Ok(diagram_id)
    }

    /// Navigate back to the root diagram
    pub fn close_claim_diagram(&mut self) -> DiagramId {
        let root = DiagramId::root();
        self.set_active_diagram(&root);
        root
    }

    fn active_ref(&self) -> &Diagram {
        self.registry
            .get(&self.active)
            .expect("active diagram is always registered")
    }

    fn active_mut(&mut self) -> &mut Diagram {
        self.registry
            .get_mut(&self.active)
            .expect("active diagram is always registered")
    }

    fn relayout_active(&mut self) {
        let direction = self.active_ref().direction();
        let (nodes, edges) = self.active_mut().take_topology();
        let (nodes, edges) = self.layout.layout(nodes, edges, direction);
        self.active_mut().restore_topology(nodes, edges);
    }

    fn publish(&mut self, events: Vec<DiagramEvent>) {
        self.revision += 1;
        for event in &events {
            debug!(
                event = event.event_type(),
                revision = self.revision,
                "published diagram event"
            );
            for subscriber in &self.subscribers {
                subscriber(event);
            }
        }
    }
}

fn arguable_not_found(target: ArguableId) -> DiagramError {
    match target {
        ArguableId::Node(id) => DiagramError::NodeNotFound(id),
        ArguableId::Edge(id) => DiagramError::EdgeNotFound(id),
    }
}
