//! Diagram state core for interactive argument mapping
//!
//! Users build directed graphs of claims (problems, solutions, criteria, …)
//! and attach sub-graphs of argumentation ("claim diagrams") to any node or
//! edge, then score elements to evaluate competing options. This crate is
//! the state core only: rendering and production layout are external
//! collaborators that call into [`store::DiagramStore`] and consume the
//! published node/edge data and domain events.

pub mod aggregate;
pub mod commands;
pub mod domain_events;
pub mod events;
pub mod layout;
pub mod queries;
pub mod store;
pub mod value_objects;

// Re-export main types
pub use aggregate::{
    ArguableId, Diagram, DiagramId, DiagramKind, Edge, EdgeData, EdgeId, IdAllocator, Node,
    NodeData, NodeId, SelectionChange, DEFAULT_NODE_WIDTH,
};

// Re-export commands and their types
pub use commands::{DiagramCommand, DiagramError, DiagramResult};

// Re-export events
pub use domain_events::DiagramEvent;
pub use events::DomainEvent;

// Re-export the layout seam
pub use layout::{LayeredLayout, LayoutEngine};

// Re-export query functions
pub use queries::{
    any_arguable_selected, score_of, scored_arguables, selected_arguables, selected_edges,
    selected_nodes,
};

// Re-export the store
pub use store::{DiagramRegistry, DiagramStore};

// Re-export value objects
pub use value_objects::{
    Color, EdgeKind, FlowDirection, NodeDecoration, NodeKind, NodeRelation, Position, Score,
};
