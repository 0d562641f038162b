//! Identifiers and id allocation
//!
//! Node and edge ids are monotonically allocated integers rendered as
//! decimal strings, so the published data matches what the rendering
//! collaborator expects. Allocation is never reset and is shared across all
//! diagrams: no two nodes anywhere in the registry ever share an id, and the
//! same holds for edges.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Numeric value of the id
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for NodeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<u64>()
            .map(NodeId)
            .map_err(|_| serde::de::Error::custom(format!("invalid node id: {s}")))
    }
}

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Numeric value of the id
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for EdgeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EdgeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<u64>()
            .map(EdgeId)
            .map_err(|_| serde::de::Error::custom(format!("invalid edge id: {s}")))
    }
}

/// Identifier of a diagram in the registry
///
/// The key space is opaque strings; `root` is reserved for the root diagram
/// and claim diagrams conventionally use ids derived from the element they
/// argue about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagramId(String);

impl DiagramId {
    /// Id of the root diagram
    pub fn root() -> Self {
        Self("root".to_string())
    }

    /// Create a diagram id from an arbitrary string key
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Claim-diagram id for a node
    pub fn claim_for_node(node_id: NodeId) -> Self {
        Self(format!("node-{node_id}-claims"))
    }

    /// Claim-diagram id for an edge
    pub fn claim_for_edge(edge_id: EdgeId) -> Self {
        Self(format!("edge-{edge_id}-claims"))
    }

    /// Whether this is the root diagram's id
    pub fn is_root(&self) -> bool {
        self.0 == "root"
    }

    /// String form of the id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiagramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Typed address of a node or edge eligible to own a claim diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ArguableId {
    /// A node address
    Node(NodeId),
    /// An edge address
    Edge(EdgeId),
}

impl ArguableId {
    /// Claim-diagram id for the addressed element
    pub fn claim_diagram_id(&self) -> DiagramId {
        match self {
            ArguableId::Node(id) => DiagramId::claim_for_node(*id),
            ArguableId::Edge(id) => DiagramId::claim_for_edge(*id),
        }
    }
}

impl fmt::Display for ArguableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArguableId::Node(id) => write!(f, "node {id}"),
            ArguableId::Edge(id) => write!(f, "edge {id}"),
        }
    }
}

/// A selection change reported by the rendering collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
    /// The element whose selection changed
    pub target: ArguableId,
    /// The new selection state
    pub selected: bool,
}

/// Allocator for node and edge ids
///
/// Owned by the diagram registry; counters are atomic so the
/// monotonic-uniqueness contract holds independent of threading.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next_node: AtomicU64,
    next_edge: AtomicU64,
}

impl IdAllocator {
    /// Create a new allocator starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next node id
    pub fn next_node_id(&self) -> NodeId {
        NodeId(self.next_node.fetch_add(1, Ordering::Relaxed))
    }

    /// Allocate the next edge id
    pub fn next_edge_id(&self) -> EdgeId {
        EdgeId(self.next_edge.fetch_add(1, Ordering::Relaxed))
    }
}
