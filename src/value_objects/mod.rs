//! Diagram value objects
//!
//! Value objects are immutable types that represent concepts in the
//! argument-mapping domain. They are compared by value rather than identity
//! and are closed sets: the rendering boundary resolves presentation
//! metadata through lookups on these enums rather than duck-typed maps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic kinds of nodes in a diagram, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// A problem being worked through
    Problem,
    /// A proposed solution to a problem
    Solution,
    /// A piece of a solution
    SolutionComponent,
    /// A criterion for judging solutions
    Criterion,
    /// An effect a solution would have
    Effect,
    /// The root claim of a claim diagram
    RootClaim,
    /// An argument supporting its parent claim
    Support,
    /// An argument against its parent claim
    Critique,
}

impl NodeKind {
    /// All node kinds, in presentation order
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Problem,
        NodeKind::Solution,
        NodeKind::SolutionComponent,
        NodeKind::Criterion,
        NodeKind::Effect,
        NodeKind::RootClaim,
        NodeKind::Support,
        NodeKind::Critique,
    ];

    /// Get the string representation of the node kind
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Problem => "problem",
            NodeKind::Solution => "solution",
            NodeKind::SolutionComponent => "solutionComponent",
            NodeKind::Criterion => "criterion",
            NodeKind::Effect => "effect",
            NodeKind::RootClaim => "rootClaim",
            NodeKind::Support => "support",
            NodeKind::Critique => "critique",
        }
    }

    /// Parse a node kind from its string representation
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == s)
    }

    /// Presentation metadata for this kind, resolved at the rendering boundary
    pub fn decoration(&self) -> NodeDecoration {
        match self {
            NodeKind::Problem => NodeDecoration {
                title: "Problem",
                color: Color::rgb(0xef, 0x53, 0x50),
            },
            NodeKind::Solution => NodeDecoration {
                title: "Solution",
                color: Color::rgb(0x66, 0xbb, 0x6a),
            },
            NodeKind::SolutionComponent => NodeDecoration {
                title: "Component",
                color: Color::rgb(0x9c, 0xcc, 0x65),
            },
            NodeKind::Criterion => NodeDecoration {
                title: "Criterion",
                color: Color::rgb(0x42, 0xa5, 0xf5),
            },
            NodeKind::Effect => NodeDecoration {
                title: "Effect",
                color: Color::rgb(0xff, 0xa7, 0x26),
            },
            NodeKind::RootClaim => NodeDecoration {
                title: "Root Claim",
                color: Color::rgb(0xab, 0x47, 0xbc),
            },
            NodeKind::Support => NodeDecoration {
                title: "Support",
                color: Color::rgb(0x26, 0xc6, 0xda),
            },
            NodeKind::Critique => NodeDecoration {
                title: "Critique",
                color: Color::rgb(0xec, 0x40, 0x7a),
            },
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rendering-kind tag for edges
///
/// A single kind today: every edge renders with scoring visuals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Edge rendered with a score indicator
    #[default]
    #[serde(rename = "ScoreEdge")]
    Score,
}

impl EdgeKind {
    /// Get the string representation of the edge kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Score => "ScoreEdge",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordinal rating attached to a node or edge
///
/// Opaque to mutation logic; ordering and aggregation belong to the
/// rendering/analysis layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Score {
    /// No rating given yet
    #[default]
    Unscored,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
}

impl Score {
    /// Every possible score, unscored first
    pub const ALL: [Score; 11] = [
        Score::Unscored,
        Score::One,
        Score::Two,
        Score::Three,
        Score::Four,
        Score::Five,
        Score::Six,
        Score::Seven,
        Score::Eight,
        Score::Nine,
        Score::Ten,
    ];

    /// Get the string representation of the score
    pub fn as_str(&self) -> &'static str {
        match self {
            Score::Unscored => "-",
            Score::One => "1",
            Score::Two => "2",
            Score::Three => "3",
            Score::Four => "4",
            Score::Five => "5",
            Score::Six => "6",
            Score::Seven => "7",
            Score::Eight => "8",
            Score::Nine => "9",
            Score::Ten => "10",
        }
    }

    /// Parse a score from its string representation
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|score| score.as_str() == s)
    }

    /// Whether a rating has been given
    pub fn is_scored(&self) -> bool {
        !matches!(self, Score::Unscored)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Score {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Score::from_str(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid score: {s}")))
    }
}

/// Direction a diagram flows when laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowDirection {
    /// Parents above children
    #[serde(rename = "TB")]
    TopToBottom,
    /// Parents left of children
    #[serde(rename = "LR")]
    LeftToRight,
}

impl FlowDirection {
    /// Get the string representation of the direction
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowDirection::TopToBottom => "TB",
            FlowDirection::LeftToRight => "LR",
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction in which a newly added node attaches to an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRelation {
    /// New node becomes a parent of the existing node
    Parent,
    /// New node becomes a child of the existing node
    Child,
}

/// Represents the position of a node in 2D space
///
/// Owned exclusively by the layout engine; the store treats positions as
/// opaque output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Represents a color value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex form for the rendering boundary
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Presentation metadata for a node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeDecoration {
    /// Display title of the kind
    pub title: &'static str,
    /// Fill color used by the rendering boundary
    pub color: Color,
}
