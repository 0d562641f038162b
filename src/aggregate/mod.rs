//! Diagram aggregates and identifiers

pub mod diagram;
pub mod ids;

pub use diagram::*;
pub use ids::*;
