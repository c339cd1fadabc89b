//! Core knowledge graph implementation
//!
//! This module implements the graph data model with:
//! - Labeled nodes with free-form scalar property bags
//! - Directed edges carrying a predicate, duplicates allowed
//! - Cascading node deletion and property / relationship lookups
//! - A readers-writer wrapper for multi-threaded callers

pub mod edge;
pub mod filter;
pub mod node;
pub mod property;
pub mod shared;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use filter::{Direction, EdgeFilter};
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use shared::SharedGraphStore;
pub use store::{
    EndpointView, GraphError, GraphResult, GraphSnapshot, GraphStore, GraphSummary, NodeDetail,
};
pub use types::{Label, NodeId, ParseNodeIdError, Predicate};
