//! Edge implementation for the knowledge graph
//!
//! Edges are directed (subject -> object) and carry a predicate. There is no
//! uniqueness constraint: identical triples may coexist, and self-loops are
//! allowed.

use super::types::{NodeId, Predicate};
use serde::{Deserialize, Serialize};

/// A directed, labeled relationship between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Node the edge goes FROM
    pub subject: NodeId,

    /// Relationship type (e.g., "PLAYS_FOR", "WON")
    pub predicate: Predicate,

    /// Node the edge goes TO
    pub object: NodeId,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(subject: NodeId, predicate: impl Into<Predicate>, object: NodeId) -> Self {
        Edge {
            subject,
            predicate: predicate.into(),
            object,
        }
    }

    /// Check if this edge goes FROM a specific node
    pub fn starts_from(&self, node: NodeId) -> bool {
        self.subject == node
    }

    /// Check if this edge goes TO a specific node
    pub fn ends_at(&self, node: NodeId) -> bool {
        self.object == node
    }

    /// Check if a node appears at either end of this edge
    pub fn touches(&self, node: NodeId) -> bool {
        self.starts_from(node) || self.ends_at(node)
    }

    pub fn is_self_loop(&self) -> bool {
        self.subject == self.object
    }
}
