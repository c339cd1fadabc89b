//! In-memory graph storage implementation
//!
//! The store owns two collections: an insertion-ordered map of node id to
//! node record, and an ordered sequence of edges. Every operation is a single
//! transition of both collections; it either fully applies or is a no-op.

use super::edge::Edge;
use super::filter::{Direction, EdgeFilter};
use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId, Predicate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Label shown for an edge endpoint that no longer resolves to a node
pub const MISSING_LABEL: &str = "N/A";

/// Name shown for an edge endpoint that no longer resolves to a node
pub const MISSING_NAME: &str = "Removed node";

/// Property consulted when an endpoint is shown by name
pub const NAME_KEY: &str = "name";

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Invalid edge: subject node {0} does not exist")]
    InvalidEdgeSubject(NodeId),

    #[error("Invalid edge: object node {0} does not exist")]
    InvalidEdgeObject(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Aggregate counts over the current graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    /// Number of nodes per label
    pub label_distribution: BTreeMap<Label, usize>,
}

/// An edge endpoint resolved against the node map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointView {
    pub id: NodeId,
    pub label: String,
    pub name: String,
    /// False when the id did not resolve and placeholders were substituted
    pub exists: bool,
}

/// A node with its outgoing relationships resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDetail {
    pub node: Node,
    pub outgoing: Vec<(Predicate, EndpointView)>,
}

/// Owned copy of the whole graph, for external renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// In-memory knowledge graph
///
/// - nodes: NodeId -> Node, in insertion (= ascending id) order
/// - edges: insertion-ordered sequence, duplicates allowed
#[derive(Debug)]
pub struct GraphStore {
    /// Node storage
    nodes: IndexMap<NodeId, Node>,

    /// Edge storage
    edges: Vec<Edge>,

    /// Next node ID; never decremented, so ids are not reused
    next_node_id: u64,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        GraphStore {
            nodes: IndexMap::with_capacity(64),
            edges: Vec::with_capacity(128),
            next_node_id: 1,
        }
    }

    /// Create a node with an auto-generated ID
    pub fn create_node(&mut self, label: impl Into<Label>, properties: PropertyMap) -> NodeId {
        let node_id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;

        let node = Node::new(node_id, label, properties);
        debug!(id = %node_id, label = %node.label, "created node");

        self.nodes.insert(node_id, node);
        node_id
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Create an edge between two live nodes
    ///
    /// Rejected edges leave the store untouched. Duplicate edges and
    /// self-loops are accepted.
    pub fn create_edge(
        &mut self,
        subject: NodeId,
        predicate: impl Into<Predicate>,
        object: NodeId,
    ) -> GraphResult<()> {
        if !self.has_node(subject) {
            warn!(%subject, "rejected edge: unknown subject");
            return Err(GraphError::InvalidEdgeSubject(subject));
        }
        if !self.has_node(object) {
            warn!(%object, "rejected edge: unknown object");
            return Err(GraphError::InvalidEdgeObject(object));
        }

        let edge = Edge::new(subject, predicate, object);
        debug!(%subject, predicate = %edge.predicate, %object, "created edge");
        self.edges.push(edge);
        Ok(())
    }

    /// Delete a node and all its connected edges
    pub fn delete_node(&mut self, id: NodeId) -> GraphResult<Node> {
        // shift_remove keeps the remaining nodes in insertion order
        let node = self.nodes.shift_remove(&id).ok_or(GraphError::NodeNotFound(id))?;

        let before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(id));
        debug!(%id, removed_edges = before - self.edges.len(), "deleted node");

        Ok(node)
    }

    /// Nodes with the given label whose property `key` equals `value`
    ///
    /// Equality is type-exact. Results follow insertion order.
    pub fn query_by_property(
        &self,
        label: &Label,
        key: &str,
        value: &PropertyValue,
    ) -> Vec<(NodeId, &Node)> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.matches(label, key, value))
            .map(|(&id, node)| (id, node))
            .collect()
    }

    /// Edges matching every constraint set on `filter`, in insertion order
    pub fn find_edges(&self, filter: &EdgeFilter) -> Vec<&Edge> {
        self.edges.iter().filter(|edge| filter.matches(edge)).collect()
    }

    /// Endpoints reached from `id` through edges carrying `predicate`
    pub fn neighbors(
        &self,
        id: NodeId,
        predicate: impl Into<Predicate>,
        direction: Direction,
    ) -> Vec<EndpointView> {
        let filter = direction.filter(id).predicate(predicate);
        self.find_edges(&filter)
            .into_iter()
            .map(|edge| self.resolve_endpoint(direction.far_end(edge)))
            .collect()
    }

    /// Resolve an edge endpoint, substituting placeholders if it is gone
    pub fn resolve_endpoint(&self, id: NodeId) -> EndpointView {
        match self.get_node(id) {
            Some(node) => EndpointView {
                id,
                label: node.label.to_string(),
                name: node
                    .get_property(NAME_KEY)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| MISSING_LABEL.to_string()),
                exists: true,
            },
            None => EndpointView {
                id,
                label: MISSING_LABEL.to_string(),
                name: MISSING_NAME.to_string(),
                exists: false,
            },
        }
    }

    /// A node with each outgoing edge resolved to its object
    pub fn node_detail(&self, id: NodeId) -> GraphResult<NodeDetail> {
        let node = self.get_node(id).ok_or(GraphError::NodeNotFound(id))?;
        let outgoing = self
            .find_edges(&EdgeFilter::outgoing(id))
            .into_iter()
            .map(|edge| (edge.predicate.clone(), self.resolve_endpoint(edge.object)))
            .collect();

        Ok(NodeDetail {
            node: node.clone(),
            outgoing,
        })
    }

    /// Total node count, edge count and per-label node counts
    pub fn summarize(&self) -> GraphSummary {
        let mut label_distribution = BTreeMap::new();
        for node in self.nodes.values() {
            *label_distribution.entry(node.label.clone()).or_insert(0) += 1;
        }

        GraphSummary {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            label_distribution,
        }
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Owned copy of all nodes and edges
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.values().cloned().collect(),
            edges: self.edges.clone(),
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
