//! Edge filters for relationship lookups
//!
//! A filter with no fields set matches every edge. Used both for the
//! "outgoing relationships of a node" view and for inverse lookups such as
//! "who points at this node with predicate P".

use super::edge::Edge;
use super::types::{NodeId, Predicate};

/// Optional subject / predicate / object constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeFilter {
    pub subject: Option<NodeId>,
    pub predicate: Option<Predicate>,
    pub object: Option<NodeId>,
}

impl EdgeFilter {
    /// Filter that matches every edge
    pub fn any() -> Self {
        Self::default()
    }

    /// Edges leaving `node`
    pub fn outgoing(node: NodeId) -> Self {
        Self::any().subject(node)
    }

    /// Edges arriving at `node`
    pub fn incoming(node: NodeId) -> Self {
        Self::any().object(node)
    }

    pub fn subject(mut self, node: NodeId) -> Self {
        self.subject = Some(node);
        self
    }

    pub fn predicate(mut self, predicate: impl Into<Predicate>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn object(mut self, node: NodeId) -> Self {
        self.object = Some(node);
        self
    }

    /// Check an edge against every constraint that is set
    pub fn matches(&self, edge: &Edge) -> bool {
        self.subject.map_or(true, |s| edge.subject == s)
            && self.predicate.as_ref().map_or(true, |p| &edge.predicate == p)
            && self.object.map_or(true, |o| edge.object == o)
    }
}

/// Which end of an edge a neighbor lookup starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow edges where the node is the subject
    Outgoing,
    /// Follow edges where the node is the object
    Incoming,
}

impl Direction {
    /// Filter selecting edges on this side of `node`
    pub fn filter(self, node: NodeId) -> EdgeFilter {
        match self {
            Direction::Outgoing => EdgeFilter::outgoing(node),
            Direction::Incoming => EdgeFilter::incoming(node),
        }
    }

    /// The endpoint at the far side of `edge`
    pub fn far_end(self, edge: &Edge) -> NodeId {
        match self {
            Direction::Outgoing => edge.object,
            Direction::Incoming => edge.subject,
        }
    }
}
