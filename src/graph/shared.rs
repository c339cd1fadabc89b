//! Thread-safe handle around a [`GraphStore`]
//!
//! Mutations take the write lock; reads take the read lock and hand back
//! owned data so no guard escapes. The node-id counter and both collections
//! change together under one write guard, so a cascading delete can never
//! interleave with another mutation.

use super::filter::EdgeFilter;
use super::property::{PropertyMap, PropertyValue};
use super::store::{GraphResult, GraphSnapshot, GraphStore, GraphSummary, NodeDetail};
use super::types::{Label, NodeId, Predicate};
use super::{Edge, Node};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable, readers-writer protected graph store
#[derive(Debug, Clone, Default)]
pub struct SharedGraphStore {
    inner: Arc<RwLock<GraphStore>>,
}

impl SharedGraphStore {
    pub fn new() -> Self {
        Self::from_store(GraphStore::new())
    }

    pub fn from_store(store: GraphStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // Every operation leaves the store consistent before it can panic, so a
    // poisoned lock still guards valid data.
    fn read(&self) -> RwLockReadGuard<'_, GraphStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, GraphStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create_node(&self, label: impl Into<Label>, properties: PropertyMap) -> NodeId {
        self.write().create_node(label, properties)
    }

    pub fn create_edge(
        &self,
        subject: NodeId,
        predicate: impl Into<Predicate>,
        object: NodeId,
    ) -> GraphResult<()> {
        self.write().create_edge(subject, predicate, object)
    }

    pub fn delete_node(&self, id: NodeId) -> GraphResult<Node> {
        self.write().delete_node(id)
    }

    pub fn query_by_property(
        &self,
        label: &Label,
        key: &str,
        value: &PropertyValue,
    ) -> Vec<(NodeId, Node)> {
        self.read()
            .query_by_property(label, key, value)
            .into_iter()
            .map(|(id, node)| (id, node.clone()))
            .collect()
    }

    pub fn find_edges(&self, filter: &EdgeFilter) -> Vec<Edge> {
        self.read().find_edges(filter).into_iter().cloned().collect()
    }

    pub fn node_detail(&self, id: NodeId) -> GraphResult<NodeDetail> {
        self.read().node_detail(id)
    }

    pub fn summarize(&self) -> GraphSummary {
        self.read().summarize()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.read().snapshot()
    }

    /// Run a closure against the store under the read lock
    pub fn with_read<R>(&self, f: impl FnOnce(&GraphStore) -> R) -> R {
        f(&*self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props;
    use std::thread;

    #[test]
    fn test_shared_operations() {
        let shared = SharedGraphStore::new();
        let a = shared.create_node("Team", props! { "name" => "Alpha" });
        let b = shared.create_node("Team", props! { "name" => "Beta" });
        shared.create_edge(a, "RIVAL", b).unwrap();

        assert_eq!(shared.find_edges(&EdgeFilter::outgoing(a)).len(), 1);
        shared.delete_node(b).unwrap();
        assert!(shared.find_edges(&EdgeFilter::any()).is_empty());
        assert_eq!(shared.summarize().node_count, 1);
        assert_eq!(shared.with_read(|s| s.node_count()), 1);
    }

    #[test]
    fn test_concurrent_creates_yield_unique_ids() {
        let shared = SharedGraphStore::new();
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = shared.clone();
                thread::spawn(move || {
                    (0..50)
                        .map(|i| store.create_node("Player", props! { "n" => (t * 100 + i) as i64 }))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<NodeId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 400);
        assert_eq!(shared.summarize().node_count, 400);
    }

    #[test]
    fn test_concurrent_delete_keeps_integrity() {
        let shared = SharedGraphStore::new();
        let hub = shared.create_node("Team", PropertyMap::new());
        let spokes: Vec<NodeId> = (0..20)
            .map(|_| shared.create_node("Player", PropertyMap::new()))
            .collect();

        let writer = {
            let store = shared.clone();
            let spokes = spokes.clone();
            thread::spawn(move || {
                for s in spokes {
                    let _ = store.create_edge(s, "PLAYS_FOR", hub);
                }
            })
        };
        let deleter = {
            let store = shared.clone();
            thread::spawn(move || store.delete_node(hub))
        };
        writer.join().unwrap();
        deleter.join().unwrap().unwrap();

        assert!(shared
            .find_edges(&EdgeFilter::any())
            .iter()
            .all(|e| !e.touches(hub)));
    }
}
