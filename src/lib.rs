//! KGraph
//!
//! A small, schema-flexible knowledge graph: labeled nodes with free-form
//! property bags, connected by directed edges that carry a predicate.
//!
//! # Layout
//!
//! - [`graph`]: the in-memory store, its query surface and a readers-writer
//!   wrapper for multi-threaded callers
//! - [`render`]: Graphviz DOT output and image rendering through `dot`
//! - [`shell`]: an interactive championship console built on the store
//! - [`config`]: YAML-loadable render and shell settings
//!
//! ## Example Usage
//!
//! ```rust
//! use kgraph::graph::{EdgeFilter, GraphStore, Label, PropertyValue};
//! use kgraph::props;
//!
//! let mut store = GraphStore::new();
//!
//! let alpha = store.create_node("Team", props! { "name" => "Alpha" });
//! let beta = store.create_node("Team", props! { "name" => "Beta" });
//! assert_eq!(alpha.to_string(), "N1");
//!
//! store.create_edge(alpha, "RIVAL", beta).unwrap();
//!
//! let found = store.query_by_property(&Label::new("Team"), "name", &PropertyValue::from("Beta"));
//! assert_eq!(found[0].0, beta);
//!
//! // Deleting a node removes every edge touching it
//! store.delete_node(alpha).unwrap();
//! assert!(store.find_edges(&EdgeFilter::incoming(beta)).is_empty());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod render;
pub mod shell;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigError, RenderConfig, ShellConfig};
pub use graph::{
    Direction, Edge, EdgeFilter, GraphError, GraphResult, GraphStore, GraphSummary, Label, Node,
    NodeId, Predicate, PropertyMap, PropertyValue, SharedGraphStore,
};
pub use render::{GraphRenderer, RenderError, RenderResult};
pub use shell::{Shell, ShellError, ShellResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
