//! Graphviz DOT generation
//!
//! Colour and layout policy comes entirely from [`RenderConfig`]; the store
//! only supplies nodes and edges.

use crate::config::RenderConfig;
use crate::graph::{Edge, GraphStore, Node};
use std::fmt::Write;

/// Quote and escape a string for use as a DOT id or attribute value
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Text shown inside a node box
pub fn node_text(node: &Node, config: &RenderConfig) -> String {
    let mut text = format!("<{}>\n--- ID: {} ---\n", node.label, node.id);
    for (key, value) in &node.properties {
        let rendered = value.to_string();
        let hidden = config.hidden_when_long.iter().any(|k| k == key)
            && rendered.chars().count() >= config.long_value_threshold;
        if !hidden {
            let _ = writeln!(text, "{}: {}", key, rendered);
        }
    }
    text
}

fn node_line(node: &Node, config: &RenderConfig) -> String {
    format!(
        "    {} [label={}, fillcolor={}, fontcolor={}];\n",
        quote(&node.id.to_string()),
        quote(&node_text(node, config)),
        quote(config.color_for(node.label.as_str())),
        quote(&config.node_font_color),
    )
}

fn edge_line(edge: &Edge, config: &RenderConfig) -> String {
    format!(
        "    {} -> {} [label={}, fontcolor={}, color={}];\n",
        quote(&edge.subject.to_string()),
        quote(&edge.object.to_string()),
        quote(edge.predicate.as_str()),
        quote(&config.edge_font_color),
        quote(&config.edge_color),
    )
}

/// Render the whole graph as a DOT `digraph`
pub fn to_dot(store: &GraphStore, config: &RenderConfig) -> String {
    let mut dot = String::from("// Knowledge Graph\ndigraph {\n");
    let _ = writeln!(
        dot,
        "    graph [rankdir={}, splines=true, overlap=false];",
        quote(&config.rankdir)
    );
    dot.push_str("    node [shape=box, style=filled, fontname=\"Arial\"];\n");

    for node in store.nodes() {
        dot.push_str(&node_line(node, config));
    }
    for edge in store.edges() {
        dot.push_str(&edge_line(edge, config));
    }

    dot.push_str("}\n");
    dot
}
