//! Syntax tree snapshot for testing and debugging
//!
//! Snapshots capture the registered grammar in a serializable format so that
//! grammar definitions can be compared deterministically.

use serde::{Deserialize, Serialize};

use crate::param::Key;
use crate::tree::{Node, Target};

/// A snapshot of one tree node; edges keep insertion order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub edges: Vec<EdgeSnapshot>,
}

/// Snapshot of a single edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    /// The literal character or `<Label>`
    pub key: String,
    /// Characters accepted by a parameter key (empty for literals)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub class: String,
    pub target: TargetSnapshot,
}

/// Snapshot of an edge target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetSnapshot {
    Nested { node: TreeSnapshot },
    Action { label: Option<String>, arities: Vec<usize> },
    Continue,
}

impl TreeSnapshot {
    /// Create a snapshot from a tree node
    pub fn from_node(node: &Node) -> Self {
        let edges = node
            .edges()
            .iter()
            .map(|edge| EdgeSnapshot {
                key: edge.label().to_string(),
                class: match edge.key() {
                    Key::Literal(_) => String::new(),
                    Key::Class(set) => set.iter().collect(),
                },
                target: match edge.target() {
                    Target::Nested(child) => TargetSnapshot::Nested {
                        node: TreeSnapshot::from_node(child),
                    },
                    Target::Action(action) => TargetSnapshot::Action {
                        label: action.label().map(str::to_string),
                        arities: action.arities().collect(),
                    },
                    Target::Continue => TargetSnapshot::Continue,
                },
            })
            .collect();
        TreeSnapshot { edges }
    }

    /// Every complete sequence in the tree, as display strings
    pub fn sequences(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_sequences(String::new(), &mut out);
        out
    }

    fn collect_sequences(&self, prefix: String, out: &mut Vec<String>) {
        for edge in &self.edges {
            let path = format!("{}{}", prefix, edge.key);
            match &edge.target {
                TargetSnapshot::Nested { node } => node.collect_sequences(path, out),
                TargetSnapshot::Action { .. } => out.push(path),
                TargetSnapshot::Continue => out.push(format!("{}...", path)),
            }
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create an indented text representation for debugging
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        self.write_debug(0, &mut s);
        s
    }

    fn write_debug(&self, depth: usize, s: &mut String) {
        for edge in &self.edges {
            s.push_str(&"  ".repeat(depth));
            s.push_str(&edge.key);
            match &edge.target {
                TargetSnapshot::Nested { node } => {
                    s.push('\n');
                    node.write_debug(depth + 1, s);
                }
                TargetSnapshot::Action { label, arities } => {
                    s.push_str(&format!(
                        " => {} {:?}\n",
                        label.as_deref().unwrap_or("action"),
                        arities
                    ));
                }
                TargetSnapshot::Continue => s.push_str(" => continue\n"),
            }
        }
    }
}
