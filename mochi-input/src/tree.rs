//! Syntax tree built from registered sequences
//!
//! Each [`Node`] holds an insertion-ordered list of edges. An edge pairs a
//! matcher [`Key`] with a [`Target`]: a nested node for sequences that go on,
//! an action for sequences that end here, or the continuation marker.

use crate::action::{Action, Terminal};
use crate::config::OverlapPolicy;
use crate::error::GrammarError;
use crate::param::{Element, Key};

/// Where an edge leads once its key matches
#[derive(Debug, Clone)]
pub enum Target {
    /// The sequence continues below this node
    Nested(Node),
    /// The sequence is complete
    Action(Action),
    /// The current parameter keeps growing; stay at this node
    Continue,
}

impl From<Terminal> for Target {
    fn from(terminal: Terminal) -> Self {
        match terminal {
            Terminal::Action(action) => Target::Action(action),
            Terminal::Continue => Target::Continue,
        }
    }
}

/// A keyed transition out of a node
#[derive(Debug, Clone)]
pub struct Edge {
    key: Key,
    label: String,
    target: Target,
}

impl Edge {
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Display form of the key: the literal itself or `<Label>`
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn target(&self) -> &Target {
        &self.target
    }
}

/// One node of the syntax tree
#[derive(Debug, Clone, Default)]
pub struct Node {
    edges: Vec<Edge>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// First edge, in insertion order, whose key accepts `c`
    #[inline]
    pub fn step(&self, c: char) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.key.matches(c))
    }

    fn find(&self, key: &Key) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.key == *key)
    }

    fn find_mut(&mut self, key: &Key) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|edge| edge.key == *key)
    }

    /// Insert `sequence` ending in `target` below this node.
    ///
    /// The whole sequence is validated before anything is mutated, so a
    /// rejected registration leaves the tree untouched.
    pub(crate) fn insert(
        &mut self,
        sequence: &[Element],
        target: Target,
        policy: OverlapPolicy,
    ) -> Result<(), GrammarError> {
        self.check(sequence, policy)?;

        let Some((last, prefix)) = sequence.split_last() else {
            return Err(GrammarError::EmptySequence);
        };

        let mut node = self;
        for element in prefix {
            node = node.descend_or_create(element);
        }

        let key = last.key();
        match node.find_mut(&key) {
            // The latest registration names the key as well
            Some(edge) => {
                edge.label = last.to_string();
                edge.target = target;
            }
            None => node.edges.push(Edge {
                key,
                label: last.to_string(),
                target,
            }),
        }
        Ok(())
    }

    fn descend_or_create(&mut self, element: &Element) -> &mut Node {
        let key = element.key();
        let index = match self.edges.iter().position(|edge| edge.key == key) {
            Some(index) => index,
            None => {
                self.edges.push(Edge {
                    key,
                    label: element.to_string(),
                    target: Target::Nested(Node::new()),
                });
                self.edges.len() - 1
            }
        };
        match &mut self.edges[index].target {
            Target::Nested(child) => child,
            // check() rejects sequences that would extend past a terminal
            _ => unreachable!("descending through a terminal edge"),
        }
    }

    fn check(&self, sequence: &[Element], policy: OverlapPolicy) -> Result<(), GrammarError> {
        if sequence.is_empty() {
            return Err(GrammarError::EmptySequence);
        }

        let mut path = String::new();
        let mut node = Some(self);
        for (ix, element) in sequence.iter().enumerate() {
            // Below a freshly created node there is nothing to conflict with
            let Some(current) = node else { break };
            let last = ix == sequence.len() - 1;
            let key = element.key();
            let prefix_len = path.len();
            path.push_str(&element.to_string());

            match current.find(&key) {
                Some(edge) => match (&edge.target, last) {
                    (Target::Nested(child), false) => node = Some(child),
                    (Target::Nested(_), true) => {
                        return Err(GrammarError::ShadowsNested { path });
                    }
                    (Target::Action(_) | Target::Continue, false) => {
                        return Err(GrammarError::ExtendsTerminal { path });
                    }
                    // Last registration for an exact terminal key wins
                    (Target::Action(_) | Target::Continue, true) => {}
                },
                None => {
                    if let Some(existing) = current.edges.iter().find(|e| e.key.overlaps(&key)) {
                        match policy {
                            OverlapPolicy::Reject => {
                                return Err(GrammarError::OverlappingKeys {
                                    path: path[..prefix_len].to_string(),
                                    existing: existing.label.clone(),
                                    incoming: element.to_string(),
                                });
                            }
                            OverlapPolicy::FirstMatchWins => {
                                log::warn!(
                                    "Key {} overlaps {} at <{}>; {} wins",
                                    element,
                                    existing.label,
                                    &path[..prefix_len],
                                    existing.label
                                );
                            }
                        }
                    }
                    node = None;
                }
            }
        }
        Ok(())
    }
}
