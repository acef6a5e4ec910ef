//! Grammar registration
//!
//! A [`Grammar`] owns the syntax tree. Sequences are registered once during
//! setup; [`Grammar::begin`] then hands out independent [`Session`]s that
//! walk the tree read-only.

use crate::action::Terminal;
use crate::config::MatcherConfig;
use crate::error::GrammarError;
use crate::param::Element;
use crate::session::Session;
use crate::snapshot::TreeSnapshot;
use crate::tree::Node;

/// Registry of sequences and the syntax tree built from them
#[derive(Debug, Default)]
pub struct Grammar {
    root: Node,
    config: MatcherConfig,
}

impl Grammar {
    /// Create an empty grammar with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty grammar with the given configuration
    pub fn with_config(config: MatcherConfig) -> Self {
        Grammar {
            root: Node::new(),
            config,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Root of the syntax tree
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Register `sequence`, ending in `terminal`.
    ///
    /// Fails if the sequence would extend past a rule that already ends at
    /// one of its prefixes, if it would end where another rule continues, or
    /// (with [`OverlapPolicy::Reject`](crate::OverlapPolicy::Reject)) if a new
    /// key shares characters with a sibling key.
    pub fn register(
        &mut self,
        sequence: &[Element],
        terminal: impl Into<Terminal>,
    ) -> Result<(), GrammarError> {
        let terminal = terminal.into();
        log::debug!(
            "Registering <{}> -> {}",
            sequence.iter().map(Element::to_string).collect::<String>(),
            match &terminal {
                Terminal::Action(action) => action.label().unwrap_or("action"),
                Terminal::Continue => "continue",
            }
        );
        self.root
            .insert(sequence, terminal.into(), self.config.overlap)
    }

    /// Start a fresh session over this grammar
    pub fn begin(&self) -> Session<'_> {
        Session::new(&self.root, self.config.max_input_len)
    }

    /// Serializable dump of the syntax tree, in insertion order
    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot::from_node(&self.root)
    }
}
