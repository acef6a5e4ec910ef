//! Error types for grammar construction and action dispatch.

use thiserror::Error;

/// Errors raised while building a grammar.
///
/// These are programming errors in the grammar definition. They are reported
/// at registration (or action construction) time, before any input is matched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Cannot register an empty sequence")]
    EmptySequence,

    #[error("Parameter <{label}> has an empty character set")]
    EmptyParameter { label: String },

    #[error("Already an action taken at <{path}>, cannot be a predicate for another action")]
    ExtendsTerminal { path: String },

    #[error("Sequence <{path}> continues further, cannot terminate it with an action")]
    ShadowsNested { path: String },

    #[error("Key {incoming} overlaps existing key {existing} at <{path}>")]
    OverlappingKeys {
        path: String,
        existing: String,
        incoming: String,
    },

    #[error("Action <{action}> already has a callback that takes {arity} argument(s)")]
    DuplicateArity { action: String, arity: usize },
}

/// Errors raised while dispatching a completed sequence to its action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Missing callback in <{action}> for <{input}> that takes {arity} argument(s)")]
    MissingCallback {
        action: String,
        arity: usize,
        /// Raw input that completed the sequence (empty when called directly)
        input: String,
    },
}

impl DispatchError {
    /// Number of captured arguments that had no matching callback
    pub fn arity(&self) -> usize {
        match self {
            DispatchError::MissingCallback { arity, .. } => *arity,
        }
    }

    /// Attach the raw input; `truncated` marks a capped input buffer with `...`
    pub(crate) fn with_input(self, text: &str, truncated: bool) -> Self {
        let input = if truncated {
            format!("{}...", text)
        } else {
            text.to_string()
        };
        match self {
            DispatchError::MissingCallback { action, arity, .. } => DispatchError::MissingCallback {
                action,
                arity,
                input,
            },
        }
    }
}

/// Dispatch errors collected while feeding a whole chunk.
///
/// The chunk is always fed to the end; `matched` counts every character
/// that matched, including those after the first failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{count} dispatch error(s) in chunk ({matched} character(s) matched)", count = .errors.len())]
pub struct ChunkError {
    pub matched: usize,
    /// Character offset in the chunk of each failing push, with its error
    pub errors: Vec<(usize, DispatchError)>,
}
