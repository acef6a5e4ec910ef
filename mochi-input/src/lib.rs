//! Mochi Input Matcher
//!
//! This crate matches a character stream against declaratively registered
//! sequences, in the style of terminal control sequences (`a`, `t<X>b`,
//! `T<X>...;b`). Sequences mix literal characters with [`Parameter`]s,
//! character classes whose matched text is captured.
//!
//! The matcher is:
//! - Streaming: one character per `push`, arbitrary chunk boundaries
//! - Declarative: rules are registered into a shared prefix tree up front
//! - Arity-dispatched: an [`Action`] picks its callback by how many
//!   parameters the completed sequence captured
//!
//! A [`Grammar`] owns the tree; [`Grammar::begin`] creates independent
//! [`Session`]s that borrow it read-only, so a grammar cannot be modified
//! while any session is matching against it.

pub mod action;
pub mod config;
pub mod error;
pub mod grammar;
pub mod param;
pub mod session;
pub mod snapshot;
pub mod tree;

pub use action::{Action, Callback, Terminal};
pub use config::{ConfigError, MatcherConfig, OverlapPolicy};
pub use error::{ChunkError, DispatchError, GrammarError};
pub use grammar::Grammar;
pub use param::{Element, Key, Parameter};
pub use session::Session;
pub use snapshot::TreeSnapshot;
pub use tree::{Edge, Node, Target};
