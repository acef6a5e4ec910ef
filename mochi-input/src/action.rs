//! Actions bound to completed sequences
//!
//! An [`Action`] holds one callback per arity. When a sequence completes,
//! the session hands the action every parameter it captured and the action
//! picks the callback taking exactly that many arguments.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{DispatchError, GrammarError};

/// A callback receiving the captured parameters in capture order
pub type Callback = Arc<dyn Fn(&[String]) + Send + Sync>;

/// Terminal behavior of a completed sequence, dispatched by arity
#[derive(Clone, Default)]
pub struct Action {
    label: Option<String>,
    callbacks: BTreeMap<usize, Callback>,
}

impl Action {
    /// Create an unlabelled action with no callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an action with a label used in diagnostics
    pub fn labeled(label: impl Into<String>) -> Self {
        Action {
            label: Some(label.into()),
            callbacks: BTreeMap::new(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Bind `callback` to sequences that captured exactly `arity` parameters
    pub fn on<F>(mut self, arity: usize, callback: F) -> Result<Self, GrammarError>
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        if self.callbacks.contains_key(&arity) {
            return Err(GrammarError::DuplicateArity {
                action: self.name().to_string(),
                arity,
            });
        }
        self.callbacks.insert(arity, Arc::new(callback));
        Ok(self)
    }

    pub fn on0<F>(self, callback: F) -> Result<Self, GrammarError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on(0, move |_| callback())
    }

    pub fn on1<F>(self, callback: F) -> Result<Self, GrammarError>
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on(1, move |args| callback(args[0].as_str()))
    }

    pub fn on2<F>(self, callback: F) -> Result<Self, GrammarError>
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.on(2, move |args| callback(args[0].as_str(), args[1].as_str()))
    }

    pub fn on3<F>(self, callback: F) -> Result<Self, GrammarError>
    where
        F: Fn(&str, &str, &str) + Send + Sync + 'static,
    {
        self.on(3, move |args| {
            callback(args[0].as_str(), args[1].as_str(), args[2].as_str())
        })
    }

    /// Arities with a bound callback, ascending
    pub fn arities(&self) -> impl Iterator<Item = usize> + '_ {
        self.callbacks.keys().copied()
    }

    pub fn accepts(&self, arity: usize) -> bool {
        self.callbacks.contains_key(&arity)
    }

    /// Invoke the callback whose arity equals `args.len()`
    pub fn call(&self, args: &[String]) -> Result<(), DispatchError> {
        match self.callbacks.get(&args.len()) {
            Some(callback) => {
                log::debug!("Dispatching <{}> with {:?}", self.name(), args);
                callback(args);
                Ok(())
            }
            None => Err(DispatchError::MissingCallback {
                action: self.name().to_string(),
                arity: args.len(),
                input: String::new(),
            }),
        }
    }

    fn name(&self) -> &str {
        self.label.as_deref().unwrap_or("unnamed")
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("arities", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// What a registered sequence does once its last element matches
#[derive(Debug, Clone)]
pub enum Terminal {
    /// Fire an action and reset the session
    Action(Action),
    /// Keep growing the current parameter and stay at the same tree node
    Continue,
}

impl From<Action> for Terminal {
    fn from(action: Action) -> Self {
        Terminal::Action(action)
    }
}
