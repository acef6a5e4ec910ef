//! Matching session
//!
//! A [`Session`] walks the syntax tree one character at a time. It is
//! streaming like the escape sequence parsers it is meant to sit behind:
//! a sequence may arrive split across any number of `push` calls.
//!
//! State between pushes:
//! - raw input seen since the last reset (diagnostics only)
//! - current tree node
//! - parameters captured so far
//! - whether the last capture is still growing
//!
//! Every completed action and every unmatched character returns the
//! session to the root with all of that state cleared.

use crate::error::{ChunkError, DispatchError};
use crate::tree::{Node, Target};

/// Per-consumer matching state over a borrowed syntax tree
#[derive(Debug, Clone)]
pub struct Session<'g> {
    root: &'g Node,
    node: &'g Node,
    input: String,
    input_len: usize,
    max_input_len: usize,
    truncated: bool,
    captures: Vec<String>,
    continuing: bool,
}

impl<'g> Session<'g> {
    pub(crate) fn new(root: &'g Node, max_input_len: usize) -> Self {
        Session {
            root,
            node: root,
            input: String::new(),
            input_len: 0,
            max_input_len,
            truncated: false,
            captures: Vec::new(),
            continuing: false,
        }
    }

    /// Return to the root, dropping input and captures
    pub fn reset(&mut self) {
        self.node = self.root;
        self.input.clear();
        self.input_len = 0;
        self.truncated = false;
        self.captures.clear();
        self.continuing = false;
    }

    /// Feed a single character.
    ///
    /// Returns `Ok(true)` if the character advanced, extended or completed a
    /// sequence and `Ok(false)` if nothing matched (the session is reset).
    /// A completed sequence whose action has no callback for the number of
    /// captured parameters yields `Err`; the session is reset in that case too.
    pub fn push(&mut self, c: char) -> Result<bool, DispatchError> {
        if self.input_len < self.max_input_len {
            self.input.push(c);
            self.input_len += 1;
        } else {
            self.truncated = true;
        }

        let node = self.node;
        let Some(edge) = node.step(c) else {
            log::trace!("No match for {:?} after <{}>", c, self.input);
            self.reset();
            return Ok(false);
        };

        if edge.key().captures() {
            match self.captures.last_mut() {
                Some(last) if self.continuing => last.push(c),
                _ => self.captures.push(c.to_string()),
            }
        }

        match edge.target() {
            Target::Continue => {
                self.continuing = true;
            }
            Target::Action(action) => {
                let result = action.call(&self.captures).map_err(|err| {
                    let err = err.with_input(&self.input, self.truncated);
                    log::warn!("Dispatch failed: {}", err);
                    err
                });
                self.reset();
                return result.map(|()| true);
            }
            Target::Nested(next) => {
                self.continuing = false;
                self.node = next;
            }
        }
        log::trace!("Matched {:?} via {}", c, edge.label());
        Ok(true)
    }

    /// Feed every character of `text`, returning how many matched.
    ///
    /// The whole chunk is always consumed. Dispatch errors do not stop it;
    /// they are collected with their character offsets and returned together
    /// with the match count once the chunk is done.
    pub fn push_str(&mut self, text: &str) -> Result<usize, ChunkError> {
        let mut matched = 0;
        let mut errors = Vec::new();
        for (offset, c) in text.chars().enumerate() {
            match self.push(c) {
                Ok(true) => matched += 1,
                Ok(false) => {}
                // The failing character completed a sequence, so it matched
                Err(err) => {
                    matched += 1;
                    errors.push((offset, err));
                }
            }
        }
        if errors.is_empty() {
            Ok(matched)
        } else {
            Err(ChunkError { matched, errors })
        }
    }

    /// Raw input since the last reset
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Parameters captured since the last reset, in capture order
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Whether the last capture keeps growing on the next class match
    pub fn is_continuing(&self) -> bool {
        self.continuing
    }

    pub fn at_root(&self) -> bool {
        std::ptr::eq(self.node, self.root)
    }

    /// Whether the session is indistinguishable from a freshly begun one
    pub fn is_idle(&self) -> bool {
        self.at_root() && self.input.is_empty() && self.captures.is_empty() && !self.continuing
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::action::{Action, Terminal};
    use crate::config::MatcherConfig;
    use crate::error::DispatchError;
    use crate::grammar::Grammar;
    use crate::param::Parameter;

    type Calls = Arc<Mutex<Vec<Vec<String>>>>;

    fn recorder(calls: &Calls, arity: usize) -> impl Fn(&[String]) + Send + Sync + 'static {
        let calls = calls.clone();
        move |args: &[String]| {
            assert_eq!(args.len(), arity);
            calls.lock().unwrap().push(args.to_vec());
        }
    }

    fn digits() -> Parameter {
        Parameter::from_chars("Digits", "0123456789").unwrap()
    }

    #[test]
    fn test_literal_sequence() {
        let calls = Calls::default();
        let mut grammar = Grammar::new();
        grammar
            .register(
                &['a'.into(), 'b'.into()],
                Action::new().on(0, recorder(&calls, 0)).unwrap(),
            )
            .unwrap();

        let mut session = grammar.begin();
        assert_eq!(session.push('a'), Ok(true));
        assert!(calls.lock().unwrap().is_empty());
        assert!(!session.at_root());
        assert_eq!(session.input(), "a");

        assert_eq!(session.push('b'), Ok(true));
        assert_eq!(*calls.lock().unwrap(), vec![Vec::<String>::new()]);
        assert!(session.is_idle());
    }

    #[test]
    fn test_single_parameter() {
        let calls = Calls::default();
        let mut grammar = Grammar::new();
        grammar
            .register(&[digits().into()], Action::new().on(1, recorder(&calls, 1)).unwrap())
            .unwrap();

        let mut session = grammar.begin();
        assert_eq!(session.push('5'), Ok(true));
        assert_eq!(*calls.lock().unwrap(), vec![vec!["5".to_string()]]);
    }

    #[test]
    fn test_continuation_accumulates() {
        let calls = Calls::default();
        let mut grammar = Grammar::new();
        grammar.register(&[digits().into()], Terminal::Continue).unwrap();
        grammar
            .register(&['m'.into()], Action::new().on(1, recorder(&calls, 1)).unwrap())
            .unwrap();

        let mut session = grammar.begin();
        assert_eq!(session.push('3'), Ok(true));
        assert!(session.is_continuing());
        assert!(session.at_root());
        assert_eq!(session.push('7'), Ok(true));
        assert_eq!(session.captures(), ["37".to_string()]);

        assert_eq!(session.push('m'), Ok(true));
        assert_eq!(*calls.lock().unwrap(), vec![vec!["37".to_string()]]);
        assert!(session.is_idle());
    }

    #[test]
    fn test_mismatch_resets() {
        let mut grammar = Grammar::new();
        grammar.register(&[digits().into()], Terminal::Continue).unwrap();
        grammar
            .register(&['t'.into(), digits().into(), 'b'.into()], Action::new())
            .unwrap();

        let mut session = grammar.begin();
        session.push_str("12t4").unwrap();
        assert_eq!(session.captures(), ["12".to_string(), "4".to_string()]);

        assert_eq!(session.push('?'), Ok(false));
        assert!(session.is_idle());
    }

    #[test]
    fn test_missing_callback_resets() {
        let mut grammar = Grammar::new();
        grammar.register(&[digits().into()], Terminal::Continue).unwrap();
        grammar
            .register(&['a'.into()], Action::labeled("a").on0(|| {}).unwrap())
            .unwrap();

        let mut session = grammar.begin();
        assert_eq!(session.push('4'), Ok(true));
        let err = session.push('a').unwrap_err();
        assert_eq!(err.arity(), 1);
        assert!(err.to_string().contains("<4a>"));
        assert!(session.is_idle());

        // Session stays usable
        assert_eq!(session.push('a'), Ok(true));
    }

    #[test]
    fn test_push_str_feeds_past_dispatch_error() {
        let calls = Calls::default();
        let mut grammar = Grammar::new();
        grammar.register(&['a'.into()], Action::new()).unwrap();
        grammar
            .register(&['b'.into()], Action::new().on(0, recorder(&calls, 0)).unwrap())
            .unwrap();

        let mut session = grammar.begin();
        let err = session.push_str("bab").unwrap_err();

        // The trailing 'b' still fired after 'a' failed
        assert_eq!(calls.lock().unwrap().len(), 2);
        assert_eq!(err.matched, 3);
        assert_eq!(err.errors.len(), 1);
        let (offset, dispatch) = &err.errors[0];
        assert_eq!(*offset, 1);
        assert_eq!(
            *dispatch,
            DispatchError::MissingCallback {
                action: "unnamed".to_string(),
                arity: 0,
                input: "a".to_string(),
            }
        );
        assert!(session.is_idle());
    }

    #[test]
    fn test_push_str_counts_unmatched() {
        let mut grammar = Grammar::new();
        grammar.register(&['a'.into()], Action::new()).unwrap();

        let mut session = grammar.begin();
        let err = session.push_str("x?a").unwrap_err();
        assert_eq!(err.matched, 1);
        assert_eq!(err.errors[0].0, 2);
    }

    #[test]
    fn test_truncated_input_marked_in_error() {
        let mut grammar = Grammar::with_config(MatcherConfig {
            max_input_len: 2,
            ..MatcherConfig::default()
        });
        grammar.register(&[digits().into()], Terminal::Continue).unwrap();
        grammar
            .register(&['m'.into()], Action::labeled("m").on0(|| {}).unwrap())
            .unwrap();

        let mut session = grammar.begin();
        session.push_str("1234").unwrap();
        let err = session.push('m').unwrap_err();
        assert_eq!(
            err,
            DispatchError::MissingCallback {
                action: "m".to_string(),
                arity: 1,
                input: "12...".to_string(),
            }
        );

        // Nothing dropped, nothing marked
        session.push_str("1").unwrap();
        let err = session.push('m').unwrap_err();
        assert!(err.to_string().contains("<1m>"));
    }

    #[test]
    fn test_input_buffer_bounded() {
        let mut grammar = Grammar::with_config(MatcherConfig {
            max_input_len: 3,
            ..MatcherConfig::default()
        });
        grammar.register(&[digits().into()], Terminal::Continue).unwrap();

        let mut session = grammar.begin();
        assert_eq!(session.push_str("123456"), Ok(6));
        assert_eq!(session.input(), "123");
        assert_eq!(session.captures(), ["123456".to_string()]);
    }

    #[test]
    fn test_reset_is_safe() {
        let grammar = Grammar::new();
        let mut session = grammar.begin();
        session.reset();
        assert!(session.is_idle());
        assert_eq!(session.push('x'), Ok(false));
        assert!(session.is_idle());
    }
}
