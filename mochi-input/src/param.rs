//! Parameters and matcher keys
//!
//! A [`Parameter`] is a caller-defined character class. Used inside a
//! registered sequence it both matches one incoming character and captures
//! it. Literal characters only match.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::GrammarError;

/// A labelled, non-empty character class
///
/// Two parameters are interchangeable in the syntax tree when their
/// character sets are equal; the label is only used for diagnostics.
#[derive(Debug, Clone)]
pub struct Parameter {
    label: String,
    chars: BTreeSet<char>,
}

impl Parameter {
    /// Create a parameter accepting every character in `chars`
    pub fn new(
        label: impl Into<String>,
        chars: impl IntoIterator<Item = char>,
    ) -> Result<Self, GrammarError> {
        let label = label.into();
        let chars: BTreeSet<char> = chars.into_iter().collect();
        if chars.is_empty() {
            return Err(GrammarError::EmptyParameter { label });
        }
        Ok(Parameter { label, chars })
    }

    /// Create a parameter accepting each character of `chars`
    pub fn from_chars(label: impl Into<String>, chars: &str) -> Result<Self, GrammarError> {
        Self::new(label, chars.chars())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn chars(&self) -> &BTreeSet<char> {
        &self.chars
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.chars == other.chars
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chars.hash(state);
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.label)
    }
}

/// One element of a registered sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Match exactly this character
    Literal(char),
    /// Match and capture any character of the class
    Param(Parameter),
}

impl Element {
    pub(crate) fn key(&self) -> Key {
        match self {
            Element::Literal(c) => Key::Literal(*c),
            Element::Param(p) => Key::Class(p.chars.clone()),
        }
    }
}

impl From<char> for Element {
    fn from(c: char) -> Self {
        Element::Literal(c)
    }
}

impl From<Parameter> for Element {
    fn from(p: Parameter) -> Self {
        Element::Param(p)
    }
}

impl From<&Parameter> for Element {
    fn from(p: &Parameter) -> Self {
        Element::Param(p.clone())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Literal(c) => write!(f, "{}", c),
            Element::Param(p) => write!(f, "{}", p),
        }
    }
}

/// Test applied to a single incoming character at one tree node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Literal(char),
    Class(BTreeSet<char>),
}

impl Key {
    /// Whether `c` passes this key
    #[inline]
    pub fn matches(&self, c: char) -> bool {
        match self {
            Key::Literal(l) => *l == c,
            Key::Class(set) => set.contains(&c),
        }
    }

    /// Whether this key captures the character it matches
    pub fn captures(&self) -> bool {
        matches!(self, Key::Class(_))
    }

    /// Whether some character passes both keys
    pub fn overlaps(&self, other: &Key) -> bool {
        match (self, other) {
            (Key::Literal(a), Key::Literal(b)) => a == b,
            (Key::Literal(c), Key::Class(set)) | (Key::Class(set), Key::Literal(c)) => {
                set.contains(c)
            }
            (Key::Class(a), Key::Class(b)) => !a.is_disjoint(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> Parameter {
        Parameter::from_chars("Digits", "0123456789").unwrap()
    }

    #[test]
    fn test_parameter_equality_ignores_label() {
        let a = digits();
        let b = Parameter::from_chars("Numbers", "9876543210").unwrap();
        assert_eq!(a, b);
        assert_eq!(Element::from(&a).key(), Element::from(b).key());
    }

    #[test]
    fn test_parameter_empty_rejected() {
        let err = Parameter::from_chars("Nothing", "").unwrap_err();
        assert_eq!(
            err,
            GrammarError::EmptyParameter {
                label: "Nothing".to_string()
            }
        );
    }

    #[test]
    fn test_parameter_display() {
        assert_eq!(digits().to_string(), "<Digits>");
        assert_eq!(Element::from('t').to_string(), "t");
    }

    #[test]
    fn test_key_matches() {
        let lit = Key::Literal('a');
        assert!(lit.matches('a'));
        assert!(!lit.matches('b'));
        assert!(!lit.captures());

        let class = Element::from(digits()).key();
        assert!(class.matches('7'));
        assert!(!class.matches('x'));
        assert!(class.captures());
    }

    #[test]
    fn test_key_overlaps() {
        let class = Element::from(digits()).key();
        let hex = Element::from(Parameter::from_chars("Hex", "0123456789abcdef").unwrap()).key();
        let letters = Element::from(Parameter::from_chars("Letters", "xyz").unwrap()).key();

        assert!(Key::Literal('5').overlaps(&class));
        assert!(class.overlaps(&Key::Literal('5')));
        assert!(!Key::Literal('a').overlaps(&class));
        assert!(class.overlaps(&hex));
        assert!(!class.overlaps(&letters));
        assert!(!Key::Literal('a').overlaps(&Key::Literal('b')));
    }
}
