//! Transition labels.

use std::fmt;

/// An edge label: an alphabet symbol or the distinguished epsilon marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Symbol(char),
    Epsilon,
}

impl Label {
    #[inline]
    pub fn is_epsilon(self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// The alphabet symbol this label carries, if it is not epsilon.
    pub fn symbol(self) -> Option<char> {
        match self {
            Label::Symbol(ch) => Some(ch),
            Label::Epsilon => None,
        }
    }
}

impl From<char> for Label {
    fn from(ch: char) -> Self {
        Label::Symbol(ch)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Symbol(ch) => write!(f, "{ch}"),
            Label::Epsilon => write!(f, "ε"),
        }
    }
}
