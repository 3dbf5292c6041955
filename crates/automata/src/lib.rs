//! Automaton construction backend for a lexer generator.
//!
//! Converts a parsed regular-expression syntax tree into a minimal
//! deterministic finite automaton in three stages:
//!
//! 1. [`ThompsonBuilder`] — regex tree → ε-NFA ([`Tnfa`])
//! 2. [`subset_construction`] — ε-NFA → DFA ([`Rdfa`])
//! 3. [`minimize`] — DFA → minimal DFA
//!
//! The regex parser and the runtime scanner are external collaborators: this
//! crate consumes a typed [`regex::RegexNode`] tree and hands the scanner a
//! read-only DFA exposing its start state, accepting states and transition
//! function.
//!
//! ```
//! use relex_automata::regex::RegexNode;
//! use relex_automata::{ThompsonBuilder, minimize, subset_construction};
//!
//! // c(a|b)*
//! let tree = RegexNode::concat(vec![
//!     RegexNode::literal('c'),
//!     RegexNode::closure(RegexNode::union(vec![
//!         RegexNode::literal('a'),
//!         RegexNode::literal('b'),
//!     ])),
//! ]);
//!
//! let nfa = ThompsonBuilder::new().translate(Some(&tree))?.unwrap();
//! let dfa = minimize(&subset_construction(&nfa))?;
//! assert!(dfa.accepts("caab"));
//! assert!(!dfa.accepts("ac"));
//! # Ok::<(), relex_automata::ConstructError>(())
//! ```

pub mod automaton;
pub mod error;
pub mod regex;

pub use automaton::{
    Graph, Label, Rdfa, State, StateId, StateIdAllocator, StateSet, StateTag, Tnfa,
    ThompsonBuilder, minimize, subset_construction,
};
pub use error::ConstructError;
