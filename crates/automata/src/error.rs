//! Errors surfaced by the construction pipeline.

use crate::automaton::state::StateId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    /// A regex tree node had the wrong number of children for its kind.
    /// Malformed trees are a caller contract violation; construction stops
    /// rather than producing a wrong automaton.
    #[error("{kind} node requires at least {expected} children, found {found}")]
    Arity {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    /// The minimizer was handed a DFA carrying more than one transition on
    /// the same symbol out of one state.
    #[error("nondeterministic input: state s{state} has duplicate transitions on '{symbol}'")]
    Nondeterministic { state: StateId, symbol: char },
}
