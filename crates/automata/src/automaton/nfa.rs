//! Thompson NFA: a graph with one start state and one accepting state.

use crate::automaton::graph::Graph;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::subset::{epsilon_closure, move_on_symbol};
use std::fmt;

/// A nondeterministic finite automaton with epsilon transitions, as produced
/// by Thompson construction.
///
/// Exactly one start and one accepting state: fragments compose only through
/// this pair, so the invariant holds for every well-formed regex tree.
#[derive(Debug, Clone)]
pub struct Tnfa {
    graph: Graph,
    start: StateId,
    accept: StateId,
}

impl Tnfa {
    pub(crate) fn new(graph: Graph, start: StateId, accept: StateId) -> Self {
        debug_assert!(graph.contains_state(start));
        debug_assert!(graph.contains_state(accept));
        Self {
            graph,
            start,
            accept,
        }
    }

    /// Decompose into (graph, start, accept) so a parent fragment can absorb
    /// this one during composition.
    pub(crate) fn into_parts(self) -> (Graph, StateId, StateId) {
        (self.graph, self.start, self.accept)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    pub fn num_states(&self) -> usize {
        self.graph.num_states()
    }

    /// The derived alphabet: every non-epsilon symbol on some edge.
    pub fn alphabet(&self) -> Vec<char> {
        self.graph.alphabet()
    }

    /// Run the NFA over `input` by subset simulation. Debug and test aid;
    /// production matching goes through the DFA.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = epsilon_closure(&self.graph, &StateSet::singleton(self.start));
        for ch in input.chars() {
            current = epsilon_closure(&self.graph, &move_on_symbol(&self.graph, &current, ch));
            if current.is_empty() {
                return false;
            }
        }
        current.contains(self.accept)
    }
}

impl fmt::Display for Tnfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NFA start=s{} accept=s{}", self.start, self.accept)?;
        write!(f, "{}", self.graph)
    }
}
