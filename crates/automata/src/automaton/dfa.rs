//! Deterministic automaton produced by subset construction.

use crate::automaton::graph::Graph;
use crate::automaton::label::Label;
use crate::automaton::state::{State, StateId, StateSet};
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::fmt;

/// A deterministic finite automaton: at most one outgoing edge per
/// (state, symbol).
///
/// Alongside the transition structure it carries the powerset-construction
/// provenance, a map from each DFA state to the set of NFA state ids it
/// stands for. The mapping exists for inspection only; no consumer may rely
/// on it for language semantics.
#[derive(Debug, Clone)]
pub struct Rdfa {
    graph: Graph,
    start: StateId,
    accepting: StateSet,
    state_mapping: IndexMap<StateId, Vec<StateId>>,
}

impl Rdfa {
    pub fn new(start: State) -> Self {
        let mut graph = Graph::new();
        let start_id = start.id();
        graph.add_state(start);
        Self {
            graph,
            start: start_id,
            accepting: StateSet::new(),
            state_mapping: IndexMap::new(),
        }
    }

    pub fn add_state(&mut self, state: State) {
        self.graph.add_state(state);
    }

    pub fn mark_accepting(&mut self, state: StateId) {
        debug_assert!(self.graph.contains_state(state));
        self.accepting.insert(state);
    }

    pub fn add_transition(&mut self, source: StateId, symbol: char, target: StateId) {
        self.graph.add_edge(source, target, Label::Symbol(symbol));
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accepting(&self) -> &StateSet {
        &self.accepting
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state)
    }

    pub fn num_states(&self) -> usize {
        self.graph.num_states()
    }

    pub fn alphabet(&self) -> Vec<char> {
        self.graph.alphabet()
    }

    /// The deterministic transition function: the unique successor of
    /// `state` on `symbol`, or `None` when no such edge exists.
    pub fn transition(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.graph
            .targets(state, Label::Symbol(symbol))?
            .iter()
            .next()
    }

    /// Drive the DFA over `input`, rejecting as soon as a symbol has no
    /// transition.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = self.start;
        for ch in input.chars() {
            match self.transition(current, ch) {
                Some(next) => current = next,
                None => return false,
            }
        }
        self.is_accepting(current)
    }

    /// All states reachable from the start state.
    pub fn reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(self.start);

        while let Some(state) = queue.pop_front() {
            if reachable.contains(state) {
                continue;
            }
            reachable.insert(state);

            for (_, target) in self.graph.edges_from(state) {
                if !reachable.contains(target) {
                    queue.push_back(target);
                }
            }
        }

        reachable
    }

    /// The first duplicate (state, symbol) transition pair, if the graph
    /// violates the determinism invariant.
    pub fn find_nondeterminism(&self) -> Option<(StateId, char)> {
        for state in self.graph.states() {
            let mut seen: Vec<char> = Vec::new();
            for (label, _) in self.graph.edges_from(state.id()) {
                let Some(symbol) = label.symbol() else {
                    continue;
                };
                if seen.contains(&symbol) {
                    return Some((state.id(), symbol));
                }
                seen.push(symbol);
            }
        }
        None
    }

    pub(crate) fn set_state_mapping(&mut self, mapping: IndexMap<StateId, Vec<StateId>>) {
        self.state_mapping = mapping;
    }

    /// The DFA-state → NFA-state-set provenance recorded by subset
    /// construction. Empty for automata built by hand.
    pub fn state_mapping(&self) -> &IndexMap<StateId, Vec<StateId>> {
        &self.state_mapping
    }

    /// Human-readable rendering of the provenance mapping.
    pub fn render_state_mapping(&self) -> String {
        let mut out = String::new();
        for (dfa_state, nfa_states) in &self.state_mapping {
            let members = nfa_states
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(&format!("DFA state s{dfa_state}\tNFA state set {{{members}}}\n"));
        }
        out
    }
}

impl fmt::Display for Rdfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "DFA start=s{} accepting={:?}",
            self.start, self.accepting
        )?;
        write!(f, "{}", self.graph)
    }
}
