//! Directed labeled multigraph shared by all construction stages.

use crate::automaton::label::Label;
use crate::automaton::state::{State, StateId, StateSet, StateTag};
use indexmap::IndexMap;
use std::fmt;

/// A directed multigraph of automaton states with labeled edges.
///
/// Edges are indexed by source then by label, so the per-state, per-label
/// lookups that dominate epsilon closure, move and signature computation are
/// map hops rather than scans over the whole edge set.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    states: IndexMap<StateId, State>,
    adjacency: IndexMap<StateId, IndexMap<Label, StateSet>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, state: State) {
        self.states.insert(state.id(), state);
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(&id)
    }

    pub fn contains_state(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    /// Rewrite the role tag of an existing state.
    pub fn set_tag(&mut self, id: StateId, tag: StateTag) {
        if let Some(state) = self.states.get_mut(&id) {
            state.set_tag(tag);
        }
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Add an edge from `source` to `target`. Both endpoints must already be
    /// vertices of this graph.
    pub fn add_edge(&mut self, source: StateId, target: StateId, label: Label) {
        debug_assert!(self.states.contains_key(&source));
        debug_assert!(self.states.contains_key(&target));

        self.adjacency
            .entry(source)
            .or_default()
            .entry(label)
            .or_default()
            .insert(target);
    }

    /// All targets reachable from `source` on exactly `label`, if any.
    pub fn targets(&self, source: StateId, label: Label) -> Option<&StateSet> {
        self.adjacency.get(&source)?.get(&label)
    }

    /// All outgoing edges of `source` as (label, target) pairs.
    pub fn edges_from(&self, source: StateId) -> impl Iterator<Item = (Label, StateId)> + '_ {
        self.adjacency
            .get(&source)
            .into_iter()
            .flat_map(|by_label| {
                by_label
                    .iter()
                    .flat_map(|(&label, targets)| targets.iter().map(move |t| (label, t)))
            })
    }

    /// Every edge of the graph as (source, label, target) triples.
    pub fn edges(&self) -> impl Iterator<Item = (StateId, Label, StateId)> + '_ {
        self.adjacency.iter().flat_map(|(&source, by_label)| {
            by_label
                .iter()
                .flat_map(move |(&label, targets)| targets.iter().map(move |t| (source, label, t)))
        })
    }

    pub fn num_edges(&self) -> usize {
        self.adjacency
            .values()
            .flat_map(|by_label| by_label.values())
            .map(StateSet::len)
            .sum()
    }

    /// The derived alphabet: every non-epsilon symbol on some edge, sorted.
    pub fn alphabet(&self) -> Vec<char> {
        let mut symbols: Vec<char> = Vec::new();
        for by_label in self.adjacency.values() {
            for label in by_label.keys() {
                if let Some(ch) = label.symbol() {
                    if !symbols.contains(&ch) {
                        symbols.push(ch);
                    }
                }
            }
        }
        symbols.sort_unstable();
        symbols
    }

    /// Absorb all states and edges of `other`. Used to compose automaton
    /// fragments during Thompson construction; ids never collide because all
    /// fragments of one run draw from the same allocator.
    pub fn merge(&mut self, other: Graph) {
        for (id, state) in other.states {
            self.states.entry(id).or_insert(state);
        }
        for (source, by_label) in other.adjacency {
            let slot = self.adjacency.entry(source).or_default();
            for (label, targets) in by_label {
                slot.entry(label).or_default().union_with(&targets);
            }
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut states: Vec<&State> = self.states.values().collect();
        states.sort_by_key(|s| s.id());
        for state in states {
            write!(f, "{state}:")?;
            let mut edges: Vec<(Label, StateId)> = self.edges_from(state.id()).collect();
            edges.sort();
            for (label, target) in edges {
                write!(f, "\t--{label}--> s{target}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::state::StateIdAllocator;

    fn three_states(ids: &mut StateIdAllocator) -> (Graph, State, State, State) {
        let s0 = ids.fresh(StateTag::Start);
        let s1 = ids.fresh(StateTag::Middle);
        let s2 = ids.fresh(StateTag::Accept);
        let mut g = Graph::new();
        g.add_state(s0);
        g.add_state(s1);
        g.add_state(s2);
        (g, s0, s1, s2)
    }

    #[test]
    fn indexed_lookup_by_source_and_label() {
        let mut ids = StateIdAllocator::new();
        let (mut g, s0, s1, s2) = three_states(&mut ids);

        g.add_edge(s0.id(), s1.id(), Label::Symbol('a'));
        g.add_edge(s0.id(), s2.id(), Label::Symbol('a'));
        g.add_edge(s0.id(), s2.id(), Label::Epsilon);

        let on_a = g.targets(s0.id(), Label::Symbol('a')).unwrap();
        assert_eq!(on_a.len(), 2);
        assert!(on_a.contains(s1.id()));
        assert!(on_a.contains(s2.id()));

        let on_eps = g.targets(s0.id(), Label::Epsilon).unwrap();
        assert_eq!(on_eps.to_key(), vec![s2.id()]);

        assert!(g.targets(s1.id(), Label::Symbol('a')).is_none());
        assert_eq!(g.edges_from(s0.id()).count(), 3);
        assert_eq!(g.num_edges(), 3);
    }

    #[test]
    fn parallel_edges_with_distinct_labels() {
        let mut ids = StateIdAllocator::new();
        let (mut g, s0, s1, _) = three_states(&mut ids);

        g.add_edge(s0.id(), s1.id(), Label::Symbol('a'));
        g.add_edge(s0.id(), s1.id(), Label::Symbol('b'));
        g.add_edge(s0.id(), s1.id(), Label::Epsilon);

        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.alphabet(), vec!['a', 'b']);
    }

    #[test]
    fn merge_unions_states_and_edges() {
        let mut ids = StateIdAllocator::new();
        let (mut g1, s0, s1, _) = three_states(&mut ids);
        g1.add_edge(s0.id(), s1.id(), Label::Symbol('x'));

        let s3 = ids.fresh(StateTag::Start);
        let s4 = ids.fresh(StateTag::Accept);
        let mut g2 = Graph::new();
        g2.add_state(s3);
        g2.add_state(s4);
        g2.add_edge(s3.id(), s4.id(), Label::Symbol('y'));

        g1.merge(g2);
        assert_eq!(g1.num_states(), 5);
        assert_eq!(g1.num_edges(), 2);
        assert_eq!(g1.alphabet(), vec!['x', 'y']);
    }

    #[test]
    fn retagging_preserves_identity() {
        let mut ids = StateIdAllocator::new();
        let (mut g, s0, ..) = three_states(&mut ids);
        g.set_tag(s0.id(), StateTag::Middle);
        assert_eq!(g.state(s0.id()).unwrap().tag(), StateTag::Middle);
        assert_eq!(g.state(s0.id()).unwrap().id(), s0.id());
    }
}
