//! Subset (powerset) construction: ε-NFA → DFA.

use crate::automaton::dfa::Rdfa;
use crate::automaton::graph::Graph;
use crate::automaton::label::Label;
use crate::automaton::nfa::Tnfa;
use crate::automaton::state::{StateId, StateIdAllocator, StateSet, StateTag};
use indexmap::IndexMap;
use log::trace;
use std::collections::VecDeque;

/// All states reachable from `states` via zero or more epsilon edges.
///
/// Stack-driven traversal, each state pushed at most once: O(states + edges)
/// per call.
pub fn epsilon_closure(graph: &Graph, states: &StateSet) -> StateSet {
    let mut closure = StateSet::new();
    let mut stack: Vec<StateId> = states.iter().collect();

    while let Some(state) = stack.pop() {
        if closure.contains(state) {
            continue;
        }
        closure.insert(state);

        if let Some(targets) = graph.targets(state, Label::Epsilon) {
            for target in targets.iter() {
                if !closure.contains(target) {
                    stack.push(target);
                }
            }
        }
    }

    closure
}

/// All states reachable from `states` via exactly one edge labeled `symbol`.
pub fn move_on_symbol(graph: &Graph, states: &StateSet, symbol: char) -> StateSet {
    let mut reached = StateSet::new();
    for state in states.iter() {
        if let Some(targets) = graph.targets(state, Label::Symbol(symbol)) {
            reached.union_with(targets);
        }
    }
    reached
}

/// Convert an ε-NFA to an equivalent DFA.
///
/// Each DFA state stands for a set of NFA states; sets are looked up by
/// their canonical sorted-id key, so a target subset is materialized exactly
/// once and the result is structurally deterministic. The subset behind each
/// DFA state is retained on the result as provenance.
///
/// Terminates because at most 2^|NFA states| distinct subsets exist and only
/// genuinely new subsets are enqueued.
pub fn subset_construction(nfa: &Tnfa) -> Rdfa {
    let graph = nfa.graph();
    let alphabet = nfa.alphabet();
    let mut ids = StateIdAllocator::new();

    // Maps each materialized subset (by canonical key) to its DFA state.
    let mut subsets: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut worklist: VecDeque<(StateSet, StateId)> = VecDeque::new();

    let initial = epsilon_closure(graph, &StateSet::singleton(nfa.start()));
    let start = ids.fresh(StateTag::Start);
    let mut dfa = Rdfa::new(start);
    if initial.contains(nfa.accept()) {
        dfa.mark_accepting(start.id());
    }
    subsets.insert(initial.to_key(), start.id());
    worklist.push_back((initial, start.id()));

    while let Some((current, source)) = worklist.pop_front() {
        for &symbol in &alphabet {
            let next = epsilon_closure(graph, &move_on_symbol(graph, &current, symbol));
            if next.is_empty() {
                continue;
            }

            let key = next.to_key();
            let target = match subsets.get(&key) {
                Some(&existing) => existing,
                None => {
                    let accepting = next.contains(nfa.accept());
                    let state = ids.fresh(if accepting {
                        StateTag::Accept
                    } else {
                        StateTag::Middle
                    });
                    trace!("subset: new DFA state s{} = {key:?}", state.id());
                    dfa.add_state(state);
                    if accepting {
                        dfa.mark_accepting(state.id());
                    }
                    subsets.insert(key, state.id());
                    worklist.push_back((next, state.id()));
                    state.id()
                }
            };

            dfa.add_transition(source, symbol, target);
        }
    }

    let mapping: IndexMap<StateId, Vec<StateId>> = subsets
        .into_iter()
        .map(|(nfa_states, dfa_state)| (dfa_state, nfa_states))
        .collect();
    dfa.set_state_mapping(mapping);

    dfa
}
