//! DFA minimization via partition refinement.

use crate::automaton::dfa::Rdfa;
use crate::automaton::state::{StateId, StateIdAllocator, StateTag};
use crate::error::ConstructError;
use indexmap::IndexMap;
use log::trace;
use std::collections::HashMap;

/// Per-state discriminator within one refinement pass: for every alphabet
/// symbol, the starting partition's block index reached on that symbol, or
/// `None` when the state has no transition on it.
type Signature = Vec<Option<usize>>;

/// Minimize a DFA by refining the accepting/non-accepting partition until
/// every block holds only Myhill-Nerode-equivalent states.
///
/// Unreachable states are pruned up front. Signatures are always computed
/// against the block ids of the pass's starting partition, so each pass only
/// ever splits blocks and the loop reaches a fixpoint within |states|
/// passes. The result reuses no state of the input: each block gets a fresh
/// representative state, numbered with the start block first.
pub fn minimize(dfa: &Rdfa) -> Result<Rdfa, ConstructError> {
    if let Some((state, symbol)) = dfa.find_nondeterminism() {
        return Err(ConstructError::Nondeterministic { state, symbol });
    }

    let reachable = dfa.reachable_states();
    let alphabet = dfa.alphabet();

    let mut accepting: Vec<StateId> = Vec::new();
    let mut non_accepting: Vec<StateId> = Vec::new();
    for state in reachable.iter() {
        if dfa.is_accepting(state) {
            accepting.push(state);
        } else {
            non_accepting.push(state);
        }
    }
    let mut blocks: Vec<Vec<StateId>> = [accepting, non_accepting]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect();

    loop {
        let block_of = block_index(&blocks);
        let mut next: Vec<Vec<StateId>> = Vec::with_capacity(blocks.len());
        let mut changed = false;

        for block in &blocks {
            // A singleton can never split.
            if block.len() == 1 {
                next.push(block.clone());
                continue;
            }

            let mut split: IndexMap<Signature, Vec<StateId>> = IndexMap::new();
            for &state in block {
                let signature: Signature = alphabet
                    .iter()
                    .map(|&symbol| dfa.transition(state, symbol).map(|t| block_of[&t]))
                    .collect();
                split.entry(signature).or_default().push(state);
            }

            if split.len() > 1 {
                trace!("minimize: block {block:?} split into {} parts", split.len());
                changed = true;
            }
            next.extend(split.into_values());
        }

        blocks = next;
        if !changed {
            break;
        }
    }

    // Lowest id in each block is its representative.
    for block in &mut blocks {
        block.sort_unstable();
    }
    let block_of = block_index(&blocks);
    let start_block = block_of[&dfa.start()];

    let mut ids = StateIdAllocator::new();
    let mut minimized = Rdfa::new(ids.fresh(StateTag::Start));
    let mut new_state_of: Vec<StateId> = vec![0; blocks.len()];
    new_state_of[start_block] = minimized.start();
    if dfa.is_accepting(blocks[start_block][0]) {
        minimized.mark_accepting(minimized.start());
    }

    for (idx, block) in blocks.iter().enumerate() {
        if idx == start_block {
            continue;
        }
        let block_accepting = dfa.is_accepting(block[0]);
        let state = ids.fresh(if block_accepting {
            StateTag::Accept
        } else {
            StateTag::Middle
        });
        minimized.add_state(state);
        if block_accepting {
            minimized.mark_accepting(state.id());
        }
        new_state_of[idx] = state.id();
    }

    for (idx, block) in blocks.iter().enumerate() {
        let representative = block[0];
        for &symbol in &alphabet {
            if let Some(target) = dfa.transition(representative, symbol) {
                minimized.add_transition(new_state_of[idx], symbol, new_state_of[block_of[&target]]);
            }
        }
    }

    if !dfa.state_mapping().is_empty() {
        let mut mapping: IndexMap<StateId, Vec<StateId>> = IndexMap::new();
        for (idx, block) in blocks.iter().enumerate() {
            let mut nfa_states: Vec<StateId> = Vec::new();
            for member in block {
                if let Some(states) = dfa.state_mapping().get(member) {
                    nfa_states.extend(states);
                }
            }
            nfa_states.sort_unstable();
            nfa_states.dedup();
            mapping.insert(new_state_of[idx], nfa_states);
        }
        mapping.sort_keys();
        minimized.set_state_mapping(mapping);
    }

    Ok(minimized)
}

fn block_index(blocks: &[Vec<StateId>]) -> HashMap<StateId, usize> {
    let mut block_of = HashMap::new();
    for (idx, block) in blocks.iter().enumerate() {
        for &state in block {
            block_of.insert(state, idx);
        }
    }
    block_of
}
