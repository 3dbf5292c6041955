//! Automaton construction pipeline.
//!
//! Three stages over a shared labeled-multigraph state model:
//! - Thompson construction: regex syntax tree → ε-NFA
//! - Subset construction: ε-NFA → DFA, with provenance retained
//! - Partition-refinement minimization: DFA → minimal DFA

pub mod dfa;
pub mod graph;
pub mod label;
pub mod minimize;
pub mod nfa;
pub mod state;
pub mod subset;
pub mod thompson;

pub use dfa::Rdfa;
pub use graph::Graph;
pub use label::Label;
pub use minimize::minimize;
pub use nfa::Tnfa;
pub use state::{State, StateId, StateIdAllocator, StateSet, StateTag};
pub use subset::{epsilon_closure, move_on_symbol, subset_construction};
pub use thompson::ThompsonBuilder;
