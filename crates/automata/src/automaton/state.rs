//! State types shared by every construction stage.

use fixedbitset::FixedBitSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A state identifier represented as a u32.
pub type StateId = u32;

/// Role a state played when its automaton was built.
///
/// The tag is construction metadata only: whether an automaton accepts in a
/// state is designated by the automaton itself, never read off the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTag {
    Start,
    Middle,
    Accept,
}

/// An automaton state: a unique id plus its construction-time role tag.
///
/// Identity and equality are by id alone; the tag may be rewritten while a
/// fragment is being composed into a larger automaton.
#[derive(Debug, Clone, Copy)]
pub struct State {
    id: StateId,
    tag: StateTag,
}

impl State {
    pub fn new(id: StateId, tag: StateTag) -> Self {
        Self { id, tag }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn tag(&self) -> StateTag {
        self.tag
    }

    pub fn set_tag(&mut self, tag: StateTag) {
        self.tag = tag;
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.id.hash(hasher);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.tag {
            StateTag::Start => "start",
            StateTag::Middle => "middle",
            StateTag::Accept => "accept",
        };
        write!(f, "s{}({tag})", self.id)
    }
}

/// Monotonically increasing id source.
///
/// One allocator per construction run: ids are unique within a run and the
/// allocator is an explicit value, so independent constructions can proceed
/// concurrently without sharing a counter. `reset` restarts numbering for
/// reproducible ids across runs.
#[derive(Debug, Default)]
pub struct StateIdAllocator {
    next: StateId,
}

impl StateIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh state with the given role tag.
    pub fn fresh(&mut self, tag: StateTag) -> State {
        let id = self.next;
        self.next += 1;
        State::new(id, tag)
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

/// A set of state ids backed by a fixed-size bit set.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::with_capacity(state as usize + 1);
        set.insert(state);
        set
    }

    pub fn insert(&mut self, state: StateId) {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        self.bits.insert(idx);
    }

    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Canonical key for this set: the sorted sequence of member ids.
    ///
    /// Two sets with the same members produce the same key, so the key can
    /// drive associative lookups during subset construction.
    pub fn to_key(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_equality_is_by_id() {
        let a = State::new(3, StateTag::Start);
        let b = State::new(3, StateTag::Accept);
        let c = State::new(4, StateTag::Start);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn allocator_is_monotonic_and_resettable() {
        let mut ids = StateIdAllocator::new();
        assert_eq!(ids.fresh(StateTag::Start).id(), 0);
        assert_eq!(ids.fresh(StateTag::Middle).id(), 1);
        assert_eq!(ids.fresh(StateTag::Accept).id(), 2);

        ids.reset();
        assert_eq!(ids.fresh(StateTag::Start).id(), 0);
    }

    #[test]
    fn independent_allocators_do_not_interfere() {
        let mut a = StateIdAllocator::new();
        let mut b = StateIdAllocator::new();
        a.fresh(StateTag::Start);
        a.fresh(StateTag::Middle);
        assert_eq!(b.fresh(StateTag::Start).id(), 0);
    }

    #[test]
    fn state_set_basic() {
        let mut set = StateSet::new();
        assert!(set.is_empty());

        set.insert(3);
        set.insert(7);
        assert!(!set.is_empty());
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(!set.contains(5));
    }

    #[test]
    fn state_set_union() {
        let mut set1: StateSet = [1, 3].into_iter().collect();
        let set2: StateSet = [2, 3, 9].into_iter().collect();

        set1.union_with(&set2);
        assert_eq!(set1.len(), 4);
        assert!(set1.contains(9));
    }

    #[test]
    fn state_set_key_is_canonical() {
        let set1: StateSet = [5, 1, 3].into_iter().collect();
        let set2: StateSet = [3, 5, 1].into_iter().collect();
        assert_eq!(set1.to_key(), vec![1, 3, 5]);
        assert_eq!(set1.to_key(), set2.to_key());
    }
}
