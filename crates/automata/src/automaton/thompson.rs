//! Thompson construction: regex syntax tree → ε-NFA.

use crate::automaton::graph::Graph;
use crate::automaton::label::Label;
use crate::automaton::nfa::Tnfa;
use crate::automaton::state::{StateId, StateIdAllocator, StateTag};
use crate::error::ConstructError;
use crate::regex::RegexNode;
use log::trace;

/// Builds an ε-NFA fragment per regex tree node, composed recursively.
///
/// Each fragment exposes exactly one dangling start and one dangling accept
/// state; parents wire fragments together only through that pair. All
/// fragments of one builder draw ids from the same allocator, so merged
/// graphs never collide.
#[derive(Debug, Default)]
pub struct ThompsonBuilder {
    ids: StateIdAllocator,
}

impl ThompsonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart id numbering for the next construction run.
    pub fn reset_ids(&mut self) {
        self.ids.reset();
    }

    /// Translate a regex tree into an NFA. An absent tree is the defined
    /// "no automaton" case; a malformed tree is an error.
    pub fn translate(&mut self, node: Option<&RegexNode>) -> Result<Option<Tnfa>, ConstructError> {
        node.map(|n| self.build(n)).transpose()
    }

    fn build(&mut self, node: &RegexNode) -> Result<Tnfa, ConstructError> {
        match node {
            RegexNode::Literal(ch) => Ok(self.leaf(Label::Symbol(*ch))),
            RegexNode::Empty => Ok(self.leaf(Label::Epsilon)),
            RegexNode::Concat(children) => {
                check_arity(node, children.len())?;
                self.concat(children)
            }
            RegexNode::Union(children) => {
                check_arity(node, children.len())?;
                self.union(children)
            }
            RegexNode::Closure(child) => self.closure(child),
        }
    }

    /// One-edge fragment: start --label--> accept.
    fn leaf(&mut self, label: Label) -> Tnfa {
        let start = self.ids.fresh(StateTag::Start);
        let accept = self.ids.fresh(StateTag::Accept);
        let mut graph = Graph::new();
        graph.add_state(start);
        graph.add_state(accept);
        graph.add_edge(start.id(), accept.id(), label);
        trace!("thompson leaf: s{} --{label}--> s{}", start.id(), accept.id());
        Tnfa::new(graph, start.id(), accept.id())
    }

    /// Chain child fragments with ε edges: accept(ci) --ε--> start(ci+1).
    /// The first start and last accept stay dangling; every interior
    /// endpoint is retagged Middle.
    fn concat(&mut self, children: &[RegexNode]) -> Result<Tnfa, ConstructError> {
        let mut graph = Graph::new();
        let mut endpoints: Vec<(StateId, StateId)> = Vec::with_capacity(children.len());

        for child in children {
            let (fragment, start, accept) = self.build(child)?.into_parts();
            graph.merge(fragment);
            endpoints.push((start, accept));
        }

        for pair in endpoints.windows(2) {
            graph.add_edge(pair[0].1, pair[1].0, Label::Epsilon);
        }

        for (i, &(start, accept)) in endpoints.iter().enumerate() {
            if i > 0 {
                graph.set_tag(start, StateTag::Middle);
            }
            if i + 1 < endpoints.len() {
                graph.set_tag(accept, StateTag::Middle);
            }
        }

        let start = endpoints[0].0;
        let accept = endpoints[endpoints.len() - 1].1;
        trace!("thompson concat: {} children, s{start}..s{accept}", endpoints.len());
        Ok(Tnfa::new(graph, start, accept))
    }

    /// Fan fresh start/accept states out over every child with ε edges.
    fn union(&mut self, children: &[RegexNode]) -> Result<Tnfa, ConstructError> {
        let start = self.ids.fresh(StateTag::Start);
        let accept = self.ids.fresh(StateTag::Accept);
        let mut graph = Graph::new();
        graph.add_state(start);
        graph.add_state(accept);

        for child in children {
            let (fragment, child_start, child_accept) = self.build(child)?.into_parts();
            graph.merge(fragment);
            graph.add_edge(start.id(), child_start, Label::Epsilon);
            graph.add_edge(child_accept, accept.id(), Label::Epsilon);
            graph.set_tag(child_start, StateTag::Middle);
            graph.set_tag(child_accept, StateTag::Middle);
        }

        trace!("thompson union: {} children, s{}..s{}", children.len(), start.id(), accept.id());
        Ok(Tnfa::new(graph, start.id(), accept.id()))
    }

    /// Kleene star: the ε edge start --ε--> accept admits the empty string,
    /// the back edge accept(c) --ε--> start(c) admits repetition.
    fn closure(&mut self, child: &RegexNode) -> Result<Tnfa, ConstructError> {
        let (fragment, child_start, child_accept) = self.build(child)?.into_parts();

        let start = self.ids.fresh(StateTag::Start);
        let accept = self.ids.fresh(StateTag::Accept);
        let mut graph = Graph::new();
        graph.add_state(start);
        graph.add_state(accept);
        graph.merge(fragment);

        graph.add_edge(start.id(), child_start, Label::Epsilon);
        graph.add_edge(child_accept, accept.id(), Label::Epsilon);
        graph.add_edge(start.id(), accept.id(), Label::Epsilon);
        graph.add_edge(child_accept, child_start, Label::Epsilon);
        graph.set_tag(child_start, StateTag::Middle);
        graph.set_tag(child_accept, StateTag::Middle);

        trace!("thompson closure: s{}..s{}", start.id(), accept.id());
        Ok(Tnfa::new(graph, start.id(), accept.id()))
    }
}

fn check_arity(node: &RegexNode, found: usize) -> Result<(), ConstructError> {
    if found < 2 {
        return Err(ConstructError::Arity {
            kind: node.kind_name(),
            expected: 2,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::RegexNode;

    fn build(node: &RegexNode) -> Tnfa {
        ThompsonBuilder::new()
            .translate(Some(node))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn absent_tree_yields_no_automaton() {
        let mut builder = ThompsonBuilder::new();
        assert!(builder.translate(None).unwrap().is_none());
    }

    #[test]
    fn literal_accepts_exactly_its_symbol() {
        let nfa = build(&RegexNode::literal('a'));
        assert!(nfa.accepts("a"));
        assert!(!nfa.accepts(""));
        assert!(!nfa.accepts("aa"));
        assert!(!nfa.accepts("b"));
        assert_eq!(nfa.num_states(), 2);
    }

    #[test]
    fn empty_leaf_accepts_only_the_empty_string() {
        let nfa = build(&RegexNode::Empty);
        assert!(nfa.accepts(""));
        assert!(!nfa.accepts("a"));
    }

    #[test]
    fn concatenation_sequences_languages() {
        let nfa = build(&RegexNode::concat(vec![
            RegexNode::literal('a'),
            RegexNode::literal('b'),
            RegexNode::literal('c'),
        ]));
        assert!(nfa.accepts("abc"));
        assert!(!nfa.accepts("ab"));
        assert!(!nfa.accepts("abcc"));
        assert!(!nfa.accepts("acb"));
    }

    #[test]
    fn union_takes_either_branch() {
        let nfa = build(&RegexNode::union(vec![
            RegexNode::literal('a'),
            RegexNode::literal('b'),
        ]));
        assert!(nfa.accepts("a"));
        assert!(nfa.accepts("b"));
        assert!(!nfa.accepts(""));
        assert!(!nfa.accepts("ab"));
    }

    #[test]
    fn closure_admits_empty_and_repetition() {
        let nfa = build(&RegexNode::closure(RegexNode::literal('a')));
        assert!(nfa.accepts(""));
        assert!(nfa.accepts("a"));
        assert!(nfa.accepts("aaaa"));
        assert!(!nfa.accepts("ab"));
    }

    #[test]
    fn fragment_size_is_linear_in_the_tree() {
        // c(a|b)*: three 2-state leaves, plus 2 states each for union and
        // closure, plus zero for concat.
        let tree = RegexNode::concat(vec![
            RegexNode::literal('c'),
            RegexNode::closure(RegexNode::union(vec![
                RegexNode::literal('a'),
                RegexNode::literal('b'),
            ])),
        ]);
        let nfa = build(&tree);
        assert_eq!(nfa.num_states(), 10);
        assert_eq!(nfa.graph().num_edges(), 12);
    }

    #[test]
    fn interior_endpoints_are_retagged_middle() {
        let nfa = build(&RegexNode::concat(vec![
            RegexNode::literal('a'),
            RegexNode::literal('b'),
        ]));
        let graph = nfa.graph();
        assert_eq!(graph.state(nfa.start()).unwrap().tag(), StateTag::Start);
        assert_eq!(graph.state(nfa.accept()).unwrap().tag(), StateTag::Accept);

        let middles = graph
            .states()
            .filter(|s| s.tag() == StateTag::Middle)
            .count();
        assert_eq!(middles, 2);
    }

    #[test]
    fn wrong_arity_is_an_explicit_error() {
        let mut builder = ThompsonBuilder::new();
        let err = builder
            .translate(Some(&RegexNode::union(vec![RegexNode::literal('a')])))
            .unwrap_err();
        assert_eq!(
            err,
            ConstructError::Arity {
                kind: "union",
                expected: 2,
                found: 1,
            }
        );

        let err = builder
            .translate(Some(&RegexNode::concat(vec![])))
            .unwrap_err();
        assert!(matches!(err, ConstructError::Arity { found: 0, .. }));
    }

    #[test]
    fn ids_are_reproducible_after_reset() {
        let tree = RegexNode::literal('x');
        let mut builder = ThompsonBuilder::new();
        let first = builder.translate(Some(&tree)).unwrap().unwrap();
        builder.reset_ids();
        let second = builder.translate(Some(&tree)).unwrap().unwrap();
        assert_eq!(first.start(), second.start());
        assert_eq!(first.accept(), second.accept());
    }
}
