//! Regex syntax tree consumed by the Thompson builder.
//!
//! The tree is produced by an external parser; this crate never parses
//! pattern text, it only walks nodes of this shape.

/// A node of a parsed regular expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexNode {
    /// A single terminal symbol.
    Literal(char),
    /// The empty string ε, the implicit empty branch of patterns like `a|ε`.
    Empty,
    /// Ordered sequence of at least two children.
    Concat(Vec<RegexNode>),
    /// Alternation over at least two children.
    Union(Vec<RegexNode>),
    /// Kleene star over exactly one child.
    Closure(Box<RegexNode>),
}

impl RegexNode {
    pub fn literal(symbol: char) -> Self {
        RegexNode::Literal(symbol)
    }

    pub fn concat(children: Vec<RegexNode>) -> Self {
        RegexNode::Concat(children)
    }

    pub fn union(children: Vec<RegexNode>) -> Self {
        RegexNode::Union(children)
    }

    pub fn closure(child: RegexNode) -> Self {
        RegexNode::Closure(Box::new(child))
    }

    /// The terminal symbol of a literal node.
    pub fn symbol(&self) -> Option<char> {
        match self {
            RegexNode::Literal(ch) => Some(*ch),
            _ => None,
        }
    }

    /// The ordered children of this node (empty for leaves).
    pub fn children(&self) -> &[RegexNode] {
        match self {
            RegexNode::Literal(_) | RegexNode::Empty => &[],
            RegexNode::Concat(children) | RegexNode::Union(children) => children,
            RegexNode::Closure(child) => std::slice::from_ref(child),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            RegexNode::Literal(_) => "literal",
            RegexNode::Empty => "empty",
            RegexNode::Concat(_) => "concatenation",
            RegexNode::Union(_) => "union",
            RegexNode::Closure(_) => "closure",
        }
    }
}
