//! Declarative patterns over dependency graphs.
//!
//! A [`GraphPattern`] is a tree of node specifications connected by edge
//! specifications. Matching walks the pattern tree and the graph together:
//! the pattern root is anchored at a graph node, each [`EdgeSpec`] must be
//! satisfied by some outgoing edge of that node, and the edge's dependent
//! must recursively satisfy the child [`NodeSpec`]. Named captures record
//! which graph node (by index) or which edge label satisfied each spec.
//!
//! Patterns are data, not code: the segmenter's pattern library builds them
//! once and the matcher interprets them, which is what lets the verb
//! pattern list be reordered by hit frequency without touching any
//! matching logic.
//!
//! # Examples
//!
//! A pattern for a verb with a subject and a direct object:
//!
//! ```
//! use trine::graph::DepGraph;
//! use trine::pattern::{EdgePred, EdgeSpec, GraphPattern, NodeSpec};
//! use trine::token::Token;
//!
//! let pattern = GraphPattern::new(
//!     "subject-verb-object",
//!     NodeSpec::any()
//!         .capture("verb")
//!         .child(EdgeSpec::new(EdgePred::exact("nsubj"), NodeSpec::any().capture("subject")))
//!         .child(EdgeSpec::new(EdgePred::exact("dobj"), NodeSpec::any().capture("object"))),
//! );
//!
//! let mut graph = DepGraph::new();
//! let cats = graph.add(Token::new("cats", 1));
//! let have = graph.add(Token::new("have", 2));
//! let tails = graph.add(Token::new("tails", 3));
//! graph.link(have, cats, "nsubj").unwrap();
//! graph.link(have, tails, "dobj").unwrap();
//! graph.set_root(have).unwrap();
//!
//! let bindings = pattern.match_root(&graph).unwrap();
//! assert_eq!(bindings.node("subject"), Some(cats));
//! assert_eq!(bindings.node("object"), Some(tails));
//! ```

use ahash::AHashMap;

use crate::graph::{DepGraph, EdgeLabel};
use crate::pattern::predicate::{EdgePred, TokenPred};

/// The node and edge captures of one successful match.
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    nodes: AHashMap<String, u32>,
    edges: AHashMap<String, EdgeLabel>,
}

impl Bindings {
    /// The graph node bound to `name`, if the capture was filled.
    pub fn node(&self, name: &str) -> Option<u32> {
        self.nodes.get(name).copied()
    }

    /// The edge label bound to `name`, if the capture was filled.
    pub fn edge(&self, name: &str) -> Option<&EdgeLabel> {
        self.edges.get(name)
    }
}

/// A node of a graph pattern: a token predicate, an optional capture name,
/// and the outgoing edges the matched node must offer.
#[derive(Clone, Debug)]
pub struct NodeSpec {
    pred: TokenPred,
    capture: Option<String>,
    children: Vec<EdgeSpec>,
}

impl NodeSpec {
    /// A node spec with the given token predicate.
    pub fn new(pred: TokenPred) -> Self {
        NodeSpec {
            pred,
            capture: None,
            children: Vec::new(),
        }
    }

    /// A node spec that matches any token.
    pub fn any() -> Self {
        NodeSpec::new(TokenPred::any())
    }

    /// Record the matched node under `name`.
    pub fn capture<S: Into<String>>(mut self, name: S) -> Self {
        self.capture = Some(name.into());
        self
    }

    /// Require (or, for optional specs, allow) an outgoing edge.
    pub fn child(mut self, edge: EdgeSpec) -> Self {
        self.children.push(edge);
        self
    }
}

/// An edge of a graph pattern: a label predicate, an optional label
/// capture, an optionality flag, and the child node spec at the far end.
#[derive(Clone, Debug)]
pub struct EdgeSpec {
    pred: EdgePred,
    capture: Option<String>,
    optional: bool,
    child: NodeSpec,
}

impl EdgeSpec {
    /// An edge spec with the given label predicate and child node.
    pub fn new(pred: EdgePred, child: NodeSpec) -> Self {
        EdgeSpec {
            pred,
            capture: None,
            optional: false,
            child,
        }
    }

    /// Record the matched edge's label under `name`.
    pub fn capture<S: Into<String>>(mut self, name: S) -> Self {
        self.capture = Some(name.into());
        self
    }

    /// Allow the pattern to match even when no edge satisfies this spec.
    ///
    /// An optional spec still binds greedily: the unbound alternative is
    /// taken only when no satisfying edge exists.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// A named, compiled graph pattern.
#[derive(Clone, Debug)]
pub struct GraphPattern {
    name: String,
    root: NodeSpec,
}

impl GraphPattern {
    /// Create a pattern with a root node spec.
    pub fn new<S: Into<String>>(name: S, root: NodeSpec) -> Self {
        GraphPattern {
            name: name.into(),
            root,
        }
    }

    /// The pattern's name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Match the pattern anchored at the graph's root node.
    ///
    /// Returns the first complete binding in the matcher's deterministic
    /// search order, or `None` when the pattern does not fit.
    pub fn match_root(&self, graph: &DepGraph) -> Option<Bindings> {
        let root = graph.root_index()?;
        match_node(&self.root, graph, root, &Bindings::default())
            .into_iter()
            .next()
    }

    /// Enumerate every binding of the pattern anchored at any graph node.
    ///
    /// Anchors are tried in ascending node order and edge alternatives in
    /// the graph's sorted outgoing-edge order, so the result order is
    /// deterministic.
    pub fn find_all(&self, graph: &DepGraph) -> Vec<Bindings> {
        let mut results = Vec::new();
        for index in graph.indices() {
            results.extend(match_node(&self.root, graph, index, &Bindings::default()));
        }
        results
    }
}

/// All bindings that satisfy `spec` when anchored at `index`.
fn match_node(spec: &NodeSpec, graph: &DepGraph, index: u32, base: &Bindings) -> Vec<Bindings> {
    let Some(token) = graph.node(index) else {
        return Vec::new();
    };
    if !spec.pred.matches(token) {
        return Vec::new();
    }
    let mut bindings = base.clone();
    if let Some(name) = &spec.capture {
        bindings.nodes.insert(name.clone(), index);
    }
    match_children(&spec.children, graph, index, bindings)
}

/// All bindings that satisfy the remaining edge specs out of `index`.
fn match_children(
    children: &[EdgeSpec],
    graph: &DepGraph,
    index: u32,
    base: Bindings,
) -> Vec<Bindings> {
    let Some((spec, rest)) = children.split_first() else {
        return vec![base];
    };
    let mut results = Vec::new();
    let mut bound = false;
    for edge in graph.outgoing(index) {
        if !spec.pred.matches(&edge.label) {
            continue;
        }
        let mut bindings = base.clone();
        if let Some(name) = &spec.capture {
            bindings.edges.insert(name.clone(), edge.label.clone());
        }
        for complete in match_node(&spec.child, graph, edge.dependent, &bindings) {
            bound = true;
            results.extend(match_children(rest, graph, index, complete));
        }
    }
    if spec.optional && !bound {
        results.extend(match_children(rest, graph, index, base));
    }
    results
}
