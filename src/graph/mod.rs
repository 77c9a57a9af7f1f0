//! Dependency graph over sentence tokens.
//!
//! A [`DepGraph`] is a directed graph whose nodes are [`Token`]s and whose
//! edges carry an [`EdgeLabel`] naming the grammatical relation between a
//! governor and its dependent. The graph has one distinguished root token
//! per sentence. Extraction never mutates a caller's graph; normalization
//! works on a private copy.
//!
//! Nodes are keyed by the token's 1-based linear index, and all accessors
//! iterate in a deterministic order so that extraction output is stable.
//!
//! # Examples
//!
//! Building the graph for "cats have tails":
//!
//! ```
//! use trine::graph::DepGraph;
//! use trine::token::Token;
//!
//! let mut graph = DepGraph::new();
//! let cats = graph.add(Token::new("cats", 1).with_tag("NNS"));
//! let have = graph.add(Token::new("have", 2).with_tag("VBP"));
//! let tails = graph.add(Token::new("tails", 3).with_tag("NNS"));
//!
//! graph.link(have, cats, "nsubj").unwrap();
//! graph.link(have, tails, "dobj").unwrap();
//! graph.set_root(have).unwrap();
//!
//! assert_eq!(graph.len(), 3);
//! assert_eq!(graph.root().unwrap().text, "have");
//! assert_eq!(graph.out_degree(have), 2);
//! ```

pub mod label;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrineError};
use crate::token::Token;

pub use label::EdgeLabel;

/// A directed, labeled edge between two graph nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// The 1-based index of the governing token.
    pub governor: u32,

    /// The 1-based index of the dependent token.
    pub dependent: u32,

    /// The grammatical relation between the two.
    pub label: EdgeLabel,
}

/// A dependency graph for one sentence.
///
/// Nodes are real tokens keyed by their 1-based index; edges carry labeled
/// grammatical relations. One node is the distinguished sentence root. The
/// node map is ordered, and [`DepGraph::outgoing`] / [`DepGraph::incoming`]
/// sort their results, so traversal order never depends on insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DepGraph {
    nodes: BTreeMap<u32, Token>,
    edges: Vec<Edge>,
    root: Option<u32>,
}

impl DepGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        DepGraph {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            root: None,
        }
    }

    /// Add a token as a graph node, returning its index.
    ///
    /// The node is keyed by the token's 1-based linear index; adding a second
    /// token with the same index replaces the first.
    pub fn add(&mut self, token: Token) -> u32 {
        let index = token.index();
        self.nodes.insert(index, token);
        index
    }

    /// Add a labeled edge from `governor` to `dependent`.
    ///
    /// Both endpoints must already be nodes of the graph.
    pub fn link<L: Into<EdgeLabel>>(
        &mut self,
        governor: u32,
        dependent: u32,
        label: L,
    ) -> Result<()> {
        if !self.nodes.contains_key(&governor) {
            return Err(TrineError::graph(format!("node {governor} not in graph")));
        }
        if !self.nodes.contains_key(&dependent) {
            return Err(TrineError::graph(format!("node {dependent} not in graph")));
        }
        self.edges.push(Edge {
            governor,
            dependent,
            label: label.into(),
        });
        Ok(())
    }

    /// Mark the node at `index` as the sentence root.
    pub fn set_root(&mut self, index: u32) -> Result<()> {
        if !self.nodes.contains_key(&index) {
            return Err(TrineError::graph(format!("node {index} not in graph")));
        }
        self.root = Some(index);
        Ok(())
    }

    /// The root token, if one has been set.
    pub fn root(&self) -> Option<&Token> {
        self.root.and_then(|i| self.nodes.get(&i))
    }

    /// The index of the root token, if one has been set.
    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    /// The token at `index`, if it is a node of this graph.
    pub fn node(&self, index: u32) -> Option<&Token> {
        self.nodes.get(&index)
    }

    /// Check whether `index` is a node of this graph.
    pub fn contains(&self, index: u32) -> bool {
        self.nodes.contains_key(&index)
    }

    /// The number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The graph's tokens in index order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.nodes.values()
    }

    /// The node indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.nodes.keys().copied()
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The edges whose governor is `index`, sorted by dependent then label.
    pub fn outgoing(&self, index: u32) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self
            .edges
            .iter()
            .filter(|e| e.governor == index)
            .collect();
        edges.sort_by_key(|e| (e.dependent, e.label.as_str()));
        edges
    }

    /// The edges whose dependent is `index`, sorted by governor then label.
    pub fn incoming(&self, index: u32) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self
            .edges
            .iter()
            .filter(|e| e.dependent == index)
            .collect();
        edges.sort_by_key(|e| (e.governor, e.label.as_str()));
        edges
    }

    /// The number of edges whose governor is `index`.
    pub fn out_degree(&self, index: u32) -> usize {
        self.edges.iter().filter(|e| e.governor == index).count()
    }

    /// Remove the node at `index` along with every incident edge.
    ///
    /// Clears the root if the root is removed. Removing an index that is not
    /// a node is a no-op.
    pub fn remove_node(&mut self, index: u32) {
        if self.nodes.remove(&index).is_none() {
            return;
        }
        self.edges
            .retain(|e| e.governor != index && e.dependent != index);
        if self.root == Some(index) {
            self.root = None;
        }
    }

    /// Re-root the graph at `new_root`, keeping only its subtree.
    ///
    /// Every node not reachable from `new_root` through outgoing edges is
    /// removed, along with its incident edges.
    pub fn retain_subtree(&mut self, new_root: u32) -> Result<()> {
        if !self.nodes.contains_key(&new_root) {
            return Err(TrineError::graph(format!("node {new_root} not in graph")));
        }
        let mut keep = std::collections::BTreeSet::new();
        let mut fringe = std::collections::VecDeque::new();
        fringe.push_back(new_root);
        while let Some(index) = fringe.pop_front() {
            if !keep.insert(index) {
                continue;
            }
            for edge in self.outgoing(index) {
                fringe.push_back(edge.dependent);
            }
        }
        self.nodes.retain(|index, _| keep.contains(index));
        self.edges
            .retain(|e| keep.contains(&e.governor) && keep.contains(&e.dependent));
        self.root = Some(new_root);
        Ok(())
    }
}
