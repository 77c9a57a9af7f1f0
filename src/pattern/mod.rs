//! Declarative patterns over dependency graphs and token sequences.
//!
//! Graph patterns ([`GraphPattern`]) describe a rooted fragment of a
//! dependency graph: a predicate on the root token plus a set of edge
//! constraints on its descendants, each of which may capture the node or
//! edge it matched under a name. Token patterns ([`TokenPattern`]) are the
//! surface-order counterpart, matching contiguous runs of tokens. The
//! built-in patterns used for segmentation live in [`library`].

pub mod graph;
pub mod library;
pub mod predicate;
pub mod token;

pub use self::graph::{Bindings, EdgeSpec, GraphPattern, NodeSpec};
pub use self::predicate::{EdgePred, TokenPred};
pub use self::token::{TokenMatch, TokenPattern};
