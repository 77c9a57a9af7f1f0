//! # Trine
//!
//! A relation triple segmenter for open information extraction over
//! dependency graphs.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Verb-centric and adnominal-clause segmentation of single assertions
//! - Nominal relation extraction between named entities
//! - Declarative graph and token patterns, extensible at runtime
//! - Graph normalization (case-marker stripping, existential re-rooting)
//! - Downward-polarity filtering and duplicate suppression
//!
//! ## Example
//!
//! ```
//! use trine::graph::DepGraph;
//! use trine::segment::Segmenter;
//! use trine::token::Token;
//!
//! // "cats have tails"
//! let mut graph = DepGraph::new();
//! graph.add(Token::new("cats", 1).with_tag("NNS"));
//! graph.add(Token::new("have", 2).with_tag("VBP"));
//! graph.add(Token::new("tails", 3).with_tag("NNS"));
//! graph.link(2, 1, "nsubj")?;
//! graph.link(2, 3, "dobj")?;
//! graph.set_root(2)?;
//!
//! let segmenter = Segmenter::new();
//! let triple = segmenter.segment(&graph, None, true).unwrap();
//! assert_eq!(triple.to_string(), "1.000\tcats\thave\ttails");
//! # Ok::<(), trine::error::TrineError>(())
//! ```

pub mod error;
pub mod graph;
pub mod pattern;
pub mod segment;
pub mod span;
pub mod token;
pub mod triple;

pub mod prelude {
    pub use crate::error::{Result, TrineError};
    pub use crate::graph::{DepGraph, Edge, EdgeLabel};
    pub use crate::pattern::{
        Bindings, EdgePred, EdgeSpec, GraphPattern, NodeSpec, TokenMatch, TokenPattern, TokenPred,
    };
    pub use crate::segment::{entity_span, normalize, Segmenter, SegmenterConfig};
    pub use crate::span::Span;
    pub use crate::token::{Polarity, Position, Token};
    pub use crate::triple::Triple;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
