//! Segmentation of dependency graphs into relation triples.
//!
//! [`Segmenter`] is the entry point. [`Segmenter::segment`] splits a graph
//! that already expresses a single coherent assertion into its subject,
//! relation and object parts, trying the verb-centric patterns first and
//! falling back to adnominal clauses. [`Segmenter::extract_all`] is the
//! complementary many-triples path: it scans a sentence for nominal
//! relations between named entities without requiring clause structure.

mod acl;
mod chunk;
mod nominal;
mod normalize;
mod verb;

pub use nominal::entity_span;
pub use normalize::normalize;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::graph::DepGraph;
use crate::pattern::graph::GraphPattern;
use crate::pattern::library::{self, PatternStats};
use crate::pattern::token::TokenPattern;
use crate::token::Token;
use crate::triple::Triple;

/// Tuning knobs for a [`Segmenter`], fixed at construction time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Extract nominal relations even without named-entity support. On
    /// most text this greatly over-produces trivial triples.
    pub allow_nominals_without_ner: bool,

    /// Reorder the verb patterns by hit frequency as matches accumulate.
    pub adaptive_reordering: bool,

    /// Cumulative hits between reorderings.
    pub resort_interval: u64,
}

impl SegmenterConfig {
    pub fn new() -> Self {
        SegmenterConfig::default()
    }

    pub fn with_allow_nominals_without_ner(mut self, allow: bool) -> Self {
        self.allow_nominals_without_ner = allow;
        self
    }

    pub fn with_adaptive_reordering(mut self, adaptive: bool) -> Self {
        self.adaptive_reordering = adaptive;
        self
    }

    pub fn with_resort_interval(mut self, interval: u64) -> Self {
        self.resort_interval = interval;
        self
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        SegmenterConfig {
            allow_nominals_without_ner: false,
            adaptive_reordering: true,
            resort_interval: 1000,
        }
    }
}

/// Splits clausal dependency graphs into (subject, relation, object)
/// triples.
///
/// A segmenter is cheap to construct and immutable apart from internal
/// pattern hit counters, which are lock-guarded; a single instance may be
/// shared across threads.
///
/// # Examples
///
/// ```
/// use trine::graph::DepGraph;
/// use trine::segment::Segmenter;
/// use trine::token::Token;
///
/// let mut graph = DepGraph::new();
/// graph.add(Token::new("cats", 1).with_tag("NNS"));
/// graph.add(Token::new("have", 2).with_tag("VBP"));
/// graph.add(Token::new("tails", 3).with_tag("NNS"));
/// graph.link(2, 1, "nsubj")?;
/// graph.link(2, 3, "dobj")?;
/// graph.set_root(2)?;
///
/// let segmenter = Segmenter::new();
/// let triple = segmenter.segment(&graph, None, true).unwrap();
/// assert_eq!(triple.to_string(), "1.000\tcats\thave\ttails");
/// # Ok::<(), trine::error::TrineError>(())
/// ```
#[derive(Debug)]
pub struct Segmenter {
    config: SegmenterConfig,
    verb_patterns: Vec<GraphPattern>,
    noun_token_patterns: Vec<TokenPattern>,
    noun_graph_patterns: Vec<GraphPattern>,
    stats: Mutex<PatternStats>,
}

impl Segmenter {
    /// A segmenter with the default configuration.
    pub fn new() -> Self {
        Segmenter::with_config(SegmenterConfig::default())
    }

    pub fn with_config(config: SegmenterConfig) -> Self {
        let verb_patterns = library::verb_patterns();
        let stats = Mutex::new(PatternStats::new(
            verb_patterns.len(),
            config.resort_interval,
            config.adaptive_reordering,
        ));
        Segmenter {
            noun_token_patterns: library::noun_token_patterns(),
            noun_graph_patterns: library::noun_graph_patterns(config.allow_nominals_without_ner),
            verb_patterns,
            stats,
            config,
        }
    }

    /// Add a caller-supplied verb pattern, tried after the built-ins.
    ///
    /// The pattern must capture a subject and either an object or an
    /// appositive, plus a verb: either a node, or an edge whose label is
    /// possessive (`nmod:poss`) or prepositional (`nmod:*`). Capture names
    /// are the constants in [`pattern::library`]. Hit statistics are reset
    /// to make room for the new pattern.
    ///
    /// [`pattern::library`]: crate::pattern::library
    pub fn with_verb_pattern(mut self, pattern: GraphPattern) -> Self {
        self.verb_patterns.push(pattern);
        self.stats = Mutex::new(PatternStats::new(
            self.verb_patterns.len(),
            self.config.resort_interval,
            self.config.adaptive_reordering,
        ));
        self
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment a single-assertion graph into a triple.
    ///
    /// The graph is normalized first (case markers stripped, existential
    /// clauses re-rooted); the caller's graph is never mutated. The verb
    /// patterns are tried in their current order and the adnominal-clause
    /// path serves as a fallback. With `consume_all`, a candidate must
    /// account for every edge out of its relation head, so partial
    /// readings of a larger sentence are rejected.
    pub fn segment(
        &self,
        graph: &DepGraph,
        confidence: Option<f64>,
        consume_all: bool,
    ) -> Option<Triple> {
        let cleaned = normalize(graph);
        verb::segment(self, &cleaned, confidence, consume_all)
            .or_else(|| acl::segment(&cleaned, confidence, consume_all))
    }

    /// Extract every nominal relation in a sentence.
    ///
    /// Operates on the raw graph plus the flat token sequence; the graph
    /// is not normalized, since nominal patterns bind case markers and
    /// apposition directly. Results are deduplicated and filtered for
    /// downward polarity. Returned triples carry no source graph.
    pub fn extract_all(&self, graph: &DepGraph, tokens: &[Token]) -> Vec<Triple> {
        nominal::extract(self, graph, tokens)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Segmenter::new()
    }
}
