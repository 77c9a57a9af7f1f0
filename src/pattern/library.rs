//! The built-in pattern library.
//!
//! Three ordered families drive extraction:
//!
//! - **Verb graph patterns**: matched against the whole normalized graph,
//!   anchored at its root. First match wins; the iteration order adapts to
//!   hit frequency via [`PatternStats`].
//! - **Nominal token patterns**: matched against the flat token sequence,
//!   catching entity juxtapositions ("United States president Obama") that
//!   need no coherent clause around them.
//! - **Nominal graph patterns**: appositive and modifier configurations in
//!   the graph; two of them come in a strict entity-gated form and a loose
//!   ungated form selected by `allow_nominals_without_ner`.
//!
//! Capture names are shared constants so that caller-supplied patterns can
//! bind the same roles the assembler reads.

use crate::pattern::graph::{EdgeSpec, GraphPattern, NodeSpec};
use crate::pattern::predicate::{EdgePred, TokenPred};
use crate::pattern::token::TokenPattern;

/// The main verb node, when the pattern binds one.
pub const VERB: &str = "verb";
/// A copula or auxiliary folded into the relation.
pub const BE: &str = "be";
/// The subject head node.
pub const SUBJECT: &str = "subject";
/// The object head node.
pub const OBJECT: &str = "object";
/// An appositive that replaces the object when bound.
pub const APPOS: &str = "appos";
/// A direct object folded into the relation itself.
pub const REL_OBJ: &str = "rel_obj";
/// A preposition node folded into the relation.
pub const PREP: &str = "prep";
/// The label of the edge leading to a prepositional object.
pub const PREP_EDGE: &str = "prep_edge";
/// An edge to skip when expanding the subject.
pub const SUBJ_IGNORED: &str = "subj_ignored";
/// An edge to skip when expanding the object.
pub const OBJ_IGNORED: &str = "obj_ignored";
/// The relation head node (nominal patterns), or the relation edge.
pub const RELATION: &str = "relation";
/// The label of the edge qualifying a nominal relation.
pub const REL_AUX: &str = "rel_aux";
/// The modifier edge of the plain nominal-modifier pattern.
pub const ARC: &str = "arc";
/// The non-entity noun run between two entities in a token pattern.
pub const COMPLEMENT: &str = "complement";

fn edge(pattern: &str) -> EdgePred {
    EdgePred::regex(pattern).expect("built-in edge predicate must compile")
}

fn noun() -> TokenPred {
    TokenPred::any()
        .with_tag_regex("N.*")
        .expect("built-in token predicate must compile")
}

fn entity() -> TokenPred {
    TokenPred::any()
        .with_ner_regex("PERSON|ORGANIZATION|LOCATION")
        .expect("built-in token predicate must compile")
}

fn any_entity() -> TokenPred {
    TokenPred::any()
        .with_ner_regex("..+")
        .expect("built-in token predicate must compile")
}

fn value_entity() -> TokenPred {
    TokenPred::any()
        .with_ner_regex("NUMBER|DURATION|PERSON|ORGANIZATION")
        .expect("built-in token predicate must compile")
}

fn noun_complement() -> TokenPred {
    TokenPred::any()
        .with_tag_regex("NN.*")
        .expect("built-in token predicate must compile")
        .without_ner_regex("PERSON|ORGANIZATION|LOCATION")
        .expect("built-in token predicate must compile")
}

/// The ordered verb-centric graph patterns.
///
/// Each is matched anchored at the graph root. Every pattern binds
/// [`SUBJECT`] and either [`OBJECT`] or [`APPOS`]; all of the built-ins
/// also bind a [`VERB`] node.
pub fn verb_patterns() -> Vec<GraphPattern> {
    vec![
        // "cats are standing next to dogs", "Jill blew kisses at Jack"
        GraphPattern::new(
            "prepositional-object",
            NodeSpec::any()
                .capture(VERB)
                .child(
                    EdgeSpec::new(edge("cop|aux(pass)?"), NodeSpec::any().capture(BE)).optional(),
                )
                .child(EdgeSpec::new(
                    edge(".subj(pass)?"),
                    NodeSpec::any().capture(SUBJECT),
                ))
                .child(
                    EdgeSpec::new(
                        edge("(nmod|acl|advcl):.*"),
                        NodeSpec::any().capture(OBJECT).child(
                            EdgeSpec::new(EdgePred::exact("appos"), NodeSpec::any().capture(APPOS))
                                .optional(),
                        ),
                    )
                    .capture(PREP_EDGE),
                )
                .child(
                    EdgeSpec::new(EdgePred::exact("dobj"), NodeSpec::new(noun()).capture(REL_OBJ))
                        .optional(),
                ),
        ),
        // "fish like to swim"
        GraphPattern::new(
            "clausal-complement",
            NodeSpec::any()
                .capture(VERB)
                .child(EdgeSpec::new(
                    edge(".subj(pass)?"),
                    NodeSpec::any().capture(SUBJECT),
                ))
                .child(EdgeSpec::new(
                    EdgePred::exact("xcomp"),
                    NodeSpec::any().capture(OBJECT).child(
                        EdgeSpec::new(EdgePred::exact("appos"), NodeSpec::any().capture(APPOS))
                            .optional(),
                    ),
                )),
        ),
        // "cats have tails"
        GraphPattern::new(
            "direct-object",
            NodeSpec::any()
                .capture(VERB)
                .child(EdgeSpec::new(edge("aux(pass)?"), NodeSpec::any().capture(BE)).optional())
                .child(EdgeSpec::new(
                    edge(".subj(pass)?"),
                    NodeSpec::any().capture(SUBJECT),
                ))
                .child(EdgeSpec::new(
                    edge("[di]obj|xcomp"),
                    NodeSpec::any().capture(OBJECT).child(
                        EdgeSpec::new(EdgePred::exact("appos"), NodeSpec::any().capture(APPOS))
                            .optional(),
                    ),
                )),
        ),
        // "cats are cute"
        GraphPattern::new(
            "copular-predicate",
            NodeSpec::any()
                .capture(OBJECT)
                .child(EdgeSpec::new(
                    edge(".subj(pass)?"),
                    NodeSpec::any().capture(SUBJECT),
                ))
                .child(EdgeSpec::new(
                    edge("cop|aux(pass)?"),
                    NodeSpec::any().capture(VERB),
                )),
        ),
        // "Tom and Jerry were fighting"
        GraphPattern::new(
            "passive-conjunction",
            NodeSpec::any().capture(VERB).child(EdgeSpec::new(
                EdgePred::exact("nsubjpass"),
                NodeSpec::any().capture(SUBJECT).child(
                    EdgeSpec::new(EdgePred::exact("conj:and"), NodeSpec::any().capture(OBJECT))
                        .capture(SUBJ_IGNORED),
                ),
            )),
        ),
    ]
}

/// The nominal token-sequence patterns.
///
/// The leading entity group is always the subject and the trailing one the
/// object; a captured [`COMPLEMENT`] run between them becomes the body of
/// the synthesized "is ... of" relation.
pub fn noun_token_patterns() -> Vec<TokenPattern> {
    vec![
        // "United States president Obama"
        TokenPattern::new("entity-complement-entity")
            .group(SUBJECT, entity())
            .group(COMPLEMENT, noun_complement())
            .group(OBJECT, entity()),
        // "America 's president , Obama"
        TokenPattern::new("possessive-complement")
            .group(SUBJECT, entity())
            .literal("'s")
            .group(COMPLEMENT, noun_complement())
            .then_optional(TokenPred::any().with_text(","))
            .group(OBJECT, entity()),
        // "Obama , 28 ,"
        TokenPattern::new("comma-apposition")
            .group(SUBJECT, entity())
            .literal(",")
            .group(OBJECT, value_entity())
            .literal(","),
        // "Obama ( 28 )"
        TokenPattern::new("paren-apposition")
            .group(SUBJECT, entity())
            .literal("(")
            .group(OBJECT, value_entity())
            .literal(")"),
    ]
}

/// The nominal graph patterns.
///
/// With `allow_nominals_without_ner` the modifier and prepositional
/// patterns drop their entity gates, trading precision for recall.
pub fn noun_graph_patterns(allow_nominals_without_ner: bool) -> Vec<GraphPattern> {
    let mut patterns = vec![
        // "Durin, son of Thorin"
        GraphPattern::new(
            "appositive-nominal",
            NodeSpec::new(noun()).capture(SUBJECT).child(EdgeSpec::new(
                EdgePred::exact("appos"),
                NodeSpec::any().capture(RELATION).child(
                    EdgeSpec::new(edge("nmod:.*"), NodeSpec::any().capture(OBJECT))
                        .capture(REL_AUX),
                ),
            )),
        ),
        // "Thorin's son, Durin"
        GraphPattern::new(
            "possessive-appositive",
            NodeSpec::any()
                .capture(RELATION)
                .child(
                    EdgeSpec::new(edge("nmod:.*"), NodeSpec::any().capture(SUBJECT))
                        .capture(REL_AUX),
                )
                .child(EdgeSpec::new(
                    EdgePred::exact("appos"),
                    NodeSpec::any().capture(OBJECT),
                )),
        ),
    ];
    if allow_nominals_without_ner {
        // "President Obama"
        patterns.push(GraphPattern::new(
            "modifier-nominal",
            NodeSpec::new(noun()).capture(SUBJECT).child(
                EdgeSpec::new(EdgePred::exact("amod"), NodeSpec::any().capture(OBJECT))
                    .capture(ARC),
            ),
        ));
        // "Chris Manning of Stanford"
        patterns.push(GraphPattern::new(
            "prepositional-nominal",
            NodeSpec::new(noun()).capture(SUBJECT).child(
                EdgeSpec::new(edge("nmod:.*"), NodeSpec::any().capture(OBJECT)).capture(RELATION),
            ),
        ));
    } else {
        patterns.push(GraphPattern::new(
            "modifier-nominal",
            NodeSpec::new(entity()).capture(SUBJECT).child(
                EdgeSpec::new(
                    edge("amod|compound"),
                    NodeSpec::new(any_entity()).capture(OBJECT),
                )
                .capture(ARC),
            ),
        ));
        patterns.push(GraphPattern::new(
            "prepositional-nominal",
            NodeSpec::new(entity()).capture(SUBJECT).child(
                EdgeSpec::new(edge("nmod:.*"), NodeSpec::new(any_entity()).capture(OBJECT))
                    .capture(RELATION),
            ),
        ));
    }
    patterns
}

/// Hit counters and the derived iteration order for the verb patterns.
///
/// Matching a verb pattern records a hit; after every `interval` cumulative
/// hits the order is re-sorted descending by hit count, so frequent
/// patterns are tried first. This is an optimization only: any pattern
/// that fully assembles yields a valid triple, so the order decides which
/// valid reading gets the first attempt, not whether a reading is valid.
#[derive(Debug)]
pub(crate) struct PatternStats {
    hits: Vec<u64>,
    total: u64,
    order: Vec<usize>,
    interval: u64,
    adaptive: bool,
}

impl PatternStats {
    pub(crate) fn new(count: usize, interval: u64, adaptive: bool) -> Self {
        PatternStats {
            hits: vec![0; count],
            total: 0,
            order: (0..count).collect(),
            interval,
            adaptive,
        }
    }

    /// A snapshot of the current iteration order.
    pub(crate) fn order(&self) -> Vec<usize> {
        self.order.clone()
    }

    /// Record a hit for the pattern at `index`, resorting when due.
    pub(crate) fn record(&mut self, index: usize) {
        self.hits[index] += 1;
        self.total += 1;
        if self.adaptive && self.interval > 0 && self.total % self.interval == 0 {
            self.order.sort_by_key(|&i| std::cmp::Reverse(self.hits[i]));
            log::debug!(
                "resorted verb patterns after {} hits: {:?}",
                self.total,
                self.order
            );
        }
    }
}
