//! Constrained expansion of a head node into a contiguous token chunk.
//!
//! A subject, object or adverb span is the yield of the subtree under its
//! head, but only if every arc inside that subtree is on the whitelist for
//! the role. A single disallowed arc invalidates the whole chunk, which is
//! what keeps extractions from swallowing clausal complements or stray
//! punctuation subtrees.

use std::collections::VecDeque;

use ahash::AHashSet;
use lazy_static::lazy_static;
use log::debug;

use crate::graph::DepGraph;
use crate::token::{Position, Token};

lazy_static! {
    /// Arcs a subject subtree may contain.
    pub(crate) static ref SUBJECT_ARCS: AHashSet<&'static str> = [
        "amod",
        "compound",
        "aux",
        "nummod",
        "nmod:poss",
        "nmod:tmod",
        "expl",
        "nsubj",
    ]
    .into_iter()
    .collect();

    /// Arcs an object subtree may contain. Broader than the subject set:
    /// objects may carry prepositional attachments and conjunctions.
    pub(crate) static ref OBJECT_ARCS: AHashSet<&'static str> = [
        "amod",
        "compound",
        "aux",
        "nummod",
        "nmod",
        "nsubj",
        "nmod:*",
        "nmod:poss",
        "nmod:tmod",
        "conj:and",
        "advmod",
        "acl",
    ]
    .into_iter()
    .collect();

    /// Arcs an adverbial modifier subtree may contain.
    pub(crate) static ref ADVERB_ARCS: AHashSet<&'static str> =
        ["amod", "advmod", "conj", "conj:and", "conj:or", "auxpass"]
            .into_iter()
            .collect();

    /// Arcs under a direct object folded into the relation.
    pub(crate) static ref REL_OBJ_ARCS: AHashSet<&'static str> =
        ["compound"].into_iter().collect();
}

/// Expand the subtree under `root_index` into a position-sorted chunk.
///
/// Returns `None` if any arc in the subtree is neither on the `arcs`
/// whitelist nor the `ignored` arc, or if the subtree contains a cycle.
/// When the head carries a copula or passive auxiliary, its own `cop`,
/// `auxpass` and subject arcs are skipped rather than expanded, so that a
/// copular predicate yields just the predicate.
///
/// Known prepositional and conjunction qualifiers met on the way down are
/// spliced back in as synthesized tokens: a `nmod:in` edge contributes an
/// "in" just after its governor, a `conj:and` edge an "and" just before
/// the conjunct.
pub(crate) fn valid_chunk(
    graph: &DepGraph,
    root_index: u32,
    arcs: &AHashSet<&'static str>,
    ignored: Option<&str>,
) -> Option<Vec<Token>> {
    let copula = graph
        .outgoing(root_index)
        .iter()
        .any(|edge| matches!(edge.label.short(), "cop" | "auxpass"));

    let mut chunk: Vec<Token> = Vec::new();
    let mut visited: AHashSet<u32> = AHashSet::new();
    let mut fringe: VecDeque<u32> = VecDeque::new();
    fringe.push_back(root_index);

    while let Some(index) = fringe.pop_front() {
        if !visited.insert(index) {
            debug!("chunk at {root_index} is cyclic at node {index}");
            return None;
        }
        let token = graph.node(index)?.clone();

        if index != root_index {
            for edge in graph.incoming(index) {
                let full = edge.label.as_str();
                if (full.starts_with("nmod:") && full != "nmod:poss" && full != "nmod:npmod")
                    || full.starts_with("acl:")
                    || full.starts_with("advcl:")
                {
                    if let Some(governor) = graph.node(edge.governor) {
                        let qualifier = edge.label.specific().unwrap_or_default();
                        chunk.push(Token::synthesize(
                            qualifier.replace("tmod", "at_time"),
                            "PP",
                            governor,
                            Position::after(edge.governor),
                        ));
                    }
                }
                if edge.label.short() == "conj" {
                    if let Some(coordinator) = edge.label.specific() {
                        chunk.push(Token::synthesize(
                            coordinator,
                            "CC",
                            &token,
                            Position::before(index),
                        ));
                    }
                }
            }
        }

        for edge in graph.outgoing(index) {
            let short = edge.label.short();
            if copula && (short == "cop" || short.contains("subj") || short == "auxpass") {
                continue;
            }
            if ignored == Some(edge.label.as_str()) {
                continue;
            }
            if !edge.label.permitted_by(arcs) {
                debug!(
                    "chunk at {root_index} rejected: arc {} from node {index}",
                    edge.label
                );
                return None;
            }
            fringe.push_back(edge.dependent);
        }

        chunk.push(token);
    }

    chunk.sort_by(|a, b| a.position.cmp(&b.position));
    Some(chunk)
}

/// Expand a subject subtree, or `None` if it is not a valid subject.
pub(crate) fn subject_chunk(
    graph: &DepGraph,
    root_index: u32,
    ignored: Option<&str>,
) -> Option<Vec<Token>> {
    valid_chunk(graph, root_index, &SUBJECT_ARCS, ignored)
}

/// Expand an object subtree, or `None` if it is not a valid object.
pub(crate) fn object_chunk(
    graph: &DepGraph,
    root_index: u32,
    ignored: Option<&str>,
) -> Option<Vec<Token>> {
    valid_chunk(graph, root_index, &OBJECT_ARCS, ignored)
}

/// Expand an adverbial subtree, or `None` if it is not a valid adverb.
pub(crate) fn adverb_chunk(
    graph: &DepGraph,
    root_index: u32,
    ignored: Option<&str>,
) -> Option<Vec<Token>> {
    valid_chunk(graph, root_index, &ADVERB_ARCS, ignored)
}
