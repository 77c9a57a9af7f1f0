//! Verb-centric segmentation: the first stage of [`Segmenter::segment`].
//!
//! Each verb pattern is matched anchored at the graph root, in the order
//! maintained by the hit statistics. The first pattern whose bindings
//! assemble into a valid triple wins; any failure while assembling falls
//! through to the next pattern.
//!
//! [`Segmenter::segment`]: crate::segment::Segmenter::segment

use ahash::AHashSet;
use log::{debug, trace};

use crate::graph::DepGraph;
use crate::pattern::graph::Bindings;
use crate::pattern::library::{
    APPOS, BE, OBJ_IGNORED, OBJECT, PREP, PREP_EDGE, REL_OBJ, SUBJ_IGNORED, SUBJECT, VERB,
};
use crate::segment::chunk::{
    REL_OBJ_ARCS, adverb_chunk, object_chunk, subject_chunk, valid_chunk,
};
use crate::segment::Segmenter;
use crate::span::Span;
use crate::token::{Position, Token};
use crate::triple::Triple;

pub(crate) fn segment(
    segmenter: &Segmenter,
    graph: &DepGraph,
    confidence: Option<f64>,
    consume_all: bool,
) -> Option<Triple> {
    let order = segmenter.stats.lock().order();
    for index in order {
        let pattern = &segmenter.verb_patterns[index];
        let Some(bindings) = pattern.match_root(graph) else {
            continue;
        };
        // nmod:poss is not a preposition.
        if bindings.edge(PREP_EDGE).map(|label| label.as_str()) == Some("nmod:poss") {
            continue;
        }
        segmenter.stats.lock().record(index);
        trace!("verb pattern {} matched", pattern.name());
        if let Some(triple) = assemble(graph, &bindings, confidence, consume_all) {
            return Some(triple);
        }
    }
    None
}

/// Build a triple from one verb pattern's bindings, or `None` if any of
/// its spans fail to validate.
fn assemble(
    graph: &DepGraph,
    bindings: &Bindings,
    confidence: Option<f64>,
    consume_all: bool,
) -> Option<Triple> {
    let object_index = bindings
        .node(APPOS)
        .or_else(|| bindings.node(OBJECT))
        .expect("verb pattern bound neither an object nor an appositive");
    let subject_index = bindings
        .node(SUBJECT)
        .expect("verb pattern bound no subject");

    // Subject and object are always accounted for.
    let mut known_dependents = 2usize;
    let mut relation: Vec<Token> = Vec::new();
    let mut adverb_roots: Vec<u32> = Vec::new();
    let mut subj_ignored: Option<String> = None;
    let mut obj_ignored: Option<String> = None;

    let verb_node = bindings.node(VERB);
    let verb_token = match verb_node {
        Some(verb_index) => {
            let rel_obj = bindings.node(REL_OBJ);
            for edge in graph.outgoing(verb_index) {
                let full = edge.label.as_str();
                if full == "advmod" || full == "amod" {
                    let dependent = graph.node(edge.dependent)?;
                    // Interrogative adverbs and "then" never belong in a relation.
                    if !dependent.tag.starts_with('W')
                        && !dependent.text.eq_ignore_ascii_case("then")
                    {
                        adverb_roots.push(edge.dependent);
                    }
                } else if rel_obj == Some(edge.dependent) {
                    let folded = valid_chunk(graph, edge.dependent, &REL_OBJ_ARCS, None)?;
                    relation.extend(folded);
                    known_dependents += 1;
                }
            }
            graph.node(verb_index)?.clone()
        }
        None => {
            // The relation comes from an edge label rather than a word.
            let label = bindings
                .edge(VERB)
                .expect("verb pattern matched without binding a verb");
            let subject = graph.node(subject_index)?;
            if label.as_str() == "nmod:poss" {
                obj_ignored = Some(String::from("nmod:poss"));
                Token::synthesize("'s", "POS", subject, Position::after(subject_index))
            } else if let Some(qualifier) = label.as_str().strip_prefix("nmod:") {
                let text = qualifier.replace('_', " ").replace("tmod", "at_time");
                subj_ignored = Some(label.as_str().to_string());
                Token::synthesize(text, "IN", subject, Position::after(subject_index))
            } else {
                panic!("verb edge capture must be possessive or prepositional");
            }
        }
    };
    relation.push(verb_token.clone());

    if let Some(prep_index) = bindings.node(PREP) {
        relation.push(graph.node(prep_index)?.clone());
        known_dependents += 1;
    }
    if let Some(be_index) = bindings.node(BE) {
        relation.push(graph.node(be_index)?.clone());
        known_dependents += 1;
    }

    // Adverbs have to be well-formed chunks themselves.
    if !adverb_roots.is_empty() {
        let mut seen: AHashSet<Position> = AHashSet::new();
        for root in adverb_roots {
            let chunk = adverb_chunk(graph, root, None)?;
            known_dependents += 1;
            for token in chunk {
                if seen.insert(token.position) {
                    relation.push(token);
                }
            }
        }
    }

    if let Some(label) = bindings.edge(PREP_EDGE) {
        let qualifier = label.specific().unwrap_or(label.as_str());
        let text = qualifier.replace('_', " ").replace("tmod", "at_time");
        relation.push(Token::synthesize(
            text,
            "PP",
            &verb_token,
            Position::after(verb_token.index() + 10),
        ));
    }

    // A synthesized verb has no outgoing edges to account for.
    if consume_all {
        if let Some(verb_index) = verb_node {
            if graph.out_degree(verb_index) > known_dependents {
                debug!(
                    "rejecting candidate: verb at {verb_index} has unconsumed dependents"
                );
                return None;
            }
        }
    }

    relation.sort_by(|a, b| a.position.cmp(&b.position));

    let subj_ignored = subj_ignored
        .or_else(|| bindings.edge(SUBJ_IGNORED).map(|label| label.as_str().to_string()))
        .or_else(|| bindings.edge(PREP_EDGE).map(|label| label.as_str().to_string()));
    let obj_ignored =
        obj_ignored.or_else(|| bindings.edge(OBJ_IGNORED).map(|label| label.as_str().to_string()));

    let subject = Span::new(subject_chunk(graph, subject_index, subj_ignored.as_deref())?);
    let object = Span::new(object_chunk(graph, object_index, obj_ignored.as_deref())?);
    if subject.shares_token(&object) {
        debug!("rejecting candidate: subject and object overlap");
        return None;
    }

    Some(
        Triple::new(subject, relation, object)
            .with_confidence(confidence.unwrap_or(1.0))
            .with_source(graph.clone()),
    )
}
