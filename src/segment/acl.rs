//! Adnominal-clause segmentation, the fallback when no verb pattern fires.
//!
//! Covers noun-rooted fragments like "Obama, born in Hawaii" where the
//! relation lives in an `acl` clause under the subject instead of at the
//! root of the graph.

use log::debug;

use crate::graph::DepGraph;
use crate::segment::chunk::{adverb_chunk, object_chunk, subject_chunk};
use crate::span::Span;
use crate::token::{Position, Token};
use crate::triple::Triple;

/// Segment a graph whose root noun carries an `acl` clause.
///
/// The root becomes the subject and the clause head the relation. A direct
/// object stays the object unless a prepositional argument is present, in
/// which case the prepositional argument wins and the direct object is
/// folded into the relation ("gave flowers to" / "Mary").
pub(crate) fn segment(
    graph: &DepGraph,
    confidence: Option<f64>,
    consume_all: bool,
) -> Option<Triple> {
    let subject_index = graph.root_index()?;
    let subject_span = subject_chunk(graph, subject_index, Some("acl"))?;

    let clause = graph
        .outgoing(subject_index)
        .into_iter()
        .find(|edge| edge.label.as_str() == "acl")?;
    let relation_index = clause.dependent;

    let mut relation: Vec<Token> = vec![graph.node(relation_index)?.clone()];
    let mut object: Vec<Token> = Vec::new();
    let mut pp_object: Vec<Token> = Vec::new();
    let mut preposition: Option<Token> = None;

    for edge in graph.outgoing(relation_index) {
        let full = edge.label.as_str();
        if full == "advmod" {
            let adverbs = adverb_chunk(graph, edge.dependent, None)?;
            relation.extend(adverbs);
        } else if full.ends_with("obj") {
            if !object.is_empty() {
                debug!("rejecting clause: duplicate objects under node {relation_index}");
                return None;
            }
            object = object_chunk(graph, edge.dependent, None)?;
        } else if let Some(qualifier) = full.strip_prefix("nmod:") {
            if !pp_object.is_empty() {
                debug!(
                    "rejecting clause: duplicate prepositional arguments under node {relation_index}"
                );
                return None;
            }
            pp_object = object_chunk(graph, edge.dependent, Some("case"))?;
            for case_edge in graph.outgoing(edge.dependent) {
                if case_edge.label.as_str() == "case" {
                    preposition = graph.node(case_edge.dependent).cloned();
                }
            }
            // No case marker survived normalization; rebuild one from the
            // edge label.
            if preposition.is_none() {
                let head = graph.node(edge.dependent)?;
                preposition = Some(Token::synthesize(
                    qualifier.replace("tmod", "at_time"),
                    "IN",
                    head,
                    Position::before(edge.dependent),
                ));
            }
        } else if consume_all {
            debug!("rejecting clause: unconsumed arc {full} under node {relation_index}");
            return None;
        }
    }

    // Canonicalize to subject; relation; object, folding in the
    // prepositional phrase.
    if !pp_object.is_empty() {
        if !object.is_empty() {
            relation.append(&mut object);
        }
        object = pp_object;
    }
    if object.is_empty() {
        return None;
    }

    relation.sort_by(|a, b| a.position.cmp(&b.position));
    // The preposition reads last no matter where its token sat.
    if let Some(token) = preposition {
        relation.push(token);
    }

    Some(
        Triple::new(Span::new(subject_span), relation, Span::new(object))
            .with_confidence(confidence.unwrap_or(1.0))
            .with_source(graph.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    fn born_in_honolulu() -> DepGraph {
        // "Obama, born in Honolulu"
        let mut graph = DepGraph::new();
        graph.add(Token::new("Obama", 1).with_tag("NNP"));
        graph.add(Token::new("born", 2).with_tag("VBN"));
        graph.add(Token::new("in", 3).with_tag("IN"));
        graph.add(Token::new("Honolulu", 4).with_tag("NNP"));
        graph.link(1, 2, "acl").unwrap();
        graph.link(2, 4, "nmod:in").unwrap();
        graph.link(4, 3, "case").unwrap();
        graph.set_root(1).unwrap();
        graph
    }

    #[test]
    fn test_clausal_relation_with_case_marker() {
        let triple = segment(&born_in_honolulu(), None, true).unwrap();
        assert_eq!(triple.subject_gloss(), "Obama");
        assert_eq!(triple.relation_gloss(), "born in");
        assert_eq!(triple.object_gloss(), "Honolulu");
    }

    #[test]
    fn test_preposition_synthesized_without_case_marker() {
        let mut graph = DepGraph::new();
        graph.add(Token::new("Obama", 1).with_tag("NNP"));
        graph.add(Token::new("born", 2).with_tag("VBN"));
        graph.add(Token::new("Honolulu", 4).with_tag("NNP"));
        graph.link(1, 2, "acl").unwrap();
        graph.link(2, 4, "nmod:in").unwrap();
        graph.set_root(1).unwrap();

        let triple = segment(&graph, None, true).unwrap();
        assert_eq!(triple.relation_gloss(), "born in");
        let relation = &triple.relation;
        assert!(relation.last().unwrap().is_synthetic());
    }

    #[test]
    fn test_direct_object_clause() {
        // "Obama, who won the election" reduced to its clause core.
        let mut graph = DepGraph::new();
        graph.add(Token::new("Obama", 1).with_tag("NNP"));
        graph.add(Token::new("won", 2).with_tag("VBD"));
        graph.add(Token::new("election", 3).with_tag("NN"));
        graph.link(1, 2, "acl").unwrap();
        graph.link(2, 3, "dobj").unwrap();
        graph.set_root(1).unwrap();

        let triple = segment(&graph, None, true).unwrap();
        assert_eq!(triple.subject_gloss(), "Obama");
        assert_eq!(triple.relation_gloss(), "won");
        assert_eq!(triple.object_gloss(), "election");
    }

    #[test]
    fn test_direct_object_folds_into_relation_beside_pp() {
        // "Fred, giving flowers to Mary"
        let mut graph = DepGraph::new();
        graph.add(Token::new("Fred", 1).with_tag("NNP"));
        graph.add(Token::new("giving", 2).with_tag("VBG"));
        graph.add(Token::new("flowers", 3).with_tag("NNS"));
        graph.add(Token::new("to", 4).with_tag("TO"));
        graph.add(Token::new("Mary", 5).with_tag("NNP"));
        graph.link(1, 2, "acl").unwrap();
        graph.link(2, 3, "dobj").unwrap();
        graph.link(2, 5, "nmod:to").unwrap();
        graph.link(5, 4, "case").unwrap();
        graph.set_root(1).unwrap();

        let triple = segment(&graph, None, true).unwrap();
        assert_eq!(triple.relation_gloss(), "giving flowers to");
        assert_eq!(triple.object_gloss(), "Mary");
    }

    #[test]
    fn test_adverb_folded_into_relation() {
        let mut graph = DepGraph::new();
        graph.add(Token::new("Obama", 1).with_tag("NNP"));
        graph.add(Token::new("narrowly", 2).with_tag("RB"));
        graph.add(Token::new("won", 3).with_tag("VBD"));
        graph.add(Token::new("election", 4).with_tag("NN"));
        graph.link(1, 3, "acl").unwrap();
        graph.link(3, 2, "advmod").unwrap();
        graph.link(3, 4, "dobj").unwrap();
        graph.set_root(1).unwrap();

        let triple = segment(&graph, None, true).unwrap();
        assert_eq!(triple.relation_gloss(), "narrowly won");
    }

    #[test]
    fn test_duplicate_objects_rejected() {
        let mut graph = DepGraph::new();
        graph.add(Token::new("Obama", 1).with_tag("NNP"));
        graph.add(Token::new("won", 2).with_tag("VBD"));
        graph.add(Token::new("election", 3).with_tag("NN"));
        graph.add(Token::new("race", 4).with_tag("NN"));
        graph.link(1, 2, "acl").unwrap();
        graph.link(2, 3, "dobj").unwrap();
        graph.link(2, 4, "iobj").unwrap();
        graph.set_root(1).unwrap();

        assert!(segment(&graph, None, false).is_none());
    }

    #[test]
    fn test_unconsumed_clause_arc() {
        let mut graph = DepGraph::new();
        graph.add(Token::new("Obama", 1).with_tag("NNP"));
        graph.add(Token::new("said", 2).with_tag("VBD"));
        graph.add(Token::new("election", 3).with_tag("NN"));
        graph.add(Token::new("lost", 4).with_tag("VBD"));
        graph.link(1, 2, "acl").unwrap();
        graph.link(2, 3, "dobj").unwrap();
        graph.link(2, 4, "ccomp").unwrap();
        graph.set_root(1).unwrap();

        assert!(segment(&graph, None, true).is_none());
        assert!(segment(&graph, None, false).is_some());
    }

    #[test]
    fn test_no_clause_no_triple() {
        let mut graph = DepGraph::new();
        graph.add(Token::new("Obama", 1).with_tag("NNP"));
        graph.set_root(1).unwrap();

        assert!(segment(&graph, None, true).is_none());
    }
}
