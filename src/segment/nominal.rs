//! Nominal extraction: entity-to-entity relations with no clause around
//! them.
//!
//! Unlike [`segment`], which yields at most one triple per graph, this
//! extractor collects every nominal relation it can find, first from the
//! flat token sequence and then from the dependency graph. Candidates are
//! deduplicated by subject range, relation gloss and object range, and
//! anything touching a downward-polarity token is discarded at the end.
//!
//! [`segment`]: crate::segment::Segmenter::segment

use std::ops::Range;

use ahash::AHashSet;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::graph::DepGraph;
use crate::pattern::library::{COMPLEMENT, OBJECT, REL_AUX, RELATION, SUBJECT};
use crate::segment::Segmenter;
use crate::span::Span;
use crate::token::{Position, Token};
use crate::triple::Triple;

lazy_static! {
    /// Punctuation that marks a clause boundary between two entity spans.
    static ref BOUNDARY: Regex =
        Regex::new(r#"^[.,:;('"]$"#).expect("boundary pattern must compile");
}

/// Widen `span` so it covers the whole named-entity run at each end.
///
/// The left edge follows the first token's tag backward, the right edge
/// the last token's tag forward; a token tagged `O` anchors its edge in
/// place. Out-of-range or empty spans are returned unchanged.
pub fn entity_span(tokens: &[Token], span: Range<usize>) -> Range<usize> {
    if span.start >= span.end || span.end > tokens.len() {
        return span;
    }
    let mut start = span.start;
    let mut end = span.end;
    if tokens[start].has_ner() {
        let ner = tokens[start].ner.clone();
        while start > 0 && tokens[start - 1].ner == ner {
            start -= 1;
        }
    }
    if tokens[end - 1].has_ner() {
        let ner = tokens[end - 1].ner.clone();
        while end < tokens.len() && tokens[end].ner == ner {
            end += 1;
        }
    }
    start..end
}

type SeenKey = ((usize, usize), String, (usize, usize));

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// True when exactly one boundary token separates `left` from `right`.
fn straddles_boundary(tokens: &[Token], left: &Range<usize>, right: &Range<usize>) -> bool {
    right.start > 0
        && left.end == right.start - 1
        && (BOUNDARY.is_match(&tokens[left.end].text) || tokens[left.end].tag == "CC")
}

fn push_unique(
    extractions: &mut Vec<Triple>,
    seen: &mut AHashSet<SeenKey>,
    subject_range: &Range<usize>,
    object_range: &Range<usize>,
    subject: Vec<Token>,
    relation: Vec<Token>,
    object: Vec<Token>,
) {
    let gloss = relation
        .iter()
        .map(|token| token.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let key = (
        (subject_range.start, subject_range.end),
        gloss,
        (object_range.start, object_range.end),
    );
    if seen.insert(key) {
        extractions.push(Triple::new(Span::new(subject), relation, Span::new(object)));
    }
}

pub(crate) fn extract(segmenter: &Segmenter, graph: &DepGraph, tokens: &[Token]) -> Vec<Triple> {
    let mut extractions: Vec<Triple> = Vec::new();
    let mut seen: AHashSet<SeenKey> = AHashSet::new();

    // Token-sequence phase.
    for pattern in &segmenter.noun_token_patterns {
        for found in pattern.find_all(tokens) {
            let Some(subject_group) = found.capture(SUBJECT) else {
                continue;
            };
            let Some(object_group) = found.capture(OBJECT) else {
                continue;
            };
            let subject_range = entity_span(tokens, subject_group);
            let object_range = entity_span(tokens, object_group);
            if overlaps(&subject_range, &object_range) {
                continue;
            }
            let subject: Vec<Token> = tokens[subject_range.clone()].to_vec();
            let object: Vec<Token> = tokens[object_range.clone()].to_vec();
            let last_subject = subject.last().expect("entity group is never empty");

            let mut relation = vec![
                Token::synthesize("is", "VBZ", last_subject, Position::after(last_subject.index()))
                    .with_lemma("be"),
            ];
            if let Some(complement) = found.capture(COMPLEMENT) {
                relation.extend(tokens[complement].iter().cloned());
                let first_object = &object[0];
                relation.push(Token::synthesize(
                    "of",
                    "IN",
                    first_object,
                    Position::before(first_object.index()),
                ));
            }
            push_unique(
                &mut extractions,
                &mut seen,
                &subject_range,
                &object_range,
                subject,
                relation,
                object,
            );
        }
    }

    // Dependency phase.
    for pattern in &segmenter.noun_graph_patterns {
        'bindings: for bindings in pattern.find_all(graph) {
            let subject_index = bindings
                .node(SUBJECT)
                .expect("nominal pattern bound no subject");
            let object_index = bindings
                .node(OBJECT)
                .expect("nominal pattern bound no object");
            if subject_index == 0 || object_index == 0 {
                continue;
            }
            let subject_range =
                entity_span(tokens, subject_index as usize - 1..subject_index as usize);
            let object_range =
                entity_span(tokens, object_index as usize - 1..object_index as usize);
            if subject_range.end > tokens.len() || object_range.end > tokens.len() {
                continue;
            }
            if overlaps(&subject_range, &object_range) {
                debug!("skipping identity extraction at {subject_index}");
                continue;
            }
            if straddles_boundary(tokens, &subject_range, &object_range)
                || straddles_boundary(tokens, &object_range, &subject_range)
            {
                debug!("skipping extraction straddling a clause at {subject_index}");
                continue;
            }
            let subject: Vec<Token> = tokens[subject_range.clone()].to_vec();
            let object: Vec<Token> = tokens[object_range.clone()].to_vec();
            let last_subject = subject.last().expect("entity span is never empty");
            let after_subject = Position::after(last_subject.index());

            let mut relation: Vec<Token> = Vec::new();
            if let Some(relation_index) = bindings.node(RELATION) {
                let Some(relation_token) = graph.node(relation_index) else {
                    continue;
                };
                relation.push(relation_token.clone());
                if let Some(label) = bindings.edge(REL_AUX) {
                    if label.as_str() == "nmod:poss" {
                        relation.insert(
                            0,
                            Token::synthesize("'s", "POS", last_subject, after_subject),
                        );
                        relation.push(
                            Token::synthesize("is", "VBZ", last_subject, after_subject)
                                .with_lemma("be"),
                        );
                    } else if let Some(qualifier) = label.as_str().strip_prefix("nmod:") {
                        relation.push(Token::synthesize(
                            qualifier.replace("tmod", "at_time"),
                            "PP",
                            last_subject,
                            after_subject,
                        ));
                    }
                }
            } else {
                relation.push(
                    Token::synthesize("is", "VBZ", last_subject, after_subject).with_lemma("be"),
                );
                let mut preposition: Option<String> = None;
                if let Some(label) = bindings.edge(RELATION) {
                    let full = label.as_str();
                    if full == "nmod:poss" {
                        relation.clear();
                        preposition = Some(String::from("'s"));
                    } else if let Some(qualifier) = full.strip_prefix("nmod:") {
                        preposition = Some(qualifier.replace("tmod", "at_time"));
                    } else if full.starts_with("acl:") || full.starts_with("advcl:") {
                        preposition = label.specific().map(String::from);
                    }
                }
                // "conductor of electricity" is not a relation worth keeping.
                if segmenter.config.allow_nominals_without_ner
                    && preposition.as_deref() == Some("of")
                {
                    continue 'bindings;
                }
                if let Some(text) = preposition {
                    relation.push(Token::synthesize(text, "PP", last_subject, after_subject));
                }
            }
            push_unique(
                &mut extractions,
                &mut seen,
                &subject_range,
                &object_range,
                subject,
                relation,
                object,
            );
        }
    }

    // Nothing extracted under downward polarity survives.
    extractions.retain(|triple| {
        let downward = triple.tokens().any(|token| token.polarity.is_downward());
        if downward {
            debug!("dropping downward-polarity extraction: {triple}");
        }
        !downward
    });
    extractions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{Segmenter, SegmenterConfig};
    use crate::token::Polarity;

    fn glosses(triples: &[Triple]) -> Vec<String> {
        triples
            .iter()
            .map(|t| {
                format!(
                    "{}; {}; {}",
                    t.subject_gloss(),
                    t.relation_gloss(),
                    t.object_gloss()
                )
            })
            .collect()
    }

    #[test]
    fn test_entity_span_expands_over_ner_runs() {
        let tokens = vec![
            Token::new("United", 1).with_ner("LOCATION"),
            Token::new("States", 2).with_ner("LOCATION"),
            Token::new("president", 3),
            Token::new("Obama", 4).with_ner("PERSON"),
        ];
        assert_eq!(entity_span(&tokens, 1..2), 0..2);
        assert_eq!(entity_span(&tokens, 2..3), 2..3);
        assert_eq!(entity_span(&tokens, 3..4), 3..4);
        // Out-of-range spans come back unchanged.
        assert_eq!(entity_span(&tokens, 2..9), 2..9);
        assert_eq!(entity_span(&tokens, 3..3), 3..3);
    }

    #[test]
    fn test_entity_complement_entity() {
        let tokens = vec![
            Token::new("United", 1).with_tag("NNP").with_ner("LOCATION"),
            Token::new("States", 2).with_tag("NNP").with_ner("LOCATION"),
            Token::new("president", 3).with_tag("NN"),
            Token::new("Obama", 4).with_tag("NNP").with_ner("PERSON"),
        ];
        let triples = extract(&Segmenter::new(), &DepGraph::new(), &tokens);
        assert_eq!(
            glosses(&triples),
            vec!["United States; is president of; Obama"]
        );
    }

    #[test]
    fn test_possessive_complement() {
        let tokens = vec![
            Token::new("America", 1).with_tag("NNP").with_ner("LOCATION"),
            Token::new("'s", 2).with_tag("POS"),
            Token::new("president", 3).with_tag("NN"),
            Token::new(",", 4).with_tag(","),
            Token::new("Obama", 5).with_tag("NNP").with_ner("PERSON"),
        ];
        let triples = extract(&Segmenter::new(), &DepGraph::new(), &tokens);
        assert_eq!(glosses(&triples), vec!["America; is president of; Obama"]);
    }

    #[test]
    fn test_comma_apposition() {
        let tokens = vec![
            Token::new("Obama", 1).with_tag("NNP").with_ner("PERSON"),
            Token::new(",", 2).with_tag(","),
            Token::new("28", 3).with_tag("CD").with_ner("NUMBER"),
            Token::new(",", 4).with_tag(","),
        ];
        let triples = extract(&Segmenter::new(), &DepGraph::new(), &tokens);
        assert_eq!(glosses(&triples), vec!["Obama; is; 28"]);
    }

    #[test]
    fn test_appositive_nominal() {
        // "Durin , son of Thorin"
        let tokens = vec![
            Token::new("Durin", 1).with_tag("NNP").with_ner("PERSON"),
            Token::new(",", 2).with_tag(","),
            Token::new("son", 3).with_tag("NN"),
            Token::new("of", 4).with_tag("IN"),
            Token::new("Thorin", 5).with_tag("NNP").with_ner("PERSON"),
        ];
        let mut graph = DepGraph::new();
        for token in &tokens {
            graph.add(token.clone());
        }
        graph.link(1, 3, "appos").unwrap();
        graph.link(3, 5, "nmod:of").unwrap();
        graph.link(5, 4, "case").unwrap();
        graph.set_root(1).unwrap();

        let triples = extract(&Segmenter::new(), &graph, &tokens);
        assert_eq!(glosses(&triples), vec!["Durin; son of; Thorin"]);
    }

    #[test]
    fn test_possessive_appositive() {
        // "Thorin 's son , Durin": both the token pattern and the
        // dependency pattern fire, with different relation glosses.
        let tokens = vec![
            Token::new("Thorin", 1).with_tag("NNP").with_ner("PERSON"),
            Token::new("'s", 2).with_tag("POS"),
            Token::new("son", 3).with_tag("NN"),
            Token::new(",", 4).with_tag(","),
            Token::new("Durin", 5).with_tag("NNP").with_ner("PERSON"),
        ];
        let mut graph = DepGraph::new();
        for token in &tokens {
            graph.add(token.clone());
        }
        graph.link(3, 1, "nmod:poss").unwrap();
        graph.link(3, 5, "appos").unwrap();
        graph.set_root(3).unwrap();

        let triples = extract(&Segmenter::new(), &graph, &tokens);
        assert_eq!(
            glosses(&triples),
            vec!["Thorin; is son of; Durin", "Thorin; 's son is; Durin"]
        );
    }

    #[test]
    fn test_modifier_nominal() {
        // "President Obama" with a titled modifier.
        let tokens = vec![
            Token::new("President", 1).with_tag("NNP").with_ner("TITLE"),
            Token::new("Obama", 2).with_tag("NNP").with_ner("PERSON"),
        ];
        let mut graph = DepGraph::new();
        for token in &tokens {
            graph.add(token.clone());
        }
        graph.link(2, 1, "amod").unwrap();
        graph.set_root(2).unwrap();

        let triples = extract(&Segmenter::new(), &graph, &tokens);
        assert_eq!(glosses(&triples), vec!["Obama; is; President"]);
    }

    #[test]
    fn test_prepositional_nominal() {
        // "Chris Manning of Stanford"
        let tokens = vec![
            Token::new("Chris", 1).with_tag("NNP").with_ner("PERSON"),
            Token::new("Manning", 2).with_tag("NNP").with_ner("PERSON"),
            Token::new("of", 3).with_tag("IN"),
            Token::new("Stanford", 4).with_tag("NNP").with_ner("ORGANIZATION"),
        ];
        let mut graph = DepGraph::new();
        for token in &tokens {
            graph.add(token.clone());
        }
        graph.link(2, 1, "compound").unwrap();
        graph.link(2, 4, "nmod:of").unwrap();
        graph.link(4, 3, "case").unwrap();
        graph.set_root(2).unwrap();

        let triples = extract(&Segmenter::new(), &graph, &tokens);
        assert_eq!(glosses(&triples), vec!["Chris Manning; is of; Stanford"]);
    }

    #[test]
    fn test_loose_mode_skips_of_relations() {
        // "conductor of electricity" must not become (conductor; is of;
        // electricity), even when NER gates are off.
        let tokens = vec![
            Token::new("conductor", 1).with_tag("NN"),
            Token::new("of", 2).with_tag("IN"),
            Token::new("electricity", 3).with_tag("NN"),
        ];
        let mut graph = DepGraph::new();
        for token in &tokens {
            graph.add(token.clone());
        }
        graph.link(1, 3, "nmod:of").unwrap();
        graph.link(3, 2, "case").unwrap();
        graph.set_root(1).unwrap();

        let config = SegmenterConfig::new().with_allow_nominals_without_ner(true);
        let triples = extract(&Segmenter::with_config(config), &graph, &tokens);
        assert!(triples.is_empty());
    }

    #[test]
    fn test_straddling_comma_blocks_dependency_extraction() {
        // "Obama , Hawaii" with a spurious modifier edge across the comma.
        let tokens = vec![
            Token::new("Obama", 1).with_tag("NNP").with_ner("PERSON"),
            Token::new(",", 2).with_tag(","),
            Token::new("Hawaii", 3).with_tag("NNP").with_ner("LOCATION"),
        ];
        let mut graph = DepGraph::new();
        for token in &tokens {
            graph.add(token.clone());
        }
        graph.link(1, 3, "compound").unwrap();
        graph.set_root(1).unwrap();

        let triples = extract(&Segmenter::new(), &graph, &tokens);
        assert!(triples.is_empty());
    }

    #[test]
    fn test_duplicate_bindings_collapse() {
        // Parallel edges produce identical candidates; only one survives.
        let tokens = vec![
            Token::new("Obama", 1).with_tag("NNP").with_ner("PERSON"),
            Token::new("of", 2).with_tag("IN"),
            Token::new("Hawaii", 3).with_tag("NNP").with_ner("LOCATION"),
        ];
        let mut graph = DepGraph::new();
        for token in &tokens {
            graph.add(token.clone());
        }
        graph.link(1, 3, "nmod:of").unwrap();
        graph.link(1, 3, "nmod:of").unwrap();
        graph.set_root(1).unwrap();

        let triples = extract(&Segmenter::new(), &graph, &tokens);
        assert_eq!(glosses(&triples), vec!["Obama; is of; Hawaii"]);
    }

    #[test]
    fn test_downward_polarity_is_filtered() {
        let tokens = vec![
            Token::new("Obama", 1)
                .with_tag("NNP")
                .with_ner("PERSON")
                .with_polarity(Polarity::Downward),
            Token::new(",", 2).with_tag(","),
            Token::new("28", 3).with_tag("CD").with_ner("NUMBER"),
            Token::new(",", 4).with_tag(","),
        ];
        let triples = extract(&Segmenter::new(), &DepGraph::new(), &tokens);
        assert!(triples.is_empty());
    }
}
