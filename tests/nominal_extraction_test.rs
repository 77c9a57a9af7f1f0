use std::collections::HashSet;

use trine::error::Result;
use trine::graph::DepGraph;
use trine::segment::{Segmenter, SegmenterConfig};
use trine::token::{Polarity, Token};
use trine::triple::Triple;

#[test]
fn extract_all_links_entity_complement_entity_runs() -> Result<()> {
    // "United States president Obama"
    let tokens = vec![
        Token::new("United", 1).with_tag("NNP").with_ner("LOCATION"),
        Token::new("States", 2).with_tag("NNPS").with_ner("LOCATION"),
        Token::new("president", 3).with_tag("NN"),
        Token::new("Obama", 4).with_tag("NNP").with_ner("PERSON"),
    ];
    let mut graph = DepGraph::new();
    for token in &tokens {
        graph.add(token.clone());
    }
    graph.link(4, 3, "compound")?;
    graph.link(4, 2, "compound")?;
    graph.link(2, 1, "compound")?;
    graph.set_root(4)?;

    let triples = Segmenter::new().extract_all(&graph, &tokens);
    assert_eq!(
        glosses(&triples),
        vec!["United States; is president of; Obama", "Obama; is; United States"],
        "token-sequence extractions come before dependency ones"
    );
    Ok(())
}

#[test]
fn extract_all_reads_appositive_nominal_relations() -> Result<()> {
    let (graph, tokens) = apposition_fixture()?;

    let triples = Segmenter::new().extract_all(&graph, &tokens);
    assert_eq!(glosses(&triples), vec!["Durin; son of; Thorin"]);
    assert!(
        triples[0].source().is_none(),
        "nominal triples carry no source graph"
    );
    Ok(())
}

#[test]
fn extract_all_emits_both_readings_of_a_possessive_apposition() -> Result<()> {
    // "Thorin 's son , Durin"
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
    graph.link(3, 1, "nmod:poss")?;
    graph.link(3, 5, "appos")?;
    graph.set_root(3)?;

    let triples = Segmenter::new().extract_all(&graph, &tokens);
    assert_eq!(
        glosses(&triples),
        vec!["Thorin; is son of; Durin", "Thorin; 's son is; Durin"]
    );
    for triple in &triples {
        assert!(
            !triple.subject.overlaps(&triple.object),
            "subject and object spans never overlap"
        );
    }
    Ok(())
}

#[test]
fn extract_all_deduplicates_and_is_deterministic() -> Result<()> {
    let (mut graph, tokens) = apposition_fixture()?;
    // A second, identical nmod edge must not yield a second triple.
    graph.link(3, 5, "nmod:of")?;

    let segmenter = Segmenter::new();
    let first = segmenter.extract_all(&graph, &tokens);
    let second = segmenter.extract_all(&graph, &tokens);
    assert_eq!(first, second, "extraction is deterministic");

    let mut keys = HashSet::new();
    for triple in &first {
        let key = (
            triple.subject.start(),
            triple.subject.end(),
            triple.relation_gloss(),
            triple.object.start(),
            triple.object.end(),
        );
        assert!(keys.insert(key), "no two triples share a dedup key");
    }
    assert_eq!(glosses(&first), vec!["Durin; son of; Thorin"]);
    Ok(())
}

#[test]
fn extract_all_filters_downward_polarity() -> Result<()> {
    // As in "no relative of Durin ...": the subject sits under a
    // downward-entailing operator, so asserting the bare triple is wrong.
    let tokens = vec![
        Token::new("Durin", 1)
            .with_tag("NNP")
            .with_ner("PERSON")
            .with_polarity(Polarity::Downward),
        Token::new(",", 2).with_tag(","),
        Token::new("son", 3).with_tag("NN"),
        Token::new("of", 4).with_tag("IN"),
        Token::new("Thorin", 5).with_tag("NNP").with_ner("PERSON"),
    ];
    let mut graph = DepGraph::new();
    for token in &tokens {
        graph.add(token.clone());
    }
    graph.link(1, 3, "appos")?;
    graph.link(3, 5, "nmod:of")?;
    graph.link(5, 4, "case")?;
    graph.set_root(1)?;

    let triples = Segmenter::new().extract_all(&graph, &tokens);
    assert!(triples.is_empty(), "downward-polarity extractions are dropped");
    Ok(())
}

#[test]
fn extract_all_requires_entity_support_by_default() -> Result<()> {
    // "conductor in Berlin": no entity anchors the subject.
    let tokens = vec![
        Token::new("conductor", 1).with_tag("NN"),
        Token::new("in", 2).with_tag("IN"),
        Token::new("Berlin", 3).with_tag("NNP").with_ner("LOCATION"),
    ];
    let mut graph = DepGraph::new();
    for token in &tokens {
        graph.add(token.clone());
    }
    graph.link(1, 3, "nmod:in")?;
    graph.link(3, 2, "case")?;
    graph.set_root(1)?;

    let strict = Segmenter::new().extract_all(&graph, &tokens);
    assert!(strict.is_empty(), "the strict patterns want an entity subject");

    let loose = Segmenter::with_config(
        SegmenterConfig::new().with_allow_nominals_without_ner(true),
    );
    assert_eq!(
        glosses(&loose.extract_all(&graph, &tokens)),
        vec!["conductor; is in; Berlin"]
    );
    Ok(())
}

fn apposition_fixture() -> Result<(DepGraph, Vec<Token>)> {
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
    graph.link(1, 3, "appos")?;
    graph.link(3, 5, "nmod:of")?;
    graph.link(5, 4, "case")?;
    graph.set_root(1)?;
    Ok((graph, tokens))
}

fn glosses(triples: &[Triple]) -> Vec<String> {
    triples
        .iter()
        .map(|triple| {
            format!(
                "{}; {}; {}",
                triple.subject_gloss(),
                triple.relation_gloss(),
                triple.object_gloss()
            )
        })
        .collect()
}
