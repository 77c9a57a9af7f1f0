//! Criterion benchmarks for trine extraction.
//!
//! Covers the hot paths of a bulk extraction run:
//! - Graph normalization
//! - Verb-centric segmentation
//! - Nominal extraction over token sequences

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use trine::graph::DepGraph;
use trine::segment::{Segmenter, normalize};
use trine::token::Token;

/// "cats have tails"
fn transitive_graph() -> DepGraph {
    let mut graph = DepGraph::new();
    graph.add(Token::new("cats", 1).with_tag("NNS"));
    graph.add(Token::new("have", 2).with_tag("VBP"));
    graph.add(Token::new("tails", 3).with_tag("NNS"));
    graph.link(2, 1, "nsubj").unwrap();
    graph.link(2, 3, "dobj").unwrap();
    graph.set_root(2).unwrap();
    graph
}

/// "Obama is president of United States", case markers still attached.
fn copular_graph() -> DepGraph {
    let mut graph = DepGraph::new();
    graph.add(Token::new("Obama", 1).with_tag("NNP").with_ner("PERSON"));
    graph.add(Token::new("is", 2).with_tag("VBZ").with_lemma("be"));
    graph.add(Token::new("president", 3).with_tag("NN"));
    graph.add(Token::new("of", 4).with_tag("IN"));
    graph.add(Token::new("United", 5).with_tag("NNP").with_ner("LOCATION"));
    graph.add(Token::new("States", 6).with_tag("NNPS").with_ner("LOCATION"));
    graph.link(3, 1, "nsubj").unwrap();
    graph.link(3, 2, "cop").unwrap();
    graph.link(3, 6, "nmod:of").unwrap();
    graph.link(6, 4, "case").unwrap();
    graph.link(6, 5, "compound").unwrap();
    graph.set_root(3).unwrap();
    graph
}

/// "United States president Obama , son of Kenya" with graph and tokens.
fn nominal_fixture() -> (DepGraph, Vec<Token>) {
    let tokens = vec![
        Token::new("United", 1).with_tag("NNP").with_ner("LOCATION"),
        Token::new("States", 2).with_tag("NNPS").with_ner("LOCATION"),
        Token::new("president", 3).with_tag("NN"),
        Token::new("Obama", 4).with_tag("NNP").with_ner("PERSON"),
        Token::new(",", 5).with_tag(","),
        Token::new("son", 6).with_tag("NN"),
        Token::new("of", 7).with_tag("IN"),
        Token::new("Kenya", 8).with_tag("NNP").with_ner("LOCATION"),
    ];
    let mut graph = DepGraph::new();
    for token in &tokens {
        graph.add(token.clone());
    }
    graph.link(4, 3, "compound").unwrap();
    graph.link(4, 2, "compound").unwrap();
    graph.link(2, 1, "compound").unwrap();
    graph.link(4, 6, "appos").unwrap();
    graph.link(6, 8, "nmod:of").unwrap();
    graph.link(8, 7, "case").unwrap();
    graph.set_root(4).unwrap();
    (graph, tokens)
}

fn bench_normalize(c: &mut Criterion) {
    let graph = copular_graph();

    c.bench_function("normalize_copular", |b| {
        b.iter(|| black_box(normalize(black_box(&graph))))
    });
}

fn bench_segment(c: &mut Criterion) {
    let segmenter = Segmenter::new();
    let transitive = transitive_graph();
    let copular = copular_graph();

    let mut group = c.benchmark_group("segment");
    group.bench_function("transitive", |b| {
        b.iter(|| black_box(segmenter.segment(black_box(&transitive), None, true)))
    });
    group.bench_function("copular_prepositional", |b| {
        b.iter(|| black_box(segmenter.segment(black_box(&copular), None, true)))
    });
    group.finish();
}

fn bench_extract_all(c: &mut Criterion) {
    let segmenter = Segmenter::new();
    let (graph, tokens) = nominal_fixture();

    let mut group = c.benchmark_group("extract_all");
    group.throughput(Throughput::Elements(tokens.len() as u64));
    group.bench_function("nominal_sentence", |b| {
        b.iter(|| black_box(segmenter.extract_all(black_box(&graph), black_box(&tokens))))
    });
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_segment, bench_extract_all);
criterion_main!(benches);
