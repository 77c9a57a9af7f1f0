//! The relation triple value type.
//!
//! A [`Triple`] is the unit of output of this crate: a subject span, an
//! ordered relation token sequence, and an object span, with an optional
//! confidence. The relation is a plain token sequence rather than a [`Span`]
//! because assembly may splice in synthesized tokens (a copula, a possessive
//! marker, a preposition lifted out of an edge label) that have no contiguous
//! home in the sentence, and because some assembly steps append tokens after
//! the positional sort on purpose.
//!
//! # Examples
//!
//! ```
//! use trine::span::Span;
//! use trine::token::Token;
//! use trine::triple::Triple;
//!
//! let subject = Span::new(vec![Token::new("cats", 1)]);
//! let relation = vec![Token::new("have", 2)];
//! let object = Span::new(vec![Token::new("tails", 3)]);
//!
//! let triple = Triple::new(subject, relation, object);
//! assert_eq!(triple.subject_gloss(), "cats");
//! assert_eq!(triple.relation_gloss(), "have");
//! assert_eq!(triple.object_gloss(), "tails");
//! assert_eq!(triple.confidence, 1.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::DepGraph;
use crate::span::Span;
use crate::token::Token;

/// A (subject, relation, object) extraction.
///
/// Constructed once by the extraction assembler and immutable afterward.
/// Triples produced by the verb and clausal-modifier paths carry the
/// normalized graph they were segmented from; nominal-bridge triples carry
/// none.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triple {
    /// The subject phrase.
    pub subject: Span,

    /// The relation tokens, in assembly order; may include synthesized
    /// tokens and need not be index-contiguous.
    pub relation: Vec<Token>,

    /// The object phrase.
    pub object: Span,

    /// Confidence in `[0, 1]`; defaults to `1.0`.
    pub confidence: f64,

    /// The normalized graph this triple was segmented from, when available.
    source: Option<DepGraph>,
}

impl Triple {
    /// Create a triple with the default confidence of `1.0`.
    pub fn new(subject: Span, relation: Vec<Token>, object: Span) -> Self {
        Triple {
            subject,
            relation,
            object,
            confidence: 1.0,
            source: None,
        }
    }

    /// Set the confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Attach the graph this triple was segmented from.
    pub fn with_source(mut self, source: DepGraph) -> Self {
        self.source = Some(source);
        self
    }

    /// The graph this triple was segmented from, when one was attached.
    pub fn source(&self) -> Option<&DepGraph> {
        self.source.as_ref()
    }

    /// The subject text, words joined by single spaces.
    pub fn subject_gloss(&self) -> String {
        self.subject.gloss()
    }

    /// The relation text, words joined by single spaces.
    pub fn relation_gloss(&self) -> String {
        let words: Vec<&str> = self.relation.iter().map(|t| t.text.as_str()).collect();
        words.join(" ")
    }

    /// The object text, words joined by single spaces.
    pub fn object_gloss(&self) -> String {
        self.object.gloss()
    }

    /// All tokens of the triple: subject, then relation, then object.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.subject
            .tokens()
            .iter()
            .chain(self.relation.iter())
            .chain(self.object.tokens().iter())
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3}\t{}\t{}\t{}",
            self.confidence,
            self.subject_gloss(),
            self.relation_gloss(),
            self.object_gloss()
        )
    }
}
