//! Token types for dependency-annotated text.
//!
//! This module defines the core data structures for representing annotated
//! tokens, the units that dependency graphs and extracted triples are built
//! from.
//!
//! # Core Types
//!
//! - [`Token`] - A single annotated token with text, lemma, tags, and position
//! - [`Position`] - A linear position that orders synthesized tokens between
//!   real ones
//! - [`Polarity`] - Monotonicity marking used to veto unsafe extractions
//!
//! # Synthesized Tokens
//!
//! Extraction sometimes has to materialize words that are implied by the
//! graph but absent from the sentence, such as the copula in a nominal
//! phrase or the preposition folded into an `nmod:in` edge label. A
//! synthesized token is given a position *between* two real tokens:
//!
//! ```text
//! Input: "Obama president"        (indices 1 and 2)
//! With copula: "Obama [is] president"
//!
//! Positions:
//!   1+0  "Obama"
//!   1+1  "is"        ← synthesized, sorts after index 1
//!   2+0  "president"
//! ```
//!
//! # Examples
//!
//! Creating an annotated token:
//!
//! ```
//! use trine::token::Token;
//!
//! let token = Token::new("cats", 1).with_lemma("cat").with_tag("NNS");
//! assert_eq!(token.text, "cats");
//! assert_eq!(token.lemma, "cat");
//! assert_eq!(token.position.base, 1);
//! ```
//!
//! Synthesizing a copula next to a real token:
//!
//! ```
//! use trine::token::{Position, Token};
//!
//! let anchor = Token::new("Obama", 1).with_offsets(0, 5);
//! let is = Token::synthesize("is", "VBZ", &anchor, Position::after(1));
//! assert!(is.is_synthetic());
//! assert!(anchor.position < is.position);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A linear position in a sentence.
///
/// Real tokens sit at whole positions (`nudge == 0`); synthesized tokens are
/// nudged just before or just after a real index so that sorting a mixed
/// token list interleaves them correctly. The derived ordering compares
/// `base` first and `nudge` second, so `3−  <  3  <  3+  <  4−`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// The 1-based index of the real token this position is anchored to.
    pub base: u32,

    /// Placement relative to the base index: -1 before, 0 at, +1 after.
    pub nudge: i8,
}

impl Position {
    /// The position of the real token at `index`.
    pub fn at(index: u32) -> Self {
        Position { base: index, nudge: 0 }
    }

    /// A synthetic position just before the real token at `index`.
    pub fn before(index: u32) -> Self {
        Position { base: index, nudge: -1 }
    }

    /// A synthetic position just after the real token at `index`.
    pub fn after(index: u32) -> Self {
        Position { base: index, nudge: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nudge {
            n if n < 0 => write!(f, "{}-", self.base),
            0 => write!(f, "{}", self.base),
            _ => write!(f, "{}+", self.base),
        }
    }
}

/// Monotonicity marking on a token.
///
/// Tokens scoped under a downward-entailing operator ("no", "never", "all"
/// in its restrictor) are marked [`Polarity::Downward`]; extraction refuses
/// to emit nominal triples containing such tokens because the flat triple
/// would drop the operator and assert something the sentence does not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// The default context; extraction is safe.
    #[default]
    Upward,
    /// Scoped under a downward-entailing operator.
    Downward,
}

impl Polarity {
    /// Check whether this is the downward polarity.
    pub fn is_downward(&self) -> bool {
        matches!(self, Polarity::Downward)
    }
}

/// A single annotated token.
///
/// Carries the surface form plus the annotations extraction relies on:
/// lemma, part-of-speech tag, named-entity tag, character offsets into the
/// source text, the index of the containing sentence, and a [`Position`].
///
/// # Examples
///
/// ```
/// use trine::token::{Polarity, Token};
///
/// let token = Token::new("Hawaii", 4)
///     .with_lemma("Hawaii")
///     .with_tag("NNP")
///     .with_ner("LOCATION")
///     .with_offsets(14, 20);
///
/// assert_eq!(token.ner, "LOCATION");
/// assert_eq!(token.polarity, Polarity::Upward);
/// assert!(!token.is_synthetic());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The surface form.
    pub text: String,

    /// The lemma, or empty when the annotation is absent.
    pub lemma: String,

    /// The part-of-speech tag (Penn Treebank style, e.g. `NNP`, `VBZ`).
    pub tag: String,

    /// The named-entity tag, `"O"` when the token names no entity.
    pub ner: String,

    /// Linear position; real tokens are 1-based with `nudge == 0`.
    pub position: Position,

    /// The byte offset where this token starts in the source text.
    pub start_offset: usize,

    /// The byte offset where this token ends in the source text.
    pub end_offset: usize,

    /// The index of the sentence this token belongs to.
    pub sentence: usize,

    /// Monotonicity marking, [`Polarity::Upward`] unless annotated otherwise.
    pub polarity: Polarity,
}

impl Token {
    /// Create a real token with the given text at the given 1-based index.
    pub fn new<S: Into<String>>(text: S, index: u32) -> Self {
        Token {
            text: text.into(),
            lemma: String::new(),
            tag: String::new(),
            ner: "O".to_string(),
            position: Position::at(index),
            start_offset: 0,
            end_offset: 0,
            sentence: 0,
            polarity: Polarity::Upward,
        }
    }

    /// Create a synthesized token at a nudged position.
    ///
    /// The new token takes its sentence index and character offsets from
    /// `anchor`, so downstream consumers can still map it back to a region
    /// of the source text. Its lemma is the text itself and it names no
    /// entity.
    pub fn synthesize<S: Into<String>>(
        text: S,
        tag: &str,
        anchor: &Token,
        position: Position,
    ) -> Self {
        let text = text.into();
        Token {
            lemma: text.clone(),
            text,
            tag: tag.to_string(),
            ner: "O".to_string(),
            position,
            start_offset: anchor.start_offset,
            end_offset: anchor.end_offset,
            sentence: anchor.sentence,
            polarity: Polarity::Upward,
        }
    }

    /// Set the lemma.
    pub fn with_lemma<S: Into<String>>(mut self, lemma: S) -> Self {
        self.lemma = lemma.into();
        self
    }

    /// Set the part-of-speech tag.
    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the named-entity tag.
    pub fn with_ner<S: Into<String>>(mut self, ner: S) -> Self {
        self.ner = ner.into();
        self
    }

    /// Set the character offsets.
    pub fn with_offsets(mut self, start_offset: usize, end_offset: usize) -> Self {
        self.start_offset = start_offset;
        self.end_offset = end_offset;
        self
    }

    /// Set the sentence index.
    pub fn with_sentence(mut self, sentence: usize) -> Self {
        self.sentence = sentence;
        self
    }

    /// Set the polarity marking.
    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// The 1-based linear index of this token.
    ///
    /// For a synthesized token this is the index of the real token it was
    /// anchored next to.
    pub fn index(&self) -> u32 {
        self.position.base
    }

    /// Check whether this token was synthesized rather than read from text.
    pub fn is_synthetic(&self) -> bool {
        self.position.nudge != 0
    }

    /// The lemma, falling back to the surface form when no lemma is set.
    pub fn lemma_or_text(&self) -> &str {
        if self.lemma.is_empty() { &self.text } else { &self.lemma }
    }

    /// Check whether this token names an entity.
    pub fn has_ner(&self) -> bool {
        self.ner != "O"
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
