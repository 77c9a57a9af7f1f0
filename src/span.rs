//! Contiguous token spans.
//!
//! A [`Span`] is a run of tokens covering a half-open range of 1-based
//! sentence indices. Spans materialize their tokens because extraction can
//! splice synthesized tokens (prepositions, coordinators, copulas) into a
//! span at nudged positions that exist in no sentence.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// A contiguous, non-empty run of tokens.
///
/// The index range is computed over the base indices of the span's tokens;
/// synthesized tokens nudged next to a real index fall inside the same
/// range. Tokens are kept sorted by position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    tokens: Vec<Token>,
}

impl Span {
    /// Create a span from the given tokens, sorting them by position.
    ///
    /// # Panics
    ///
    /// Panics if `tokens` is empty; extraction never produces empty spans.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        assert!(!tokens.is_empty(), "a span must contain at least one token");
        tokens.sort_by_key(|t| t.position);
        Span { tokens }
    }

    /// Create a span covering `range` of the sentence's 1-based indices.
    ///
    /// `sentence` must be the full, positionally indexed token list, so the
    /// token at linear index `i` sits at `sentence[i - 1]`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty, starts at zero, or reaches past the end
    /// of the sentence.
    pub fn from_sentence(sentence: &[Token], range: Range<u32>) -> Self {
        assert!(range.start >= 1, "sentence indices are 1-based");
        let lo = (range.start - 1) as usize;
        let hi = (range.end - 1) as usize;
        Span::new(sentence[lo..hi].to_vec())
    }

    /// The 1-based index of the first token.
    pub fn start(&self) -> u32 {
        self.tokens[0].position.base
    }

    /// One past the 1-based index of the last token.
    pub fn end(&self) -> u32 {
        self.tokens[self.tokens.len() - 1].position.base + 1
    }

    /// The half-open index range this span covers.
    pub fn range(&self) -> Range<u32> {
        self.start()..self.end()
    }

    /// The tokens of this span, in position order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The number of tokens in this span.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false; spans are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check whether the index ranges of the two spans intersect.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start() < other.end() && other.start() < self.end()
    }

    /// Check whether `index` falls inside this span's range.
    pub fn contains_index(&self, index: u32) -> bool {
        self.start() <= index && index < self.end()
    }

    /// Check whether the two spans contain a token at the same position.
    pub fn shares_token(&self, other: &Span) -> bool {
        self.tokens
            .iter()
            .any(|t| other.tokens.iter().any(|o| o.position == t.position))
    }

    /// The span's text, token words joined by single spaces.
    pub fn gloss(&self) -> String {
        let words: Vec<&str> = self.tokens.iter().map(|t| t.text.as_str()).collect();
        words.join(" ")
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gloss())
    }
}
