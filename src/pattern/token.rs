//! Declarative patterns over flat token sequences.
//!
//! A [`TokenPattern`] matches a window of consecutive tokens against an
//! ordered list of elements, each a [`TokenPred`] with a repetition mode.
//! Repetition is greedy with backtracking, and [`TokenPattern::find_all`]
//! scans left to right yielding non-overlapping matches, so "the leftmost,
//! longest" window wins. Captured groups are positional ranges into the
//! input slice.
//!
//! # Examples
//!
//! Matching "Obama , 28 ," as an entity and a value between commas:
//!
//! ```
//! use trine::pattern::{TokenPattern, TokenPred};
//! use trine::token::Token;
//!
//! let pattern = TokenPattern::new("comma-apposition")
//!     .group("subject", TokenPred::any().with_ner("PERSON"))
//!     .literal(",")
//!     .group("object", TokenPred::any().with_ner("NUMBER"))
//!     .literal(",");
//!
//! let tokens = vec![
//!     Token::new("Obama", 1).with_ner("PERSON"),
//!     Token::new(",", 2),
//!     Token::new("28", 3).with_ner("NUMBER"),
//!     Token::new(",", 4),
//! ];
//!
//! let matches = pattern.find_all(&tokens);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].capture("subject"), Some(0..1));
//! assert_eq!(matches[0].capture("object"), Some(2..3));
//! ```

use std::ops::Range;

use ahash::AHashMap;

use crate::pattern::predicate::TokenPred;
use crate::token::Token;

/// How often one element may repeat.
#[derive(Clone, Copy, Debug)]
enum Repeat {
    One,
    OneOrMore,
    ZeroOrOne,
}

#[derive(Clone, Debug)]
struct Element {
    pred: TokenPred,
    capture: Option<String>,
    repeat: Repeat,
}

/// One successful match of a token pattern.
#[derive(Clone, Debug)]
pub struct TokenMatch {
    range: Range<usize>,
    captures: AHashMap<String, Range<usize>>,
}

impl TokenMatch {
    /// The positional range of the whole match.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The positional range captured under `name`, if that group matched.
    pub fn capture(&self, name: &str) -> Option<Range<usize>> {
        self.captures.get(name).cloned()
    }
}

/// A named, compiled token-sequence pattern.
#[derive(Clone, Debug)]
pub struct TokenPattern {
    name: String,
    elements: Vec<Element>,
}

impl TokenPattern {
    /// Create an empty pattern; chain element builders onto it.
    pub fn new<S: Into<String>>(name: S) -> Self {
        TokenPattern {
            name: name.into(),
            elements: Vec::new(),
        }
    }

    /// The pattern's name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a single uncaptured token with the exact surface text.
    pub fn literal<S: Into<String>>(self, text: S) -> Self {
        self.then(TokenPred::any().with_text(text))
    }

    /// Append a single uncaptured token matching `pred`.
    pub fn then(mut self, pred: TokenPred) -> Self {
        self.elements.push(Element {
            pred,
            capture: None,
            repeat: Repeat::One,
        });
        self
    }

    /// Append an optional uncaptured token matching `pred`.
    pub fn then_optional(mut self, pred: TokenPred) -> Self {
        self.elements.push(Element {
            pred,
            capture: None,
            repeat: Repeat::ZeroOrOne,
        });
        self
    }

    /// Append a captured group of one or more tokens matching `pred`.
    pub fn group<S: Into<String>>(mut self, name: S, pred: TokenPred) -> Self {
        self.elements.push(Element {
            pred,
            capture: Some(name.into()),
            repeat: Repeat::OneOrMore,
        });
        self
    }

    /// Scan the tokens left to right for non-overlapping matches.
    pub fn find_all(&self, tokens: &[Token]) -> Vec<TokenMatch> {
        let mut matches = Vec::new();
        let mut start = 0;
        while start < tokens.len() {
            match self.match_at(tokens, start) {
                Some(found) => {
                    let end = found.range.end;
                    matches.push(found);
                    start = end.max(start + 1);
                }
                None => start += 1,
            }
        }
        matches
    }

    /// Match the whole pattern starting exactly at `start`.
    fn match_at(&self, tokens: &[Token], start: usize) -> Option<TokenMatch> {
        solve(&self.elements, tokens, start, AHashMap::new()).map(|(end, captures)| TokenMatch {
            range: start..end,
            captures,
        })
    }
}

/// Greedy matching with backtracking over the remaining elements.
fn solve(
    elements: &[Element],
    tokens: &[Token],
    pos: usize,
    captures: AHashMap<String, Range<usize>>,
) -> Option<(usize, AHashMap<String, Range<usize>>)> {
    let Some((element, rest)) = elements.split_first() else {
        return Some((pos, captures));
    };
    match element.repeat {
        Repeat::One => {
            if pos < tokens.len() && element.pred.matches(&tokens[pos]) {
                let mut captures = captures;
                if let Some(name) = &element.capture {
                    captures.insert(name.clone(), pos..pos + 1);
                }
                solve(rest, tokens, pos + 1, captures)
            } else {
                None
            }
        }
        Repeat::ZeroOrOne => {
            if pos < tokens.len() && element.pred.matches(&tokens[pos]) {
                let mut taken = captures.clone();
                if let Some(name) = &element.capture {
                    taken.insert(name.clone(), pos..pos + 1);
                }
                if let Some(hit) = solve(rest, tokens, pos + 1, taken) {
                    return Some(hit);
                }
            }
            solve(rest, tokens, pos, captures)
        }
        Repeat::OneOrMore => {
            let mut run = 0;
            while pos + run < tokens.len() && element.pred.matches(&tokens[pos + run]) {
                run += 1;
            }
            // Longest run first; give tokens back one at a time on failure.
            for take in (1..=run).rev() {
                let mut captures = captures.clone();
                if let Some(name) = &element.capture {
                    captures.insert(name.clone(), pos..pos + take);
                }
                if let Some(hit) = solve(rest, tokens, pos + take, captures) {
                    return Some(hit);
                }
            }
            None
        }
    }
}
