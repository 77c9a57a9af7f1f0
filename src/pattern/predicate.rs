//! Attribute predicates for pattern matching.
//!
//! A [`TokenPred`] tests the annotations of a single token (surface text,
//! lemma, part-of-speech tag, named-entity tag); an [`EdgePred`] tests the
//! label of a single graph edge. Both come in literal and regex forms, and
//! regexes are implicitly anchored so that `N.*` means "a tag that *is*
//! `N`-something", never "a tag that contains one".
//!
//! # Examples
//!
//! ```
//! use trine::pattern::predicate::TokenPred;
//! use trine::token::Token;
//!
//! let noun = TokenPred::any().with_tag_regex("N.*").unwrap();
//! assert!(noun.matches(&Token::new("cats", 1).with_tag("NNS")));
//! assert!(!noun.matches(&Token::new("ran", 2).with_tag("VBD")));
//! ```

use regex::Regex;

use crate::error::Result;
use crate::graph::EdgeLabel;
use crate::token::Token;

/// A single attribute test: exact text or an anchored regular expression.
#[derive(Clone, Debug)]
enum Matcher {
    Literal(String),
    Pattern(Regex),
}

impl Matcher {
    fn literal<S: Into<String>>(value: S) -> Self {
        Matcher::Literal(value.into())
    }

    /// Compile `pattern` anchored at both ends.
    fn regex(pattern: &str) -> Result<Self> {
        let anchored = format!("^(?:{pattern})$");
        Ok(Matcher::Pattern(Regex::new(&anchored)?))
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Matcher::Literal(text) => text == value,
            Matcher::Pattern(regex) => regex.is_match(value),
        }
    }
}

/// A predicate over a token's annotations.
///
/// Unset attributes are unconstrained; [`TokenPred::any`] matches every
/// token. The named-entity tag can additionally be constrained negatively
/// with [`TokenPred::without_ner_regex`], which is how a pattern asks for
/// "a noun that is *not* part of a named entity".
#[derive(Clone, Debug, Default)]
pub struct TokenPred {
    text: Option<Matcher>,
    lemma: Option<Matcher>,
    tag: Option<Matcher>,
    ner: Option<Matcher>,
    ner_not: Option<Matcher>,
}

impl TokenPred {
    /// A predicate with no constraints; matches any token.
    pub fn any() -> Self {
        TokenPred::default()
    }

    /// Require the surface text to equal `text`.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(Matcher::literal(text));
        self
    }

    /// Require the surface text to match the anchored `pattern`.
    pub fn with_text_regex(mut self, pattern: &str) -> Result<Self> {
        self.text = Some(Matcher::regex(pattern)?);
        Ok(self)
    }

    /// Require the lemma to equal `lemma`.
    pub fn with_lemma<S: Into<String>>(mut self, lemma: S) -> Self {
        self.lemma = Some(Matcher::literal(lemma));
        self
    }

    /// Require the part-of-speech tag to equal `tag`.
    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = Some(Matcher::literal(tag));
        self
    }

    /// Require the part-of-speech tag to match the anchored `pattern`.
    pub fn with_tag_regex(mut self, pattern: &str) -> Result<Self> {
        self.tag = Some(Matcher::regex(pattern)?);
        Ok(self)
    }

    /// Require the named-entity tag to equal `ner`.
    pub fn with_ner<S: Into<String>>(mut self, ner: S) -> Self {
        self.ner = Some(Matcher::literal(ner));
        self
    }

    /// Require the named-entity tag to match the anchored `pattern`.
    pub fn with_ner_regex(mut self, pattern: &str) -> Result<Self> {
        self.ner = Some(Matcher::regex(pattern)?);
        Ok(self)
    }

    /// Require the named-entity tag *not* to match the anchored `pattern`.
    pub fn without_ner_regex(mut self, pattern: &str) -> Result<Self> {
        self.ner_not = Some(Matcher::regex(pattern)?);
        Ok(self)
    }

    /// Test the predicate against a token.
    pub fn matches(&self, token: &Token) -> bool {
        self.text.as_ref().is_none_or(|m| m.matches(&token.text))
            && self.lemma.as_ref().is_none_or(|m| m.matches(&token.lemma))
            && self.tag.as_ref().is_none_or(|m| m.matches(&token.tag))
            && self.ner.as_ref().is_none_or(|m| m.matches(&token.ner))
            && self.ner_not.as_ref().is_none_or(|m| !m.matches(&token.ner))
    }
}

/// A predicate over a full edge label.
///
/// The label text compared is the full form (`nmod:poss`), never just the
/// short name, so `EdgePred::exact("nmod")` does not match `nmod:poss`.
#[derive(Clone, Debug)]
pub struct EdgePred {
    matcher: Matcher,
}

impl EdgePred {
    /// Require the full label text to equal `label`.
    pub fn exact<S: Into<String>>(label: S) -> Self {
        EdgePred {
            matcher: Matcher::literal(label),
        }
    }

    /// Require the full label text to match the anchored `pattern`.
    pub fn regex(pattern: &str) -> Result<Self> {
        Ok(EdgePred {
            matcher: Matcher::regex(pattern)?,
        })
    }

    /// Test the predicate against an edge label.
    pub fn matches(&self, label: &EdgeLabel) -> bool {
        self.matcher.matches(label.as_str())
    }
}
