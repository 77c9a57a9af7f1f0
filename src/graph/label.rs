//! Grammatical relation labels.
//!
//! A dependency edge carries an [`EdgeLabel`]: a short relation name such as
//! `nmod`, optionally qualified by a colon-separated specific such as
//! `nmod:poss` or `nmod:in`. The qualifier is where prepositional semantics
//! live after normalization collapses case-marker tokens into the edge.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A grammatical relation label, e.g. `nsubj`, `nmod:poss`, `acl:relcl`.
///
/// The label splits into a short name and an optional specific qualifier at
/// the first colon. Whitelist membership is checked against the full label,
/// the collapsed form `short:*`, and the bare short name, in that order; this
/// is what lets an arc set admit `nmod:poss` without admitting every `nmod:*`
/// relation, or admit all of them with a single wildcard entry.
///
/// # Examples
///
/// ```
/// use trine::graph::EdgeLabel;
///
/// let label = EdgeLabel::new("nmod:poss");
/// assert_eq!(label.short(), "nmod");
/// assert_eq!(label.specific(), Some("poss"));
/// assert_eq!(label.as_str(), "nmod:poss");
///
/// let bare = EdgeLabel::new("nsubj");
/// assert_eq!(bare.short(), "nsubj");
/// assert_eq!(bare.specific(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EdgeLabel {
    label: String,
    colon: Option<usize>,
}

impl EdgeLabel {
    /// Create a label from its text form, splitting at the first colon.
    pub fn new<S: Into<String>>(label: S) -> Self {
        let label = label.into();
        let colon = label.find(':');
        EdgeLabel { label, colon }
    }

    /// The full label text, e.g. `nmod:poss`.
    pub fn as_str(&self) -> &str {
        &self.label
    }

    /// The short relation name, e.g. `nmod` for `nmod:poss`.
    pub fn short(&self) -> &str {
        match self.colon {
            Some(i) => &self.label[..i],
            None => &self.label,
        }
    }

    /// The colon qualifier, e.g. `poss` for `nmod:poss`, if present.
    pub fn specific(&self) -> Option<&str> {
        self.colon.map(|i| &self.label[i + 1..])
    }

    /// Check whether this label passes an arc whitelist.
    ///
    /// The set admits a label by its full text (`nmod:poss`), by the
    /// collapsed wildcard of a qualified label (`nmod:*`), or by its bare
    /// short name (`nmod`).
    pub fn permitted_by(&self, arcs: &AHashSet<&'static str>) -> bool {
        if arcs.contains(self.label.as_str()) || arcs.contains(self.short()) {
            return true;
        }
        match self.colon {
            Some(_) => arcs.contains(format!("{}:*", self.short()).as_str()),
            None => false,
        }
    }
}

impl From<String> for EdgeLabel {
    fn from(label: String) -> Self {
        EdgeLabel::new(label)
    }
}

impl From<&str> for EdgeLabel {
    fn from(label: &str) -> Self {
        EdgeLabel::new(label)
    }
}

impl From<EdgeLabel> for String {
    fn from(label: EdgeLabel) -> Self {
        label.label
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
