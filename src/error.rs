//! Error types for the Trine library.
//!
//! All fallible operations in Trine return [`Result`], carrying a
//! [`TrineError`]. Errors are reserved for malformed caller input, such as
//! an invalid regular expression inside a custom predicate or a reference
//! to a node index that does not exist in a graph. An extraction that finds
//! nothing is not an error; those paths return `Option::None` or an empty
//! vector instead.
//!
//! # Examples
//!
//! ```
//! use trine::error::{Result, TrineError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TrineError::pattern("unbalanced capture group"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for Trine operations.
///
/// Uses the `thiserror` crate for the `Error` trait implementation and
/// provides constructor methods for the common cases.
#[derive(Error, Debug)]
pub enum TrineError {
    /// Pattern construction errors (bad regex, malformed predicate).
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Graph construction or traversal errors (unknown node, missing root).
    #[error("Graph error: {0}")]
    Graph(String),

    /// Regular expression compilation errors from user-supplied predicates.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for operations that may fail with [`TrineError`].
pub type Result<T> = std::result::Result<T, TrineError>;

impl TrineError {
    /// Create a new pattern error.
    pub fn pattern<S: Into<String>>(msg: S) -> Self {
        TrineError::Pattern(msg.into())
    }

    /// Create a new graph error.
    pub fn graph<S: Into<String>>(msg: S) -> Self {
        TrineError::Graph(msg.into())
    }
}
