//! Error types for page operations and configuration loading.

use thiserror::Error;

/// Errors a [`Page`](crate::Page) implementation can report.
///
/// None of these are fatal: callers log them and fall back to treating the
/// affected lines as ordinary code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PageError {
    /// The underlying document rejected an operation.
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// The reference node has no parent to insert into.
    #[error("reference element has no parent")]
    MissingParent,

    /// The element is no longer part of the document.
    #[error("element is detached from the document")]
    Detached,
}

impl From<&str> for PageError {
    fn from(s: &str) -> Self {
        PageError::Dom(s.to_string())
    }
}

impl From<String> for PageError {
    fn from(s: String) -> Self {
        PageError::Dom(s)
    }
}

/// Errors from parsing an [`ExtensionConfig`](crate::ExtensionConfig).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration was not valid JSON for the expected shape.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A selector or class name was left empty.
    #[error("configuration field `{0}` must not be empty")]
    Empty(&'static str),
}
