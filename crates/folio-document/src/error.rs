//! Errors for the fallible edges: configuration, tree interchange, and
//! positional edits. Parsing and serializing never fail.

use thiserror::Error;

/// A document edit or interchange that could not be applied.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A positional edit pointed past the end of the document.
    #[error("block index {index} out of range for document of {len} blocks")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The document length at the time.
        len: usize,
    },

    /// A heading level outside `1..=6`.
    #[error("heading level {0} is outside 1..=6")]
    InvalidHeadingLevel(u8),

    /// The JSON form of a document could not be read or written.
    #[error("document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Editor configuration that could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON for [`crate::EditorConfig`].
    #[error("invalid editor config: {0}")]
    Json(#[from] serde_json::Error),

    /// `max_depth` must allow at least one level of nesting.
    #[error("max_depth must be at least 1, got {0}")]
    InvalidMaxDepth(usize),
}
