//! Fragment tree construction.

/// Lenient fragment tree builder.
pub mod builder;

pub use builder::{HtmlParser, VOID_ELEMENTS, format_tree};
