//! Common utilities for the folio content pipeline.
//!
//! This crate provides shared infrastructure used by the HTML and document crates:
//! - **Warning System** - per-parse deduplicated degradation warnings routed through `log`
//! - **Text Helpers** - the whitespace classes shared by tokenizer and normalizer

pub mod text;
pub mod warning;
