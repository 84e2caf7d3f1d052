//! Parse and serialize options, and the editor configuration that bundles them.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::ConfigError;

/// Default recursion limit for the document walk.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// How the parser reads HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseOptions {
    /// Decode `**bold**`, `*italic*`, `` `code` `` and `[text](href)` typed
    /// into text nodes as formatting.
    pub recognize_markers: bool,
    /// Subtrees nested deeper than this are read as one paragraph of text.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            recognize_markers: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// How headings are written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HeadingOutput {
    /// As `<p>`: one visual style for every heading.
    #[default]
    Collapse,
    /// As `<h1>`..`<h6>` with the parsed level.
    Preserve,
}

/// How inline formatting is written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InlineOutput {
    /// `<strong>`, `<em>`, `<code>` and `<a href>` elements.
    #[default]
    Html,
    /// Literal `**bold**`, `*italic*`, `` `code` `` and `[text](href)` text.
    Markers,
}

/// How lists, quotes and code are written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BlockOutput {
    /// Paragraph lines with typed markers: `• ` and `1. ` list items,
    /// `> ` quotes, backtick code.
    #[default]
    Textual,
    /// `<li>`, `<blockquote>` and `<pre><code>`.
    Semantic,
}

/// How the serializer writes HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializeOptions {
    /// Heading output.
    pub headings: HeadingOutput,
    /// Inline formatting output.
    pub inline: InlineOutput,
    /// List, quote and code output.
    pub blocks: BlockOutput,
}

impl SerializeOptions {
    /// Output that reproduces every distinction the model makes.
    #[must_use]
    pub const fn semantic() -> Self {
        Self {
            headings: HeadingOutput::Preserve,
            inline: InlineOutput::Html,
            blocks: BlockOutput::Semantic,
        }
    }
}

/// Everything a host can configure for an editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Parser options.
    pub parse: ParseOptions,
    /// Serializer options.
    pub serialize: SerializeOptions,
}

impl EditorConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON, unknown fields or
    /// unknown enum values, and [`ConfigError::InvalidMaxDepth`] when
    /// `parse.max_depth` is zero.
    ///
    /// # Example
    /// ```
    /// use folio_document::{EditorConfig, HeadingOutput};
    ///
    /// let config = EditorConfig::from_json(r#"{"serialize": {"headings": "preserve"}}"#).unwrap();
    /// assert_eq!(config.serialize.headings, HeadingOutput::Preserve);
    /// assert_eq!(config.parse.max_depth, 256);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.parse.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth(config.parse.max_depth));
        }
        Ok(config)
    }
}
