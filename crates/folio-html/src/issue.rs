//! Parse issues.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "Parse errors are only errors with the content." Neither stage ever
//! stops on one; they are collected so callers can tell a clean parse from
//! a recovered one.

use strum_macros::Display;

/// Which stage recorded an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ParseStage {
    /// The tokenizer; `position` is a code point offset into the input.
    Tokenizer,
    /// The tree builder; `position` is an index into the token stream.
    TreeBuilder,
}

impl ParseStage {
    /// The `log` target the stage reports under.
    #[must_use]
    pub const fn log_target(self) -> &'static str {
        match self {
            Self::Tokenizer => "folio::html::tokenizer",
            Self::TreeBuilder => "folio::html::parser",
        }
    }
}

/// A recoverable parse error or warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Stage that recorded the issue.
    pub stage: ParseStage,
    /// Error code from § 13.2.2, or a short description.
    pub message: String,
    /// Where the issue was found, interpreted per [`ParseStage`].
    pub position: usize,
}

impl ParseIssue {
    /// True for issues raised while tokenizing.
    #[must_use]
    pub const fn is_tokenizer_issue(&self) -> bool {
        matches!(self.stage, ParseStage::Tokenizer)
    }
}
