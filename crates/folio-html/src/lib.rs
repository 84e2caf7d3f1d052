//! HTML tokenizer and fragment parser for the folio content pipeline.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA/RAWTEXT, tag, and attribute states
//!   - Comment, bogus comment, and DOCTYPE handling
//!   - Named and numeric character references
//!
//! - **Fragment tree builder** (after [WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Stack of open elements with implied end tags for `p`, `li`, headings, and `a`
//!   - Void elements, stray end tags, `</p>` and `</br>` recovery
//!
//! # Not Implemented
//!
//! - Insertion modes, foster parenting, and the adoption agency algorithm
//! - Script data escape states and CDATA sections
//! - Foreign content (SVG/MathML subtrees are kept as plain elements)
//!
//! Both stages are total: any string produces a tree, and every recovery is
//! recorded as a [`ParseIssue`].

/// Parse issues shared by both stages.
pub mod issue;
/// Fragment tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

use folio_common::warning::Warnings;
use folio_dom::DomTree;

pub use issue::{ParseIssue, ParseStage};
pub use parser::{HtmlParser, VOID_ELEMENTS, format_tree};
pub use tokenizer::{Attribute, HtmlTokenizer, Token, TokenizerState};

/// A parsed fragment and everything that was recovered from on the way.
#[derive(Debug, Clone)]
pub struct ParsedFragment {
    /// The fragment's tree, rooted at [`folio_dom::NodeId::ROOT`].
    pub dom: DomTree,
    /// Tokenizer issues first, then tree builder issues.
    pub issues: Vec<ParseIssue>,
}

impl ParsedFragment {
    /// True if the tokenizer had to recover from malformed markup.
    #[must_use]
    pub fn has_tokenizer_issues(&self) -> bool {
        self.issues.iter().any(ParseIssue::is_tokenizer_issue)
    }

    /// Report every issue into `warnings`, under its stage's log target.
    ///
    /// Repeated issues are reported once per set, however often the
    /// markup repeats them.
    pub fn report(&self, warnings: &mut Warnings) {
        for issue in &self.issues {
            let _ = warnings.warn(issue.stage.log_target(), &issue.message);
        }
    }
}

/// Tokenize and build `html` in one call.
///
/// # Example
/// ```
/// let fragment = folio_html::parse_fragment("<p>Pool <b>Hours</b>");
/// assert!(fragment.issues.is_empty());
/// ```
#[must_use]
pub fn parse_fragment(html: &str) -> ParsedFragment {
    let mut tokenizer = HtmlTokenizer::new(html);
    tokenizer.run();
    let (tokens, mut issues) = tokenizer.into_parts();
    let (dom, builder_issues) = HtmlParser::new(tokens).run_with_issues();
    issues.extend(builder_issues);
    ParsedFragment { dom, issues }
}
