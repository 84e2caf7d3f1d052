//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! State transitions, input lookahead, token emission, the raw text end tag
//! helpers, and parse error reporting.

use super::core::{HtmlTokenizer, TokenizerState};
use super::token::Token;
use crate::issue::{ParseIssue, ParseStage};

/// Log target for everything the tokenizer reports.
pub(super) const LOG_TARGET: &str = ParseStage::Tokenizer.log_target();

/// [§ 13.2.6.2](https://html.spec.whatwg.org/multipage/parsing.html#generic-rcdata-element-parsing-algorithm)
/// Elements whose content is text with character references decoded.
const RCDATA_ELEMENTS: &[&str] = &["title", "textarea"];

/// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
/// Elements whose content is taken verbatim up to the matching end tag.
///
/// `script` and `noscript` are folded in here: their content is dropped
/// downstream, so the script data escape states would buy nothing.
const RAWTEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "noscript",
];

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HtmlTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The current character is processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// "Reconsume in the return state"
    ///
    /// A missing return state can only come from a tokenizer bug; falling
    /// back to the data state keeps the run total.
    pub(super) fn reconsume_in_return_state(&mut self) {
        let state = self.return_state.take().unwrap_or(TokenizerState::Data);
        self.reconsume_in(state);
    }

    /// "Switch to the return state"
    pub(super) fn switch_to_return_state(&mut self) {
        let state = self.return_state.take().unwrap_or(TokenizerState::Data);
        self.switch_to(state);
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HtmlTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns None once the end of input is reached.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.pos).copied();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Undo the last consume so lookahead states can inspect the input
    /// starting at the current input character.
    pub(super) const fn step_back(&mut self) {
        if self.current_input_character.is_some() && self.pos > 0 {
            self.pos -= 1;
        }
    }

    /// Peek at the code point `offset` characters past the current position.
    #[must_use]
    pub fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    /// "If the next few characters are..."
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        target
            .chars()
            .enumerate()
            .all(|(i, expected)| self.peek_codepoint(i) == Some(expected))
    }

    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        target.chars().enumerate().all(|(i, expected)| {
            self.peek_codepoint(i)
                .is_some_and(|c| c.eq_ignore_ascii_case(&expected))
        })
    }

    /// Consume `target`. Callers check the lookahead first.
    pub(super) fn consume_string(&mut self, target: &str) {
        self.pos = (self.pos + target.chars().count()).min(self.input.len());
    }

    /// [§ 4.6 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// The tokenizer's subset: CR never reaches it after preprocessing.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HtmlTokenizer {
    /// "Emit the current token"
    ///
    /// Start tags for raw text elements also switch the tokenizer into the
    /// raw text state: the tree builder runs after tokenization, so the
    /// switch it would normally request happens here.
    pub(super) fn emit_token(&mut self) {
        let Some(token) = self.current_token.take() else {
            return;
        };
        if let Token::StartTag { ref name, .. } = token {
            self.last_start_tag_name = Some(name.clone());
            if RCDATA_ELEMENTS.contains(&name.as_str()) {
                self.raw_text_decodes_references = true;
                self.switch_to(TokenizerState::RawText);
            } else if RAWTEXT_ELEMENTS.contains(&name.as_str()) {
                self.raw_text_decodes_references = false;
                self.switch_to(TokenizerState::RawText);
            }
        }
        self.push_token(token);
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.push_token(Token::new_character(c));
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.push_token(Token::EndOfFile);
        self.at_eof = true;
    }

    /// Emit the current token, then the end-of-file token.
    pub(super) fn emit_token_then_eof(&mut self) {
        self.emit_token();
        self.emit_eof_token();
    }

    fn push_token(&mut self, mut token: Token) {
        if token.drop_duplicate_attribute() {
            self.parse_error("duplicate-attribute");
        }
        log::trace!(target: LOG_TARGET, "{token}");
        self.token_stream.push(token);
    }
}

// =============================================================================
// Raw Text Helpers
// =============================================================================

impl HtmlTokenizer {
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        matches!(
            (&self.last_start_tag_name, &self.current_token),
            (Some(last), Some(Token::EndTag { name })) if name == last
        )
    }

    /// "Anything else":
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer... Reconsume in the RAWTEXT state."
    pub(super) fn emit_raw_text_end_tag_name_anything_else(&mut self) {
        self.emit_character_token('<');
        self.emit_character_token('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        for c in buffer.chars() {
            self.emit_character_token(c);
        }
        self.current_token = None;
        self.reconsume_in(TokenizerState::RawText);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HtmlTokenizer {
    /// "Start a new attribute in the current tag token."
    ///
    /// The attribute being left is complete at this point, so this is where
    /// the duplicate-attribute check runs; the last attribute is checked on
    /// emission.
    pub(super) fn start_new_attribute(&mut self) {
        let duplicate = self
            .current_token
            .as_mut()
            .is_some_and(Token::drop_duplicate_attribute);
        if duplicate {
            self.parse_error("duplicate-attribute");
        }
        if let Some(token) = self.current_token.as_mut() {
            token.start_new_attribute();
        }
    }

    /// Append to the current attribute's value.
    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_current_attribute_value(c);
        }
    }

    /// Append to the current attribute's name.
    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_current_attribute_name(c);
        }
    }

    /// Append to the current tag token's name.
    pub(super) fn append_to_tag_name(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_tag_name(c);
        }
    }

    /// Append to the current comment or DOCTYPE token's data.
    pub(super) fn append_to_data(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_data(c);
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HtmlTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records the error with the input position. Parse errors are never
    /// fatal; the state machine always has a recovery path.
    pub(super) fn parse_error(&mut self, message: &str) {
        log::debug!(target: LOG_TARGET, "{message} at {}", self.pos);
        self.issues.push(ParseIssue {
            stage: ParseStage::Tokenizer,
            message: message.to_string(),
            position: self.pos,
        });
    }
}
