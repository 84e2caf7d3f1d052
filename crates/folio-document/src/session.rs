//! An editing session: load stored HTML, apply edits, hand back HTML.
//!
//! The session re-derives the HTML after every edit and keeps it as
//! pending output until the host takes it. Coalescing rapid edits into one
//! save (debouncing) is left to the host: calling [`Session::take_pending`]
//! after an idle window yields only the latest HTML.

use folio_common::warning::Warnings;

use crate::document::Document;
use crate::options::EditorConfig;
use crate::parser::parse_into;
use crate::serializer::serialize_with;

/// A document being edited, with its current HTML.
#[derive(Debug, Clone)]
pub struct Session {
    config: EditorConfig,
    document: Document,
    html: String,
    pending: Option<String>,
    warnings: Warnings,
}

impl Session {
    /// Start a session on stored `html`.
    ///
    /// Nothing is pending right after loading, even if the HTML was
    /// normalized on the way in.
    #[must_use]
    pub fn load(html: &str, config: EditorConfig) -> Self {
        let mut session = Self {
            config,
            document: Document::new(),
            html: String::new(),
            pending: None,
            warnings: Warnings::new(),
        };
        session.reload(html);
        session
    }

    /// Replace the whole document with a fresh parse of `html`.
    ///
    /// The previous tree is discarded along with any pending output and
    /// the previous parse's warnings.
    pub fn reload(&mut self, html: &str) {
        let mut document = Document::new();
        self.warnings = parse_into(html, &self.config.parse, &mut document);
        self.html = serialize_with(&document, &self.config.serialize);
        self.document = document;
        self.pending = None;
    }

    /// The current document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// The HTML for the current document.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// What degraded while loading the current HTML.
    #[must_use]
    pub const fn warnings(&self) -> &Warnings {
        &self.warnings
    }

    /// The session's configuration.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Apply an edit and re-derive the HTML.
    ///
    /// If the HTML changed it becomes pending, replacing any HTML that was
    /// pending before. Returns whatever `edit` returns.
    pub fn edit<F, R>(&mut self, edit: F) -> R
    where
        F: FnOnce(&mut Document) -> R,
    {
        let result = edit(&mut self.document);
        let html = serialize_with(&self.document, &self.config.serialize);
        if html != self.html {
            log::trace!(target: "folio::session", "document changed, {} bytes pending", html.len());
            self.html.clone_from(&html);
            self.pending = Some(html);
        }
        result
    }

    /// True if there is HTML the host has not taken yet.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the HTML produced by the latest change, at most once per change.
    pub fn take_pending(&mut self) -> Option<String> {
        self.pending.take()
    }

    /// End the session and keep the document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}
