//! Degradation warnings.
//!
//! Parsing never fails, it degrades. Every degradation is reported here so
//! the host can see why a pasted fragment lost fidelity. Messages are
//! deduplicated so a page full of the same malformed markup logs once.
//!
//! A [`Warnings`] set belongs to one parse. Two parses never share one, so
//! one caller reloading cannot hide or repeat another caller's warnings.

use std::collections::HashSet;

/// The warnings reported during one parse, each unique message once.
#[derive(Debug, Default, Clone)]
pub struct Warnings {
    reported: HashSet<(String, String)>,
}

impl Warnings {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Warn about a degradation, logging it the first time it is seen.
    ///
    /// The component becomes the `log` target, so hosts can filter with
    /// e.g. `RUST_LOG=folio::document=warn`. Returns true if this report
    /// was the first of its kind.
    ///
    /// # Example
    /// ```
    /// use folio_common::warning::Warnings;
    ///
    /// let mut warnings = Warnings::new();
    /// assert!(warnings.warn("folio::document", "img without src skipped"));
    /// assert!(!warnings.warn("folio::document", "img without src skipped"));
    /// ```
    pub fn warn(&mut self, component: &str, message: &str) -> bool {
        let first = self
            .reported
            .insert((component.to_string(), message.to_string()));
        if first {
            log::warn!(target: component, "{message}");
        }
        first
    }

    /// Returns true if `message` was already reported for `component`.
    #[must_use]
    pub fn was_warned(&self, component: &str, message: &str) -> bool {
        self.reported
            .iter()
            .any(|(c, m)| c == component && m == message)
    }

    /// Number of distinct warnings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reported.len()
    }

    /// True if nothing degraded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }
}
