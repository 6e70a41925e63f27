//! Search pattern built from the selected text

use regex::{Regex, RegexBuilder};

use crate::error::{HighlightError, Result};

/// How a pattern is matched against the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchMode {
    /// Report every occurrence, not only the first
    pub global: bool,
    pub case_sensitive: bool,
}

/// A literal search pattern
///
/// Every character with special meaning to the regex engine is escaped,
/// so the pattern only ever matches the exact selected text.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    /// The selected text as-is
    literal: String,
    /// Compiled escaped pattern
    regex: Regex,
}

impl SearchPattern {
    /// Build a pattern matching `selected` literally.
    ///
    /// An empty selection yields `HighlightError::EmptySelection`; callers
    /// treat that as "nothing to highlight".
    pub fn literal(selected: &str) -> Result<Self> {
        Self::literal_with_limit(selected, None)
    }

    /// Like [`SearchPattern::literal`], with a cap in bytes on the
    /// compiled pattern (None keeps the regex crate's default).
    ///
    /// A selection too large for the cap yields `HighlightError::Pattern`.
    pub fn literal_with_limit(selected: &str, size_limit: Option<usize>) -> Result<Self> {
        if selected.is_empty() {
            return Err(HighlightError::EmptySelection);
        }

        let mode = Self::mode();
        let mut builder = RegexBuilder::new(&regex::escape(selected));
        builder.case_insensitive(!mode.case_sensitive);
        if let Some(limit) = size_limit {
            builder.size_limit(limit);
        }
        let regex = builder.build()?;

        Ok(Self {
            literal: selected.to_string(),
            regex,
        })
    }

    /// Matching mode shared by all selection patterns
    pub fn mode() -> MatchMode {
        MatchMode {
            global: true,
            case_sensitive: true,
        }
    }

    /// The selected text
    pub fn text(&self) -> &str {
        &self.literal
    }

    /// The escaped pattern source
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}
