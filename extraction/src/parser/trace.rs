//! Structured parse diagnostics.
//!
//! The ad-hoc scripts this parser consolidates debugged by printing every
//! intermediate match to the console. Here the same information is
//! returned as data from the with-trace entry point, keeping the core
//! parse silent and pure.

use serde::{Deserialize, Serialize};

pub use super::sections::SectionId;

/// Which source produced the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// An explicit `<value>/<max>` pair after a score heading.
    Explicit,
    /// Totals summed from extracted category rows.
    CategorySum,
    /// Neither found; the record carries the ungraded sentinel.
    #[default]
    Ungraded,
}

/// One located section heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMatch {
    /// Which logical section matched.
    pub section: SectionId,
    /// The synonym-table entry that matched, in canonical spelling.
    pub synonym: String,
    /// Zero-based line index of the heading in the normalized text.
    pub heading_line: usize,
}

/// Diagnostics for a single parse run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseTrace {
    /// Headings that were located, in synonym-table order.
    pub sections: Vec<SectionMatch>,
    /// Sections whose synonyms matched nothing.
    pub unmatched_sections: Vec<SectionId>,
    /// Which source produced the overall score.
    pub score_source: ScoreSource,
    /// Number of extracted category rows.
    pub category_rows: usize,
    /// Number of extracted priority items.
    pub priority_rows: usize,
}

impl ParseTrace {
    /// The match entry for a section, if its heading was located.
    pub fn section(&self, id: SectionId) -> Option<&SectionMatch> {
        self.sections.iter().find(|entry| entry.section == id)
    }

    /// Whether a section heading was located.
    pub fn found(&self, id: SectionId) -> bool {
        self.section(id).is_some()
    }
}
