//! Evaluation-text parser for multiple generator formats.
//!
//! This module implements a multi-stage extractor over free-form,
//! LLM-generated exam feedback. The generator has emitted several
//! inconsistent layouts (plain German keyword headings, emoji-prefixed
//! headings, bold markup, two category-row formats), so every stage is
//! driven by synonym tables rather than one pattern per observed format:
//!
//! - **Section location** — declarative synonym tables per logical section
//! - **Score** — explicit pair, category-sum fallback, ungraded sentinel
//! - **Categories** — numbered and icon-prefixed row formats
//! - **List items** — bullet, en-dash, dot, emoji, and numbered prefixes
//! - **Priorities** — marker glyph plus bilingual label per triage level
//!
//! # Architecture
//!
//! Each extractor runs independently against the same normalized text;
//! none depends on another's success, and any miss degrades to that
//! field's documented default. The primary entry point is
//! [`EvaluationParser::new`] followed by [`EvaluationParser::parse`], but
//! most consumers should use the higher-level
//! [`parse_evaluation`](crate::parse_evaluation) function instead.

mod categories;
mod items;
mod normalize;
mod priorities;
mod score;
mod sections;
pub mod trace;

use tracing::debug;

use eval_report_core::ParsedEvaluation;

use crate::parser::sections::{SECTION_SPECS, SectionId, locate_section};
use crate::parser::trace::{ParseTrace, SectionMatch};

/// Parser for one raw evaluation text.
pub struct EvaluationParser {
    raw_text: String,
    warnings: Vec<String>,
    trace: ParseTrace,
}

impl EvaluationParser {
    /// Creates a new parser for the given raw text.
    pub fn new(raw_text: &str) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            warnings: Vec::new(),
            trace: ParseTrace::default(),
        }
    }

    /// Parses the text into a fully-populated record.
    ///
    /// Never fails: malformed or unrecognizable input yields the documented
    /// defaults for every field. `id` and `timestamp` are copied through
    /// uninterpreted.
    pub fn parse(&mut self, id: &str, timestamp: &str) -> ParsedEvaluation {
        let mut record = ParsedEvaluation::new(id, timestamp);
        let normalized = normalize::normalize_evaluation_text(&self.raw_text);

        if normalized.trim().is_empty() {
            self.warnings.push("Empty evaluation text".to_string());
            self.trace.unmatched_sections = SectionId::ALL.to_vec();
            return record;
        }

        let mut spans: Vec<(SectionId, &str)> = Vec::new();
        for spec in SECTION_SPECS {
            match locate_section(&normalized, spec) {
                Some(slice) => {
                    debug!(section = %spec.id, synonym = slice.synonym, line = slice.heading_line, "Located section heading");
                    self.trace.sections.push(SectionMatch {
                        section: spec.id,
                        synonym: slice.synonym.to_string(),
                        heading_line: slice.heading_line,
                    });
                    spans.push((spec.id, slice.text));
                }
                None => self.trace.unmatched_sections.push(spec.id),
            }
        }
        let span = |id: SectionId| {
            spans
                .iter()
                .find(|(candidate, _)| *candidate == id)
                .map(|(_, text)| *text)
        };

        record.summary = span(SectionId::Summary).unwrap_or_default().to_string();
        record.strengths = items::extract_list_items(span(SectionId::Strengths));
        record.gaps = items::extract_list_items(span(SectionId::Gaps));
        record.next_steps = items::extract_list_items(span(SectionId::NextSteps));
        record.resources = items::extract_list_items(span(SectionId::Resources));

        record.categories = categories::extract_categories(&normalized, &mut self.warnings);
        let (score, score_source) =
            score::extract_score(&normalized, &record.categories, &mut self.warnings);
        record.score = score;
        record.priorities = priorities::extract_priorities(&normalized);

        self.trace.score_source = score_source;
        self.trace.category_rows = record.categories.len();
        self.trace.priority_rows = record.priorities.len();
        debug!(
            score_source = ?score_source,
            categories = record.categories.len(),
            priorities = record.priorities.len(),
            "Assembled evaluation record"
        );

        record
    }

    /// Data-quality notes collected during the last parse.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Structured diagnostics for the last parse.
    pub fn trace(&self) -> &ParseTrace {
        &self.trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eval_report_core::{PriorityLevel, ScoreSummary, validate_record};

    const SAMPLE: &str = "\
📋 **ZUSAMMENFASSUNG:**
Strukturierte Anamnese mit kleinen Lücken bei der Medikamentenanamnese.

**GESAMTPUNKTZAHL: 45/60**

1. Anamnesetechnik: 12/20
2. Fachliche Korrektheit: 15/20
3. Kommunikation: 18/20

✅ **RICHTIG GEMACHT:**
- Offene Fragen zu Beginn
- Schmerzanamnese nach OPQRST

❌ **FEHLENDE ASPEKTE:**
- Familienanamnese nicht erhoben

🎯 **LERNPRIORITÄTEN:**
🔴 DRINGEND: Medikamentenanamnese systematisch üben
🟢 OPTIONAL: Fachbegriffe wiederholen

📚 **NÄCHSTE SCHRITTE:**
1. Leitlinie lesen
2. Zwei Übungsfälle bearbeiten
";

    #[test]
    fn test_full_sample_populates_every_field() {
        let mut parser = EvaluationParser::new(SAMPLE);
        let record = parser.parse("eval-1", "2024-05-01T10:00:00Z");

        assert!(record.summary.starts_with("Strukturierte Anamnese"));
        assert_eq!(record.score, ScoreSummary::from_totals(45, 60));
        assert_eq!(record.categories.len(), 3);
        assert_eq!(record.strengths.len(), 2);
        assert_eq!(record.gaps, vec!["Familienanamnese nicht erhoben"]);
        assert_eq!(record.priorities.len(), 2);
        assert_eq!(record.priorities[0].level, PriorityLevel::Urgent);
        assert_eq!(record.next_steps.len(), 2);
        assert!(record.resources.is_empty());
        assert!(validate_record(&record).is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let mut first = EvaluationParser::new(SAMPLE);
        let mut second = EvaluationParser::new(SAMPLE);
        assert_eq!(
            first.parse("id", "ts"),
            second.parse("id", "ts"),
            "identical input must yield identical records"
        );
    }

    #[test]
    fn test_empty_input_yields_all_defaults() {
        let mut parser = EvaluationParser::new("");
        let record = parser.parse("id", "ts");

        assert_eq!(record.score, ScoreSummary::ungraded());
        assert!(record.summary.is_empty());
        assert!(record.categories.is_empty());
        assert!(record.strengths.is_empty());
        assert!(record.gaps.is_empty());
        assert!(record.priorities.is_empty());
        assert!(record.next_steps.is_empty());
        assert!(record.resources.is_empty());
        assert!(record.is_ungraded());
    }

    #[test]
    fn test_garbage_input_degrades_to_defaults() {
        let mut parser = EvaluationParser::new("lorem ipsum dolor sit amet");
        let record = parser.parse("id", "ts");
        assert!(record.is_ungraded());
        assert_eq!(parser.trace().unmatched_sections.len(), SectionId::ALL.len());
    }

    #[test]
    fn test_trace_reports_matches_and_score_source() {
        let mut parser = EvaluationParser::new(SAMPLE);
        parser.parse("id", "ts");

        let trace = parser.trace();
        assert!(trace.found(SectionId::Summary));
        assert!(trace.found(SectionId::Strengths));
        assert!(!trace.found(SectionId::Resources));
        assert_eq!(trace.score_source, trace::ScoreSource::Explicit);
        assert_eq!(trace.category_rows, 3);
        assert_eq!(trace.priority_rows, 2);
        assert_eq!(
            trace.section(SectionId::Summary).map(|m| m.synonym.as_str()),
            Some("ZUSAMMENFASSUNG")
        );
    }

    #[test]
    fn test_passthrough_fields_copied_verbatim() {
        let mut parser = EvaluationParser::new(SAMPLE);
        let record = parser.parse("abc-123", "irgendwann");
        assert_eq!(record.id, "abc-123");
        assert_eq!(record.timestamp, "irgendwann");
    }
}
