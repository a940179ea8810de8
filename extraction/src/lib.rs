//! Offline extraction of structured records from free-form evaluation texts.
//!
//! This crate parses unstructured, LLM-generated exam feedback (German
//! text, several inconsistent heading vocabularies) into a
//! [`ParsedEvaluation`] record via layered pattern matching. It tolerates
//! missing and renamed sections, bold markup, emoji-prefixed headings, and
//! mojibake: anything it cannot match degrades to the field's documented
//! default rather than failing.
//!
//! # Main entry points
//!
//! - [`parse_evaluation`] — parse a raw text into a record.
//! - [`parse_evaluation_with_trace`] — same, plus structured diagnostics
//!   (which synonym matched per section, which score source won) and
//!   data-quality warnings.
//!
//! # Example
//!
//! ```
//! use eval_report_extraction::parse_evaluation;
//!
//! let text = "\
//! ZUSAMMENFASSUNG:
//! Strukturierte Anamnese, kleine Lücken.
//!
//! GESAMTPUNKTZAHL: 45/60
//!
//! STÄRKEN:
//! - Offene Fragen zu Beginn
//! ";
//!
//! let record = parse_evaluation(text, "eval-1", "2024-05-01T10:00:00Z");
//! assert_eq!(record.score.value, 45);
//! assert_eq!(record.score.percentage, 75);
//! assert_eq!(record.strengths, vec!["Offene Fragen zu Beginn"]);
//! ```
//!
//! # Purity
//!
//! Parsing is synchronous, allocation-only, and deterministic: identical
//! input always yields an identical record, and nothing outside local
//! state is touched. The only side channel is `tracing` debug events,
//! silent unless a subscriber enables them.
//!
//! [`ParsedEvaluation`]: eval_report_core::ParsedEvaluation

pub mod output;
pub mod parser;

use serde::Serialize;

use eval_report_core::ParsedEvaluation;
use parser::EvaluationParser;
use parser::trace::ParseTrace;

/// Parses a raw evaluation text into a fully-populated record.
///
/// `id` and `timestamp` are opaque passthroughs copied into the result.
/// Never fails; see the crate docs for the degradation contract.
pub fn parse_evaluation(raw_text: &str, id: &str, timestamp: &str) -> ParsedEvaluation {
    let mut parser = EvaluationParser::new(raw_text);
    parser.parse(id, timestamp)
}

/// A parse result bundled with its diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ParseRun {
    /// The assembled record.
    pub record: ParsedEvaluation,
    /// Structured diagnostics: located sections, score source, row counts.
    pub trace: ParseTrace,
    /// Human-readable data-quality notes.
    pub warnings: Vec<String>,
}

/// Like [`parse_evaluation`], but returns diagnostics alongside the record.
///
/// # Examples
///
/// ```
/// use eval_report_extraction::parse_evaluation_with_trace;
/// use eval_report_extraction::parser::trace::ScoreSource;
///
/// let run = parse_evaluation_with_trace("nur Freitext", "id", "ts");
/// assert_eq!(run.trace.score_source, ScoreSource::Ungraded);
/// assert!(run.record.is_ungraded());
/// ```
pub fn parse_evaluation_with_trace(raw_text: &str, id: &str, timestamp: &str) -> ParseRun {
    let mut parser = EvaluationParser::new(raw_text);
    let record = parser.parse(id, timestamp);
    ParseRun {
        record,
        trace: parser.trace().clone(),
        warnings: parser.warnings().to_vec(),
    }
}
