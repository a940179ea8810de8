//! Core record types and validation for parsed evaluation reports.
//!
//! This crate defines the foundational types for modeling the structured
//! result of parsing one free-form, LLM-generated evaluation text:
//!
//! - [`ParsedEvaluation`] — top-level record (summary, score, categories,
//!   list sections, passthrough metadata).
//! - [`ScoreSummary`] — overall score with a division-safe percentage.
//! - [`CategoryScore`] — one scored sub-dimension.
//! - [`PriorityItem`] / [`PriorityLevel`] — triage-labeled action items.
//!
//! Validation ([`validate_record`]) catches structural errors such as blank
//! list items and score/percentage inconsistencies in records that did not
//! come from the parser itself.
//!
//! # Example
//!
//! ```
//! use eval_report_core::*;
//!
//! let mut record = ParsedEvaluation::new("eval-1", "2024-05-01T10:00:00Z");
//! record.summary = "Strukturierte Anamnese mit kleinen Lücken.".to_string();
//! record.score = ScoreSummary::from_totals(45, 60);
//! record.categories.push(CategoryScore::new("Kommunikation", 15, 20));
//! record
//!     .priorities
//!     .push(PriorityItem::new(PriorityLevel::Urgent, "EKG-Befundung üben"));
//!
//! assert_eq!(record.score.percentage, 75);
//! assert!(record.find_category("kommunikation").is_some());
//! assert!(validate_record(&record).is_empty());
//! ```

mod types;
mod validate;

pub use types::*;
pub use validate::{PERCENTAGE_DRIFT_TOLERANCE, ValidationError, validate_record};
