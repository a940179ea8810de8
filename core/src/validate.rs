//! Record validation.
//!
//! Re-checks the structural invariants of a [`ParsedEvaluation`] — blank
//! list items, score/percentage inconsistencies — catching records that did
//! not come from this parser (hand-edited files, older persisted rows)
//! before they cause downstream issues. Freshly parsed records always pass.
//!
//! # Examples
//!
//! ```
//! use eval_report_core::*;
//!
//! let record = ParsedEvaluation::new("eval-1", "2024-05-01T10:00:00Z");
//! assert!(validate_record(&record).is_empty());
//!
//! // Invalid: whitespace-only strength item
//! let mut bad = ParsedEvaluation::new("eval-2", "2024-05-01T10:00:00Z");
//! bad.strengths.push("   ".to_string());
//! assert!(!validate_record(&bad).is_empty());
//! ```

use thiserror::Error;

use crate::{ParsedEvaluation, rounded_percentage};

/// Tolerated difference between a stored percentage and the one implied by
/// its score/max pair. Source texts round inconsistently; one point of
/// drift is kept verbatim.
pub const PERCENTAGE_DRIFT_TOLERANCE: u32 = 1;

/// Record validation errors.
///
/// Each variant describes a specific structural problem found during
/// validation. The `Display` impl provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A list field contains an empty or whitespace-only item.
    #[error("blank item in {0} list")]
    BlankListItem(&'static str),
    /// A category has an empty or whitespace-only name.
    #[error("category at index {0} has a blank name")]
    BlankCategoryName(usize),
    /// A priority item has an empty or whitespace-only action.
    #[error("priority item at index {0} has a blank action")]
    BlankPriorityAction(usize),
    /// The overall score exceeds its own maximum.
    #[error("score value {value} exceeds max {max}")]
    ScoreExceedsMax { value: u32, max: u32 },
    /// The overall percentage disagrees with the score/max pair.
    #[error("score percentage {stored} disagrees with computed {computed}")]
    ScorePercentageMismatch { stored: u32, computed: u32 },
    /// A category score exceeds its own maximum.
    #[error("category '{name}' score {score} exceeds max {max}")]
    CategoryScoreExceedsMax { name: String, score: u32, max: u32 },
    /// A category percentage drifts beyond tolerance from its score/max pair.
    #[error("category '{name}' percentage {stored} drifts from computed {computed}")]
    CategoryPercentageDrift {
        name: String,
        stored: u32,
        computed: u32,
    },
}

/// Validates a parsed record against the data-model invariants.
///
/// Returns all problems found; an empty vector means the record is valid.
/// Never panics.
pub fn validate_record(record: &ParsedEvaluation) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let lists: [(&'static str, &[String]); 4] = [
        ("strengths", &record.strengths),
        ("gaps", &record.gaps),
        ("next_steps", &record.next_steps),
        ("resources", &record.resources),
    ];
    for (field, items) in lists {
        if items.iter().any(|item| item.trim().is_empty()) {
            errors.push(ValidationError::BlankListItem(field));
        }
    }

    if record.score.value > record.score.max {
        errors.push(ValidationError::ScoreExceedsMax {
            value: record.score.value,
            max: record.score.max,
        });
    }
    let computed = rounded_percentage(record.score.value, record.score.max);
    if record.score.percentage != computed {
        errors.push(ValidationError::ScorePercentageMismatch {
            stored: record.score.percentage,
            computed,
        });
    }

    for (index, category) in record.categories.iter().enumerate() {
        if category.name.trim().is_empty() {
            errors.push(ValidationError::BlankCategoryName(index));
        }
        if category.score > category.max {
            errors.push(ValidationError::CategoryScoreExceedsMax {
                name: category.name.clone(),
                score: category.score,
                max: category.max,
            });
        }
        let computed = category.recomputed_percentage();
        if category.percentage.abs_diff(computed) > PERCENTAGE_DRIFT_TOLERANCE {
            errors.push(ValidationError::CategoryPercentageDrift {
                name: category.name.clone(),
                stored: category.percentage,
                computed,
            });
        }
    }

    for (index, priority) in record.priorities.iter().enumerate() {
        if priority.action.trim().is_empty() {
            errors.push(ValidationError::BlankPriorityAction(index));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoryScore, PriorityItem, PriorityLevel, ScoreSummary};

    #[test]
    fn test_default_record_is_valid() {
        let record = ParsedEvaluation::new("id", "ts");
        assert!(validate_record(&record).is_empty());
    }

    #[test]
    fn test_blank_list_items_reported_per_field() {
        let mut record = ParsedEvaluation::new("id", "ts");
        record.strengths.push(String::new());
        record.gaps.push("  \t".to_string());
        record.next_steps.push("Lehrbuch Kapitel 3".to_string());

        let errors = validate_record(&record);
        assert!(errors.contains(&ValidationError::BlankListItem("strengths")));
        assert!(errors.contains(&ValidationError::BlankListItem("gaps")));
        assert!(!errors.contains(&ValidationError::BlankListItem("next_steps")));
    }

    #[test]
    fn test_score_exceeding_max_is_flagged() {
        let mut record = ParsedEvaluation::new("id", "ts");
        record.score = ScoreSummary {
            value: 120,
            max: 100,
            percentage: 120,
        };

        let errors = validate_record(&record);
        assert!(errors.contains(&ValidationError::ScoreExceedsMax {
            value: 120,
            max: 100
        }));
    }

    #[test]
    fn test_category_drift_tolerates_one_point() {
        let mut record = ParsedEvaluation::new("id", "ts");
        // 12/18 computes to 67; a source that printed 66 is kept.
        record.categories.push(CategoryScore {
            name: "Fachwissen".to_string(),
            score: 12,
            max: 18,
            percentage: 66,
        });
        assert!(validate_record(&record).is_empty());

        record.categories[0].percentage = 80;
        let errors = validate_record(&record);
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::CategoryPercentageDrift { stored: 80, .. }]
        ));
    }

    #[test]
    fn test_blank_priority_action_is_flagged() {
        let mut record = ParsedEvaluation::new("id", "ts");
        record
            .priorities
            .push(PriorityItem::new(PriorityLevel::Urgent, " "));

        let errors = validate_record(&record);
        assert_eq!(errors, vec![ValidationError::BlankPriorityAction(0)]);
    }
}
