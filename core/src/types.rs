//! Record type definitions for parsed evaluation reports.
//!
//! This module defines the core data model used to represent the structured
//! result of parsing one free-form evaluation text. The types are designed
//! for serialization with [`serde`] and can round-trip through JSON and
//! other storage backends.

use serde::{Deserialize, Serialize};

/// Maximum score assumed when an evaluation text carries no score at all.
///
/// Used by the ungraded sentinel [`ScoreSummary::ungraded`]: a record with
/// `{value: 0, max: UNGRADED_MAX, percentage: 0}` and no categories means
/// "nothing scoreable was found", not "the candidate scored zero".
pub const UNGRADED_MAX: u32 = 100;

/// Rounds `value / max` to a whole percentage, guarded against division by
/// zero (`max == 0` yields `0`, never NaN or infinity).
///
/// # Examples
///
/// ```
/// use eval_report_core::rounded_percentage;
///
/// assert_eq!(rounded_percentage(45, 60), 75);
/// assert_eq!(rounded_percentage(1, 3), 33);
/// assert_eq!(rounded_percentage(7, 0), 0);
/// ```
pub fn rounded_percentage(value: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    ((f64::from(value) / f64::from(max)) * 100.0).round() as u32
}

/// Overall score of one evaluation.
///
/// Either taken verbatim from an explicit `<value>/<max>` pair in the text,
/// derived by summing category scores, or the ungraded sentinel when neither
/// source is present.
///
/// # Examples
///
/// ```
/// use eval_report_core::ScoreSummary;
///
/// let score = ScoreSummary::from_totals(45, 60);
/// assert_eq!(score.percentage, 75);
///
/// let ungraded = ScoreSummary::ungraded();
/// assert_eq!(ungraded.max, 100);
/// assert_eq!(ungraded.percentage, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Achieved points.
    pub value: u32,
    /// Achievable points.
    pub max: u32,
    /// `round(value / max * 100)`; `0` when `max` is `0`.
    pub percentage: u32,
}

impl ScoreSummary {
    /// Creates a score from a value/max pair, computing the percentage.
    pub fn from_totals(value: u32, max: u32) -> Self {
        Self {
            value,
            max,
            percentage: rounded_percentage(value, max),
        }
    }

    /// The documented default for texts without any score information.
    pub fn ungraded() -> Self {
        Self {
            value: 0,
            max: UNGRADED_MAX,
            percentage: 0,
        }
    }
}

impl Default for ScoreSummary {
    fn default() -> Self {
        Self::ungraded()
    }
}

/// One scored sub-dimension of the evaluation (e.g. anamnesis technique,
/// medical correctness) with its own value/max pair.
///
/// # Examples
///
/// ```
/// use eval_report_core::CategoryScore;
///
/// let cat = CategoryScore::new("Kommunikation", 15, 20);
/// assert_eq!(cat.percentage, 75);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Category label as it appeared in the text, trimmed of markup.
    pub name: String,
    /// Achieved points.
    pub score: u32,
    /// Achievable points.
    pub max: u32,
    /// Percentage; normally recomputed from score/max, but a percentage
    /// printed in the source line is kept verbatim within rounding drift.
    pub percentage: u32,
}

impl CategoryScore {
    /// Creates a category with a recomputed percentage.
    pub fn new(name: &str, score: u32, max: u32) -> Self {
        Self {
            name: name.to_string(),
            score,
            max,
            percentage: rounded_percentage(score, max),
        }
    }

    /// The percentage implied by this category's score/max pair.
    pub fn recomputed_percentage(&self) -> u32 {
        rounded_percentage(self.score, self.max)
    }
}

/// Triage level of one learning priority.
///
/// Serialized lowercase (`"urgent"`, `"important"`, `"optional"`), matching
/// the persisted record shape consumed by downstream renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Urgent,
    Important,
    Optional,
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Urgent => write!(f, "urgent"),
            Self::Important => write!(f, "important"),
            Self::Optional => write!(f, "optional"),
        }
    }
}

/// One triage-labeled action item from the learning-priorities section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityItem {
    pub level: PriorityLevel,
    pub action: String,
}

impl PriorityItem {
    /// Creates a priority item.
    pub fn new(level: PriorityLevel, action: &str) -> Self {
        Self {
            level,
            action: action.to_string(),
        }
    }
}

/// The structured result of parsing one evaluation text.
///
/// Every field is always present: extraction failure for any section yields
/// the documented default (empty string, empty list, or the ungraded score
/// sentinel), never a missing field. `id` and `timestamp` are opaque
/// caller-supplied passthroughs.
///
/// # Examples
///
/// ```
/// use eval_report_core::ParsedEvaluation;
///
/// let record = ParsedEvaluation::new("eval-1", "2024-05-01T10:00:00Z");
/// assert!(record.summary.is_empty());
/// assert!(record.categories.is_empty());
/// assert!(record.is_ungraded());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEvaluation {
    /// Opaque caller-supplied identifier, copied through unchanged.
    pub id: String,
    /// Opaque caller-supplied timestamp, copied through unchanged.
    pub timestamp: String,
    /// Free-text overview; empty string if no summary section matched.
    pub summary: String,
    /// Overall score, or the ungraded sentinel.
    pub score: ScoreSummary,
    /// Scored sub-dimensions in order of appearance in the text.
    pub categories: Vec<CategoryScore>,
    /// Things done well, in order of appearance.
    pub strengths: Vec<String>,
    /// Missing considerations, in order of appearance.
    pub gaps: Vec<String>,
    /// Triage-labeled action items, grouped urgent, important, optional.
    pub priorities: Vec<PriorityItem>,
    /// Recommended next steps, in order of appearance.
    pub next_steps: Vec<String>,
    /// Bibliographic/reference items, best effort.
    pub resources: Vec<String>,
}

impl ParsedEvaluation {
    /// Creates an all-defaults record for the given passthrough fields.
    pub fn new(id: &str, timestamp: &str) -> Self {
        Self {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            summary: String::new(),
            score: ScoreSummary::ungraded(),
            categories: Vec::new(),
            strengths: Vec::new(),
            gaps: Vec::new(),
            priorities: Vec::new(),
            next_steps: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Heuristic for "this evaluation was graded with zero confidence":
    /// no categories were found and the score is still the ungraded
    /// sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use eval_report_core::{CategoryScore, ParsedEvaluation};
    ///
    /// let mut record = ParsedEvaluation::new("id", "ts");
    /// assert!(record.is_ungraded());
    ///
    /// record.categories.push(CategoryScore::new("Anamnese", 10, 20));
    /// assert!(!record.is_ungraded());
    /// ```
    pub fn is_ungraded(&self) -> bool {
        self.categories.is_empty() && self.score == ScoreSummary::ungraded()
    }

    /// Finds a category by name, case-insensitively.
    pub fn find_category(&self, name: &str) -> Option<&CategoryScore> {
        self.categories
            .iter()
            .find(|cat| cat.name.eq_ignore_ascii_case(name))
    }

    /// All priority actions at the given level, in recorded order.
    pub fn priorities_at(&self, level: PriorityLevel) -> impl Iterator<Item = &PriorityItem> {
        self.priorities.iter().filter(move |p| p.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(rounded_percentage(45, 60), 75);
        assert_eq!(rounded_percentage(1, 8), 13);
        assert_eq!(rounded_percentage(0, 100), 0);
    }

    #[test]
    fn test_percentage_guards_zero_max() {
        assert_eq!(rounded_percentage(10, 0), 0);
        let score = ScoreSummary::from_totals(10, 0);
        assert_eq!(score.percentage, 0);
    }

    #[test]
    fn test_ungraded_sentinel_shape() {
        let score = ScoreSummary::ungraded();
        assert_eq!(score.value, 0);
        assert_eq!(score.max, 100);
        assert_eq!(score.percentage, 0);
        assert_eq!(ScoreSummary::default(), score);
    }

    #[test]
    fn test_ungraded_heuristic_flips_on_explicit_score() {
        let mut record = ParsedEvaluation::new("id", "ts");
        assert!(record.is_ungraded());

        record.score = ScoreSummary::from_totals(70, 100);
        assert!(!record.is_ungraded());
    }

    #[test]
    fn test_priority_level_serializes_lowercase() {
        let json = serde_json::to_string(&PriorityLevel::Urgent).expect("serialize");
        assert_eq!(json, "\"urgent\"");
        let back: PriorityLevel = serde_json::from_str("\"optional\"").expect("deserialize");
        assert_eq!(back, PriorityLevel::Optional);
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let mut record = ParsedEvaluation::new("eval-7", "2024-05-01T10:00:00Z");
        record.summary = "Solide Anamnese.".to_string();
        record.score = ScoreSummary::from_totals(45, 60);
        record.categories.push(CategoryScore::new("Struktur", 20, 20));
        record
            .priorities
            .push(PriorityItem::new(PriorityLevel::Important, "EKG üben"));

        let json = serde_json::to_string(&record).expect("serialize");
        let back: ParsedEvaluation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }
}
