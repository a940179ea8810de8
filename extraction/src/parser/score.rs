//! Overall score extraction.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use eval_report_core::{CategoryScore, ScoreSummary};

use super::sections::SCORE_SYNONYMS;
use super::trace::ScoreSource;

/// `GESAMTPUNKTZAHL: 45/60` and variants — any score-heading synonym,
/// optionally emphasis-wrapped and emoji-prefixed, followed on the same
/// line by a `<value>/<max>` pair with markup tolerated in between.
static EXPLICIT_SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut sorted: Vec<&str> = SCORE_SYNONYMS.to_vec();
    sorted.sort_by_key(|synonym| std::cmp::Reverse(synonym.len()));
    let alternation = sorted
        .iter()
        .map(|synonym| regex::escape(synonym))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?im)^[\s*_#]*(?:[\p{{So}}\p{{Sk}}\x{{FE0F}}\x{{200D}}]+\s*)?[*_#\s]*(?:{alternation})[*_#\s]*:?[^\d\n]*(\d{{1,4}})\s*/\s*(\d{{1,4}})"
    ))
    .expect("static regex must compile")
});

/// Extracts the overall score.
///
/// An explicit `<value>/<max>` pair after a score heading is authoritative.
/// Without one, totals are derived by summing the already-extracted
/// category rows. With neither, the ungraded sentinel is returned; this is
/// a documented default, not an error.
pub(super) fn extract_score(
    text: &str,
    categories: &[CategoryScore],
    warnings: &mut Vec<String>,
) -> (ScoreSummary, ScoreSource) {
    if let Some(caps) = EXPLICIT_SCORE_RE.captures(text) {
        let (Ok(value), Ok(max)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
            return fallback(categories, warnings);
        };
        debug!(value, max, "Explicit score heading matched");
        return (ScoreSummary::from_totals(value, max), ScoreSource::Explicit);
    }

    fallback(categories, warnings)
}

fn fallback(
    categories: &[CategoryScore],
    warnings: &mut Vec<String>,
) -> (ScoreSummary, ScoreSource) {
    if !categories.is_empty() {
        let value = categories.iter().map(|cat| cat.score).sum();
        let max = categories.iter().map(|cat| cat.max).sum();
        warnings.push(format!(
            "No explicit score heading; totals derived from {} category rows",
            categories.len()
        ));
        return (
            ScoreSummary::from_totals(value, max),
            ScoreSource::CategorySum,
        );
    }

    warnings.push("No score information found; record is ungraded".to_string());
    (ScoreSummary::ungraded(), ScoreSource::Ungraded)
}
