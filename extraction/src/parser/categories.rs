//! Category score extraction.
//!
//! The generator emits category breakdowns in two formats that never mix
//! within one well-formed text: a numbered list (`1. Anamnese: 12/20`) and
//! icon-prefixed rows (`📊 Anamnese: 12/20 (60%)`). Both patterns are tried
//! independently and their results concatenated.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use eval_report_core::{CategoryScore, PERCENTAGE_DRIFT_TOLERANCE};

use super::sections::SCORE_SYNONYMS;

/// `1. Anamnese: 12/20` — ordinal optionally wrapped in emphasis markers.
static NUMBERED_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*[*_]*\d{1,2}[.)][*_]*\s+([^:\n]+?)\s*:\s*[*_]*(\d{1,3})\s*/\s*(\d{1,4})")
        .expect("static regex must compile")
});

/// `📊 Anamnese: 12/20 (60%)` — trailing percentage optional.
static ICON_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*[\p{So}\p{Sk}\x{FE0F}\x{200D}]+\s*([^:\n]+?)\s*:\s*[*_]*(\d{1,3})\s*/\s*(\d{1,4})[*_]*(?:\s*\((\d{1,3})\s*%\))?",
    )
    .expect("static regex must compile")
});

fn is_score_label(name: &str) -> bool {
    let lower = name.to_lowercase();
    SCORE_SYNONYMS
        .iter()
        .any(|synonym| synonym.to_lowercase() == lower)
}

fn clean_name(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(['*', '_'])
        .trim_end_matches([':', '*', '_'])
        .trim()
        .to_string()
}

/// Resolves a category's percentage: a percentage printed in the source is
/// kept verbatim within rounding drift of the recomputed value; beyond
/// that the score/max-derived value is authoritative and the drift is
/// surfaced as a warning.
fn resolve_percentage(
    name: &str,
    score: u32,
    max: u32,
    source: Option<u32>,
    warnings: &mut Vec<String>,
) -> u32 {
    let computed = eval_report_core::rounded_percentage(score, max);
    match source {
        Some(printed) if printed.abs_diff(computed) <= PERCENTAGE_DRIFT_TOLERANCE => printed,
        Some(printed) => {
            warnings.push(format!(
                "Category '{name}': printed percentage {printed}% disagrees with {score}/{max}; using {computed}%"
            ));
            computed
        }
        None => computed,
    }
}

/// Extracts `(name, score, max, percentage)` rows from the full text.
///
/// Results follow order of appearance per pattern, numbered rows first.
/// Rows whose label is itself a score heading (`GESAMTPUNKTZAHL: 45/60`)
/// are skipped, they belong to the score extractor.
pub(super) fn extract_categories(text: &str, warnings: &mut Vec<String>) -> Vec<CategoryScore> {
    let mut categories = Vec::new();

    for caps in NUMBERED_ROW_RE.captures_iter(text) {
        let name = clean_name(&caps[1]);
        if name.is_empty() || is_score_label(&name) {
            continue;
        }
        let (Ok(score), Ok(max)) = (caps[2].parse::<u32>(), caps[3].parse::<u32>()) else {
            continue;
        };
        categories.push(CategoryScore::new(&name, score, max));
    }

    for caps in ICON_ROW_RE.captures_iter(text) {
        let name = clean_name(&caps[1]);
        if name.is_empty() || is_score_label(&name) {
            continue;
        }
        let (Ok(score), Ok(max)) = (caps[2].parse::<u32>(), caps[3].parse::<u32>()) else {
            continue;
        };
        let printed = caps.get(4).and_then(|m| m.as_str().parse::<u32>().ok());
        let percentage = resolve_percentage(&name, score, max, printed, warnings);
        categories.push(CategoryScore {
            name,
            score,
            max,
            percentage,
        });
    }

    debug!(rows = categories.len(), "Extracted category scores");
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_rows_in_order_of_appearance() {
        let text = "\
1. Anamnesetechnik: 12/20
2. Fachliche Korrektheit: 15/20
3. Kommunikation: 18/20
";
        let mut warnings = Vec::new();
        let categories = extract_categories(text, &mut warnings);
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0].name, "Anamnesetechnik");
        assert_eq!(categories[0].score, 12);
        assert_eq!(categories[0].max, 20);
        assert_eq!(categories[0].percentage, 60);
        assert_eq!(categories[2].name, "Kommunikation");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_emphasized_ordinal_and_name_markup_trimmed() {
        let text = "**1.** Strukturierung**: 10/15\n";
        let mut warnings = Vec::new();
        let categories = extract_categories(text, &mut warnings);
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Strukturierung");
    }

    #[test]
    fn test_icon_rows_with_printed_percentage_kept_verbatim() {
        // 12/18 recomputes to 67; the printed 66 is within drift and wins.
        let text = "📊 Fachwissen: 12/18 (66%)\n🗣️ Gesprächsführung: 15/20 (75%)\n";
        let mut warnings = Vec::new();
        let categories = extract_categories(text, &mut warnings);
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].percentage, 66);
        assert_eq!(categories[1].percentage, 75);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_drifting_printed_percentage_recomputed_with_warning() {
        let text = "📊 Fachwissen: 12/18 (90%)\n";
        let mut warnings = Vec::new();
        let categories = extract_categories(text, &mut warnings);
        assert_eq!(categories[0].percentage, 67);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Fachwissen"));
    }

    #[test]
    fn test_icon_row_without_percentage_is_recomputed() {
        let text = "🧠 Differentialdiagnosen: 9/12\n";
        let mut warnings = Vec::new();
        let categories = extract_categories(text, &mut warnings);
        assert_eq!(categories[0].percentage, 75);
    }

    #[test]
    fn test_score_heading_rows_are_not_categories() {
        let text = "🎯 GESAMTPUNKTZAHL: 45/60\n📊 Anamnese: 12/20\n";
        let mut warnings = Vec::new();
        let categories = extract_categories(text, &mut warnings);
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Anamnese");
    }

    #[test]
    fn test_both_patterns_concatenate_numbered_first() {
        let text = "📊 Ikonisch: 5/10\n1. Nummeriert: 6/10\n";
        let mut warnings = Vec::new();
        let categories = extract_categories(text, &mut warnings);
        assert_eq!(categories[0].name, "Nummeriert");
        assert_eq!(categories[1].name, "Ikonisch");
    }

    #[test]
    fn test_zero_max_row_has_zero_percentage() {
        let text = "1. Kaputt: 5/0\n";
        let mut warnings = Vec::new();
        let categories = extract_categories(text, &mut warnings);
        assert_eq!(categories[0].percentage, 0);
    }
}
