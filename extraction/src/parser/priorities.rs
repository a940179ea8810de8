//! Learning-priority extraction.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use eval_report_core::{PriorityItem, PriorityLevel};

/// Marker glyphs and bilingual label synonyms, one entry per triage level.
struct LevelSpec {
    level: PriorityLevel,
    markers: &'static str,
    labels: &'static [&'static str],
}

const LEVEL_SPECS: &[LevelSpec] = &[
    LevelSpec {
        level: PriorityLevel::Urgent,
        markers: "🔴",
        labels: &["DRINGEND", "URGENT", "SOFORT"],
    },
    LevelSpec {
        level: PriorityLevel::Important,
        markers: "🟡🟠",
        labels: &["WICHTIG", "IMPORTANT"],
    },
    LevelSpec {
        level: PriorityLevel::Optional,
        markers: "🟢",
        labels: &["OPTIONAL", "EMPFOHLEN", "RECOMMENDED"],
    },
];

fn level_regex(spec: &LevelSpec) -> Regex {
    let alternation = spec
        .labels
        .iter()
        .map(|label| regex::escape(label))
        .collect::<Vec<_>>()
        .join("|");
    let markers = regex::escape(spec.markers);
    Regex::new(&format!(
        r"(?im)^\s*[{markers}]\x{{FE0F}}?\s*[*_]*(?:{alternation})[*_]*\s*:[*_]*\s*(.+)$"
    ))
    .expect("static regex must compile")
}

static LEVEL_PATTERNS: LazyLock<Vec<(PriorityLevel, Regex)>> = LazyLock::new(|| {
    LEVEL_SPECS
        .iter()
        .map(|spec| (spec.level, level_regex(spec)))
        .collect()
});

/// Extracts triage-labeled action items from the full text.
///
/// Three independent global scans, one per level. Result order is grouped
/// by scan (all urgent items, then important, then optional), matching how
/// the scans execute; within one level, order of appearance is kept.
pub(super) fn extract_priorities(text: &str) -> Vec<PriorityItem> {
    let mut priorities = Vec::new();

    for (level, pattern) in LEVEL_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let action = caps[1].trim().trim_end_matches(['*', '_']).trim();
            if !action.is_empty() {
                priorities.push(PriorityItem::new(*level, action));
            }
        }
    }

    debug!(rows = priorities.len(), "Extracted priority items");
    priorities
}
