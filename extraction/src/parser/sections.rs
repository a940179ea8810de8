//! Section location driven by declarative synonym tables.
//!
//! The generator behind the evaluation texts is not under our control and
//! has shipped at least two heading vocabularies (plain German keywords and
//! emoji-prefixed variants, with or without bold markup). Instead of one
//! regex per observed format, every logical section owns a synonym table
//! and a single parametrized locator matches any of them. Supporting a new
//! generator vocabulary means adding a synonym entry, not a new pattern.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Logical sections of an evaluation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Summary,
    Score,
    Categories,
    Strengths,
    Gaps,
    Priorities,
    NextSteps,
    Resources,
}

impl SectionId {
    /// All sections, in canonical document order.
    pub const ALL: [SectionId; 8] = [
        SectionId::Summary,
        SectionId::Score,
        SectionId::Categories,
        SectionId::Strengths,
        SectionId::Gaps,
        SectionId::Priorities,
        SectionId::NextSteps,
        SectionId::Resources,
    ];
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Summary => "summary",
            Self::Score => "score",
            Self::Categories => "categories",
            Self::Strengths => "strengths",
            Self::Gaps => "gaps",
            Self::Priorities => "priorities",
            Self::NextSteps => "next_steps",
            Self::Resources => "resources",
        };
        write!(f, "{label}")
    }
}

/// Declarative synonym entry for one logical section.
pub(crate) struct SectionSpec {
    pub(crate) id: SectionId,
    pub(crate) synonyms: &'static [&'static str],
}

pub(crate) const SUMMARY_SYNONYMS: &[&str] = &[
    "ZUSAMMENFASSUNG",
    "GESAMTEINDRUCK",
    "ÜBERBLICK",
    "FAZIT",
    "SUMMARY",
];

pub(crate) const SCORE_SYNONYMS: &[&str] = &[
    "GESAMTPUNKTZAHL",
    "GESAMTBEWERTUNG",
    "GESAMTERGEBNIS",
    "PUNKTZAHL",
    "ERGEBNIS",
    "SCORE",
    "TOTAL SCORE",
];

pub(crate) const CATEGORIES_SYNONYMS: &[&str] = &[
    "BEWERTUNG NACH KATEGORIEN",
    "PUNKTEVERTEILUNG",
    "EINZELBEWERTUNG",
    "KATEGORIEN",
    "DETAILBEWERTUNG",
];

pub(crate) const STRENGTHS_SYNONYMS: &[&str] = &[
    "RICHTIG GEMACHT",
    "GUT GEMACHT",
    "STÄRKEN",
    "POSITIV AUFGEFALLEN",
    "WAS GUT WAR",
    "STRENGTHS",
];

pub(crate) const GAPS_SYNONYMS: &[&str] = &[
    "FEHLENDE ASPEKTE",
    "NICHT ERWÄHNT",
    "VERBESSERUNGSBEDARF",
    "VERPASSTE PUNKTE",
    "LÜCKEN",
    "MISSED POINTS",
];

pub(crate) const PRIORITIES_SYNONYMS: &[&str] = &[
    "LERNPRIORITÄTEN",
    "PRIORITÄTEN",
    "LERNZIELE",
    "PRIORITIES",
];

pub(crate) const NEXT_STEPS_SYNONYMS: &[&str] = &[
    "NÄCHSTE SCHRITTE",
    "WEITERES VORGEHEN",
    "EMPFEHLUNGEN",
    "NEXT STEPS",
];

pub(crate) const RESOURCES_SYNONYMS: &[&str] = &[
    "WEITERFÜHRENDE LITERATUR",
    "QUELLEN",
    "LITERATUR",
    "RESSOURCEN",
    "REFERENZEN",
    "RESOURCES",
];

/// The synonym tables, one entry per logical section.
pub(crate) const SECTION_SPECS: &[SectionSpec] = &[
    SectionSpec {
        id: SectionId::Summary,
        synonyms: SUMMARY_SYNONYMS,
    },
    SectionSpec {
        id: SectionId::Score,
        synonyms: SCORE_SYNONYMS,
    },
    SectionSpec {
        id: SectionId::Categories,
        synonyms: CATEGORIES_SYNONYMS,
    },
    SectionSpec {
        id: SectionId::Strengths,
        synonyms: STRENGTHS_SYNONYMS,
    },
    SectionSpec {
        id: SectionId::Gaps,
        synonyms: GAPS_SYNONYMS,
    },
    SectionSpec {
        id: SectionId::Priorities,
        synonyms: PRIORITIES_SYNONYMS,
    },
    SectionSpec {
        id: SectionId::NextSteps,
        synonyms: NEXT_STEPS_SYNONYMS,
    },
    SectionSpec {
        id: SectionId::Resources,
        synonyms: RESOURCES_SYNONYMS,
    },
];

/// A located section: the span after its heading, which synonym matched,
/// and the heading's line index (for the trace).
#[derive(Debug, Clone)]
pub(crate) struct SectionSlice<'a> {
    pub(crate) text: &'a str,
    pub(crate) synonym: &'static str,
    pub(crate) heading_line: usize,
}

#[derive(Debug, Clone, Copy)]
struct IndexedLine<'a> {
    index: usize,
    start: usize,
    text: &'a str,
}

fn indexed_lines(text: &str) -> Vec<IndexedLine<'_>> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    for (index, raw) in text.split_inclusive('\n').enumerate() {
        lines.push(IndexedLine {
            index,
            start,
            text: raw.trim_end_matches('\n'),
        });
        start += raw.len();
    }
    lines
}

/// Builds the heading pattern for a synonym alternation.
///
/// A heading is a line that carries only the synonym plus markup: an
/// optional run of emphasis markers, an optional emoji prefix, the synonym
/// itself (case-insensitive, Unicode folding covers umlauts), optional
/// closing emphasis, and either end-of-line or a colon with the rest of the
/// line. Longer synonyms are tried first so `GESAMTPUNKTZAHL` never loses
/// to `PUNKTZAHL`.
fn heading_pattern(synonyms: &[&str]) -> String {
    let mut sorted: Vec<&str> = synonyms.to_vec();
    sorted.sort_by_key(|synonym| std::cmp::Reverse(synonym.len()));
    let alternation = sorted
        .iter()
        .map(|synonym| regex::escape(synonym))
        .collect::<Vec<_>>()
        .join("|");
    format!(
        r"(?i)^[\s*_#]*(?:[\p{{So}}\p{{Sk}}\x{{FE0F}}\x{{200D}}]+\s*)?[*_#\s]*({alternation})\s*[*_#]*\s*(?::(.*))?$"
    )
}

static HEADING_PATTERNS: LazyLock<Vec<(SectionId, Regex)>> = LazyLock::new(|| {
    SECTION_SPECS
        .iter()
        .map(|spec| {
            (
                spec.id,
                Regex::new(&heading_pattern(spec.synonyms)).expect("static regex must compile"),
            )
        })
        .collect()
});

/// Any known heading, regardless of section. Used as the stop set when
/// slicing a section span.
static STOP_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    let all: Vec<&str> = SECTION_SPECS
        .iter()
        .flat_map(|spec| spec.synonyms.iter().copied())
        .collect();
    Regex::new(&heading_pattern(&all)).expect("static regex must compile")
});

/// Horizontal rules also delimit sections in some generator outputs.
static HORIZONTAL_RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-=_]{3,}\s*$").expect("static regex must compile"));

fn heading_regex(id: SectionId) -> &'static Regex {
    HEADING_PATTERNS
        .iter()
        .find(|(candidate, _)| *candidate == id)
        .map(|(_, re)| re)
        .expect("every SectionId has a compiled heading pattern")
}

pub(crate) fn is_stop_heading(line: &str) -> bool {
    HORIZONTAL_RULE_RE.is_match(line) || STOP_HEADING_RE.is_match(line)
}

fn canonical_synonym(spec: &SectionSpec, matched: &str) -> &'static str {
    let matched_lower = matched.to_lowercase();
    spec.synonyms
        .iter()
        .find(|synonym| synonym.to_lowercase() == matched_lower)
        .copied()
        .unwrap_or(spec.synonyms[0])
}

/// Finds the first heading for `spec` and returns the span from immediately
/// after it until the next recognized heading or end of input.
///
/// Content on the heading line itself (after the colon) belongs to the
/// span. Returns `None` when no synonym matches as a heading; never panics
/// on malformed input.
pub(crate) fn locate_section<'a>(text: &'a str, spec: &SectionSpec) -> Option<SectionSlice<'a>> {
    let heading_re = heading_regex(spec.id);
    let lines = indexed_lines(text);

    for (position, line) in lines.iter().enumerate() {
        let Some(caps) = heading_re.captures(line.text) else {
            continue;
        };

        let matched = caps.get(1).map_or("", |m| m.as_str());
        let synonym = canonical_synonym(spec, matched);

        let mut end = text.len();
        for later in &lines[position + 1..] {
            if is_stop_heading(later.text) {
                end = later.start;
                break;
            }
        }

        // Content after the colon may still carry the heading's closing
        // emphasis markers ("**ZUSAMMENFASSUNG:** text"); skip those before
        // deciding whether the heading line contributes content.
        let content_start = match caps.get(2) {
            Some(rest) => {
                let stripped = rest.as_str().trim_start_matches(['*', '_', ' ', '\t']);
                if stripped.is_empty() {
                    lines
                        .get(position + 1)
                        .map_or(text.len(), |next| next.start)
                } else {
                    line.start + rest.start() + (rest.as_str().len() - stripped.len())
                }
            }
            None => lines
                .get(position + 1)
                .map_or(text.len(), |next| next.start),
        };
        let content_start = content_start.min(end);

        return Some(SectionSlice {
            text: text[content_start..end].trim(),
            synonym,
            heading_line: line.index,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(text: &str, id: SectionId) -> Option<SectionSlice<'_>> {
        let spec = SECTION_SPECS
            .iter()
            .find(|spec| spec.id == id)
            .expect("every SectionId has a spec entry");
        locate_section(text, spec)
    }

    #[test]
    fn test_plain_heading_spans_to_next_heading() {
        let text = "ZUSAMMENFASSUNG:\nGute Anamnese, klare Struktur.\n\nSTÄRKEN:\n- Empathie\n";
        let slice = locate(text, SectionId::Summary).expect("summary should match");
        assert_eq!(slice.text, "Gute Anamnese, klare Struktur.");
        assert_eq!(slice.synonym, "ZUSAMMENFASSUNG");
        assert_eq!(slice.heading_line, 0);
    }

    #[test]
    fn test_bold_and_emoji_wrapped_heading_matches() {
        let text = "📋 **ZUSAMMENFASSUNG:**\nSolide Leistung.\n";
        let slice = locate(text, SectionId::Summary).expect("summary should match");
        assert_eq!(slice.text, "Solide Leistung.");
    }

    #[test]
    fn test_matching_is_case_insensitive_including_umlauts() {
        let text = "lernprioritäten:\n🔴 DRINGEND: EKG üben\n";
        let slice = locate(text, SectionId::Priorities).expect("priorities should match");
        assert_eq!(slice.synonym, "LERNPRIORITÄTEN");
    }

    #[test]
    fn test_content_on_heading_line_belongs_to_span() {
        let text = "GESAMTEINDRUCK: Insgesamt überzeugend.\nWeitere Details folgen.\nQUELLEN:\n- Herold\n";
        let slice = locate(text, SectionId::Summary).expect("summary should match");
        assert_eq!(
            slice.text,
            "Insgesamt überzeugend.\nWeitere Details folgen."
        );
    }

    #[test]
    fn test_horizontal_rule_delimits_section() {
        let text = "STÄRKEN:\n- Struktur\n---\nFreitext danach\n";
        let slice = locate(text, SectionId::Strengths).expect("strengths should match");
        assert_eq!(slice.text, "- Struktur");
    }

    #[test]
    fn test_synonym_mid_sentence_is_not_a_heading() {
        let text = "Die Zusammenfassung der Befunde war knapp.\n";
        assert!(locate(text, SectionId::Summary).is_none());
    }

    #[test]
    fn test_longer_synonym_wins_over_substring() {
        let text = "GESAMTPUNKTZAHL: 45/60\n";
        let slice = locate(text, SectionId::Score).expect("score heading should match");
        assert_eq!(slice.synonym, "GESAMTPUNKTZAHL");
        assert_eq!(slice.text, "45/60");
    }

    #[test]
    fn test_absent_section_returns_none() {
        assert!(locate("lorem ipsum dolor", SectionId::Resources).is_none());
    }

    #[test]
    fn test_section_at_end_of_input_spans_to_eof() {
        let text = "NÄCHSTE SCHRITTE:\n1. Leitlinie lesen\n2. Fälle üben";
        let slice = locate(text, SectionId::NextSteps).expect("next steps should match");
        assert_eq!(slice.text, "1. Leitlinie lesen\n2. Fälle üben");
    }
}
