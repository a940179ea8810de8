//! List-item extraction from located section spans.

use regex::Regex;
use std::sync::LazyLock;

/// Bullet prefixes the generator uses interchangeably: plain hyphen, en
/// dash, bullet dot, and a small set of emoji it treats as informal
/// bullets.
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-–•]|[✅✓✔❌⚠👉➡📌🔹]\x{FE0F}?)\s+").expect("static regex must compile")
});

/// Numbered items (`1. ...` / `2) ...`), used by next-steps lists.
static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}[.)]\s+").expect("static regex must compile"));

/// Extracts bullet or numbered list items from a section span.
///
/// The bullet/number prefix is stripped; emphasis markup is stripped only
/// at the start of the remaining text, inline emphasis stays verbatim.
/// Lines that are empty after stripping are discarded. `None` (section not
/// located) yields an empty list.
pub(super) fn extract_list_items(section_text: Option<&str>) -> Vec<String> {
    let Some(text) = section_text else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let rest = if let Some(found) = BULLET_RE.find(trimmed) {
            &trimmed[found.end()..]
        } else if let Some(found) = NUMBERED_RE.find(trimmed) {
            &trimmed[found.end()..]
        } else {
            continue;
        };

        let item = rest.trim_start_matches(['*', '_']).trim();
        if !item.is_empty() {
            items.push(item.to_string());
        }
    }

    items
}
