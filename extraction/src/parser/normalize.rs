//! Evaluation-text normalization.

pub(super) fn normalize_evaluation_text(raw: &str) -> String {
    // Mojibake from double-encoded UTF-8 reaches us as valid-but-wrong
    // characters; nothing here repairs it, the extractors simply fail to
    // match those spans. Normalization only removes artifacts that would
    // break otherwise well-formed headings and bullets.
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut normalized: Vec<&str> = Vec::new();
    for line in unified.lines() {
        normalized.push(line.trim_end());
    }
    let mut joined = normalized.join("\n");

    if joined.contains('\u{feff}') || joined.contains('\u{a0}') {
        joined = joined.replace('\u{feff}', "").replace('\u{a0}', " ");
    }

    joined
}
