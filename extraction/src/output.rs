//! Output formatting for records and parse runs.

use eval_report_core::{ParsedEvaluation, PriorityLevel};

use crate::ParseRun;

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
}

/// Formats a record in the requested output format.
pub fn format_record(record: &ParsedEvaluation, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(record)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(record).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(record_to_markdown(record)),
    }
}

/// Formats a parse run (record plus diagnostics) in the requested format.
pub fn format_run(run: &ParseRun, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(run).map_err(|e| format!("JSON serialization failed: {e}"))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(run).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => {
            let mut out = record_to_markdown(&run.record);
            out.push_str(&run_diagnostics_to_markdown(run));
            Ok(out)
        }
    }
}

fn record_to_markdown(record: &ParsedEvaluation) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Evaluation {}\n\n", record.id));
    out.push_str(&format!(
        "**Score:** {}/{} ({}%)\n\n",
        record.score.value, record.score.max, record.score.percentage
    ));

    if !record.summary.is_empty() {
        out.push_str(&format!("{}\n\n", record.summary));
    }

    if !record.categories.is_empty() {
        out.push_str("## Categories\n\n");
        for category in &record.categories {
            out.push_str(&format!(
                "- {}: {}/{} ({}%)\n",
                category.name, category.score, category.max, category.percentage
            ));
        }
        out.push('\n');
    }

    push_list(&mut out, "Strengths", &record.strengths);
    push_list(&mut out, "Gaps", &record.gaps);

    if !record.priorities.is_empty() {
        out.push_str("## Priorities\n\n");
        for level in [
            PriorityLevel::Urgent,
            PriorityLevel::Important,
            PriorityLevel::Optional,
        ] {
            for item in record.priorities_at(level) {
                out.push_str(&format!("- **{level}**: {}\n", item.action));
            }
        }
        out.push('\n');
    }

    push_list(&mut out, "Next steps", &record.next_steps);
    push_list(&mut out, "Resources", &record.resources);

    out
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("## {title}\n\n"));
    for item in items {
        out.push_str(&format!("- {item}\n"));
    }
    out.push('\n');
}

fn run_diagnostics_to_markdown(run: &ParseRun) -> String {
    let mut out = String::new();

    out.push_str("## Diagnostics\n\n");
    out.push_str(&format!("**Score source:** {:?}\n\n", run.trace.score_source));

    for entry in &run.trace.sections {
        out.push_str(&format!(
            "- matched `{}` via \"{}\" (line {})\n",
            entry.section, entry.synonym, entry.heading_line
        ));
    }
    for section in &run.trace.unmatched_sections {
        out.push_str(&format!("- no heading for `{section}`\n"));
    }
    out.push('\n');

    if !run.warnings.is_empty() {
        out.push_str("**Warnings:**\n\n");
        for warning in &run.warnings {
            out.push_str(&format!("- {warning}\n"));
        }
        out.push('\n');
    }

    out
}
