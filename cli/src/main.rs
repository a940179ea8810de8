use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eval_report_core::validate_record;
use eval_report_extraction::output::{OutputFormat, format_record, format_run};
use eval_report_extraction::{parse_evaluation, parse_evaluation_with_trace};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum CliOutputFormat {
    #[default]
    Json,
    Yaml,
    Markdown,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "eval-extract")]
#[command(about = "Offline extraction of structured records from evaluation texts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an evaluation text file into a structured record.
    ParseFile(ParseFileArgs),
    /// Parse an evaluation text from stdin into a structured record.
    ParseStdin(ParseStdinArgs),
    /// Validate one or more record JSON files.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    /// Path to the evaluation text file.
    input: PathBuf,
    #[command(flatten)]
    options: ParseOptions,
}

#[derive(Debug, Args)]
struct ParseStdinArgs {
    #[command(flatten)]
    options: ParseOptions,
}

#[derive(Debug, Args)]
struct ParseOptions {
    /// Record identifier; defaults to the input file stem or "stdin".
    #[arg(long)]
    id: Option<String>,
    /// Record timestamp; defaults to the current RFC 3339 instant.
    #[arg(long)]
    timestamp: Option<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    format: CliOutputFormat,
    /// Include parse diagnostics (matched synonyms, score source, warnings).
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Record JSON files to validate.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::ParseFile(args) => run_parse_file(args),
        Command::ParseStdin(args) => run_parse_stdin(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_parse_file(args: ParseFileArgs) -> Result<(), String> {
    let text = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    let default_id = args
        .input
        .file_stem()
        .map_or_else(|| "evaluation".to_string(), |stem| stem.to_string_lossy().into_owned());
    run_parse_text(&text, default_id, args.options)
}

fn run_parse_stdin(args: ParseStdinArgs) -> Result<(), String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;
    run_parse_text(&text, "stdin".to_string(), args.options)
}

fn run_parse_text(text: &str, default_id: String, options: ParseOptions) -> Result<(), String> {
    let id = options.id.unwrap_or(default_id);
    let timestamp = options
        .timestamp
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

    let rendered = if options.trace {
        let run = parse_evaluation_with_trace(text, &id, &timestamp);
        format_run(&run, options.format.into())?
    } else {
        let record = parse_evaluation(text, &id, &timestamp);
        format_record(&record, options.format.into())?
    };

    println!("{rendered}");
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut invalid = 0usize;

    for path in &args.inputs {
        let json = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
        let record: eval_report_core::ParsedEvaluation = serde_json::from_str(&json)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))?;

        let errors = validate_record(&record);
        if errors.is_empty() {
            println!("{}: ok", path.display());
        } else {
            invalid += 1;
            println!("{}: {} problem(s)", path.display(), errors.len());
            for error in errors {
                println!("  - {error}");
            }
        }
    }

    if invalid > 0 {
        return Err(format!("{invalid} of {} file(s) invalid", args.inputs.len()));
    }
    println!("Validated {} record file(s).", args.inputs.len());
    Ok(())
}
