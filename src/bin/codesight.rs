//! Codesight CLI - Command-line interface for the telemetry-to-insight engine
//!
//! Commands:
//! - profile: Derive a behavioral profile report from an event log
//! - validate: Validate a telemetry event log

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use codesight::adapter::EventLogAdapter;
use codesight::profile::compute_profile;
use codesight::report::ProfileReportEncoder;
use codesight::types::ProfileContext;
use codesight::{ProfileError, CODESIGHT_VERSION};

/// Codesight - telemetry-to-insight engine for coding assessments
#[derive(Parser)]
#[command(name = "codesight")]
#[command(version = CODESIGHT_VERSION)]
#[command(about = "Derive behavioral profiles from assessment telemetry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a behavioral profile report from an event log
    Profile {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Candidate label for report framing
        #[arg(long, default_value = "unknown")]
        candidate: String,

        /// Task title for report framing
        #[arg(long, default_value = "unknown")]
        task: String,
    },

    /// Validate a telemetry event log
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// JSON array of events
    Json,
    /// Newline-delimited JSON (one event per line)
    Ndjson,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("{0} invalid event(s) in input")]
    ValidationFailed(usize),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Profile {
            input,
            output,
            input_format,
            candidate,
            task,
        } => cmd_profile(&input, &output, input_format, candidate, task),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),
    }
}

fn cmd_profile(
    input: &PathBuf,
    output: &PathBuf,
    input_format: InputFormat,
    candidate: String,
    task: String,
) -> Result<(), CliError> {
    let input_data = read_input(input)?;

    let events = match input_format {
        InputFormat::Json => EventLogAdapter::parse_array(&input_data)?,
        InputFormat::Ndjson => EventLogAdapter::parse_ndjson(&input_data)?,
    };
    EventLogAdapter::check_ordering(&events)?;

    let context = ProfileContext {
        candidate_label: candidate,
        task_title: task,
    };
    let profile = compute_profile(&events, &context);

    let encoder = ProfileReportEncoder::new();
    let report = encoder.encode(&profile, &context, events.first().map(|e| e.timestamp));

    // Compact output when piped, pretty otherwise
    let to_stdout = output.to_string_lossy() == "-";
    let output_data = if to_stdout && !atty::is(atty::Stream::Stdout) {
        serde_json::to_string(&report).map_err(ProfileError::JsonError)?
    } else {
        serde_json::to_string_pretty(&report).map_err(ProfileError::JsonError)?
    };

    if to_stdout {
        println!("{output_data}");
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_validate(input: &PathBuf, input_format: InputFormat, json: bool) -> Result<(), CliError> {
    let input_data = read_input(input)?;

    let (events, skipped) = match input_format {
        InputFormat::Json => match EventLogAdapter::parse_array(&input_data) {
            Ok(events) => (events, Vec::new()),
            Err(e) => {
                report_failure(json, &e.to_string());
                return Err(CliError::ValidationFailed(1));
            }
        },
        InputFormat::Ndjson => {
            let (events, skipped) = EventLogAdapter::parse_ndjson_lossy(&input_data);
            let reasons: Vec<String> = skipped
                .iter()
                .map(|s| format!("line {}: {}", s.line, s.reason))
                .collect();
            (events, reasons)
        }
    };

    let ordering_error = EventLogAdapter::check_ordering(&events)
        .err()
        .map(|e| e.to_string());

    let invalid = skipped.len() + usize::from(ordering_error.is_some());

    if json {
        let report = serde_json::json!({
            "events": events.len(),
            "invalid": invalid,
            "skipped_lines": skipped,
            "ordering_error": ordering_error,
        });
        println!("{}", serde_json::to_string_pretty(&report).map_err(ProfileError::JsonError)?);
    } else {
        println!("Parsed {} event(s)", events.len());
        for reason in &skipped {
            println!("  skipped {reason}");
        }
        if let Some(reason) = &ordering_error {
            println!("  {reason}");
        }
    }

    if invalid > 0 {
        Err(CliError::ValidationFailed(invalid))
    } else {
        Ok(())
    }
}

fn read_input(input: &PathBuf) -> Result<String, CliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn report_failure(json: bool, reason: &str) {
    if json {
        println!("{}", serde_json::json!({ "events": 0, "invalid": 1, "error": reason }));
    } else {
        println!("  {reason}");
    }
}
