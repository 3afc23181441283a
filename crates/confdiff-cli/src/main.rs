//! `confdiff` CLI — semantic differences between YAML/JSON files.
//!
//! ## Usage
//!
//! ```sh
//! # Human-readable report
//! confdiff between old.yml new.yml
//!
//! # JSON report, ignoring metadata
//! confdiff between old.yml new.yml --output json --exclude /metadata
//!
//! # Read one side from stdin, fail the pipeline on differences
//! helm template chart | confdiff between deployed.yml - --set-exit-code
//!
//! # Count additions, removals and modifications
//! confdiff stats old.json new.json
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use confdiff_core::decode::{from_json_str, from_yaml_str};
use confdiff_core::{compare_streams, exclude_stream_paths, render_json, render_text, Summary, Value};
use std::io::{self, Read};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Exit code when no differences were found (or `--set-exit-code` is off).
const EXIT_NO_CHANGES: i32 = 0;

/// Exit code when differences were found and `--set-exit-code` is on.
const EXIT_CHANGES_FOUND: i32 = 1;

/// Exit code for any error (unreadable file, invalid document, bad pattern).
const EXIT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(
    name = "confdiff",
    version,
    about = "Semantic differences between YAML/JSON configuration files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the differences between two files
    Between {
        /// Source file ("-" for stdin)
        from: String,
        /// Target file ("-" for stdin)
        to: String,
        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
        output: OutputFormat,
        /// Drop differences at or below this path (repeatable), e.g. /metadata/labels; write `/` inside a key as ~1
        #[arg(short, long, value_name = "PATTERN")]
        exclude: Vec<String>,
        /// Input format of both files
        #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
        format: InputFormat,
        /// Exit with status 1 when differences are found
        #[arg(long)]
        set_exit_code: bool,
    },
    /// Count additions, removals and modifications between two files
    Stats {
        /// Source file ("-" for stdin)
        from: String,
        /// Target file ("-" for stdin)
        to: String,
        /// Input format of both files
        #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
        format: InputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum InputFormat {
    /// `.json` files as JSON, everything else as YAML
    Auto,
    Yaml,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(EXIT_ERROR);
        }
    }
}

fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Between {
            from,
            to,
            output,
            exclude,
            format,
            set_exit_code,
        } => {
            let (from_docs, to_docs) = load_pair(&from, &to, format)?;
            let patterns: Vec<&str> = exclude.iter().map(|s| s.as_str()).collect();
            let results = exclude_stream_paths(compare_streams(&from_docs, &to_docs), &patterns)
                .context("Failed to apply --exclude patterns")?;

            let report = match output {
                OutputFormat::Human => render_text(&results)?,
                OutputFormat::Json => render_json(&results)?,
            };
            print!("{}", report);
            if matches!(output, OutputFormat::Json) {
                println!();
            }

            let summary = Summary::from_stream(&results);
            info!(%summary, "comparison finished");
            if set_exit_code && !summary.is_empty() {
                Ok(EXIT_CHANGES_FOUND)
            } else {
                Ok(EXIT_NO_CHANGES)
            }
        }
        Commands::Stats { from, to, format } => {
            let (from_docs, to_docs) = load_pair(&from, &to, format)?;
            let summary = Summary::from_stream(&compare_streams(&from_docs, &to_docs));
            println!("Additions:      {}", summary.additions);
            println!("Removals:       {}", summary.removals);
            println!("Modifications:  {}", summary.modifications);
            Ok(EXIT_NO_CHANGES)
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_pair(from: &str, to: &str, format: InputFormat) -> Result<(Vec<Value>, Vec<Value>)> {
    if from == "-" && to == "-" {
        anyhow::bail!("Only one of the two inputs can be read from stdin");
    }
    Ok((load_documents(from, format)?, load_documents(to, format)?))
}

/// Read and decode every document of one input.
fn load_documents(path: &str, format: InputFormat) -> Result<Vec<Value>> {
    let text = read_input(path)?;
    let json = match format {
        InputFormat::Json => true,
        InputFormat::Yaml => false,
        InputFormat::Auto => path.ends_with(".json"),
    };
    let documents = if json {
        vec![from_json_str(&text).with_context(|| format!("Failed to parse JSON from {}", display_name(path)))?]
    } else {
        from_yaml_str(&text).with_context(|| format!("Failed to parse YAML from {}", display_name(path)))?
    };
    info!(input = display_name(path), documents = documents.len(), "loaded input");
    Ok(documents)
}

fn display_name(path: &str) -> &str {
    if path == "-" {
        "stdin"
    } else {
        path
    }
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
    }
}
