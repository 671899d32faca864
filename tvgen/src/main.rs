//! # tvgen
//!
//! A CLI tool turning annotated CSV test-vector tables into testbench files.
//!
//! ## Overview
//!
//! tvgen is built on top of tvgenlib. It reads one table and writes two
//! text files next to it: `<name>-inputs.txt` with the stimulus words and
//! `<name>-expected.txt` with the expected output words, one line per cycle.
//!
//! ## Usage
//!
//! ```bash
//! # Convert a table
//! tvgen vectors/alu.csv
//!
//! # Model a two flip-flop synchronizer in front of the design
//! tvgen vectors/alu.csv --sync-delay
//!
//! # Look up F::lut tables relative to another directory
//! tvgen vectors/alu.csv --tables-dir vectors/luts
//!
//! # Write the output somewhere else, with debug logging
//! tvgen vectors/alu.csv --output-dir build/vectors -vv
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::Style;
use tracing_subscriber::EnvFilter;
use tvgenlib::{convert_file, discard_outputs, write_streams, ConvertOptions, OutputPaths};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("tvgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert annotated CSV test vectors into testbench input and expected-output files")
        .arg(
            Arg::new("file")
                .help("CSV table to convert")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("sync-delay")
                .long("sync-delay")
                .action(ArgAction::SetTrue)
                .help("Add two cycles of latency for an input synchronizer"),
        )
        .arg(
            Arg::new("tables-dir")
                .short('t')
                .long("tables-dir")
                .value_parser(value_parser!(PathBuf))
                .help("Directory relative lookup-table paths are resolved against"),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_parser(value_parser!(PathBuf))
                .help("Directory for the output files (defaults to the table's directory)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
}

/// Install the log subscriber. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build conversion options from matches
fn extract_options(matches: &ArgMatches) -> ConvertOptions {
    let mut options = ConvertOptions::new().sync_delay(matches.get_flag("sync-delay"));
    if let Some(dir) = matches.get_one::<PathBuf>("tables-dir") {
        options = options.tables_dir(dir);
    }
    options
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let table = matches
        .get_one::<PathBuf>("file")
        .context("missing input file")?;
    let output_dir = matches.get_one::<PathBuf>("output-dir");
    let options = extract_options(matches);

    let paths = OutputPaths::for_table(table, output_dir.map(|p| p.as_path()));

    // Old output must not survive a failed run.
    discard_outputs(&paths)?;

    let streams = convert_file(table, &options)
        .with_context(|| format!("failed to convert '{}'", table.display()))?;
    write_streams(&streams, &paths)?;

    let label = Style::new().green().bold();
    println!(
        "{} {} ({} lines)",
        label.apply_to("Wrote"),
        paths.inputs.display(),
        streams.inputs.len()
    );
    println!(
        "{} {} ({} lines)",
        label.apply_to("Wrote"),
        paths.expected.display(),
        streams.expected.len()
    );
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
