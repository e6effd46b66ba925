use anyhow::Context;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;

use crate::cli::formatters::{format_calculation_table, format_outcomes_json};
use crate::cli::{Cli, Commands};
use capital_gains::commands::Command;
use capital_gains::config::Config;
use capital_gains::dispatcher::Session;
use capital_gains::error::Result;
use capital_gains::importers::{import_file, read_requests, to_commands, Request};
use capital_gains::tax::TaxRules;

/// How calculations are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One JSON line per request
    Json,
    /// Breakdown table per request
    Table,
}

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub rules: TaxRules,
    pub strict: bool,
    pub mode: OutputMode,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            rules: TaxRules::default(),
            strict: false,
            mode: OutputMode::Json,
        }
    }
}

/// Execute the parsed command line
pub fn run_cli(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::discover(cli.config.as_deref())?;
    let rules = config.tax_rules()?;

    let (input, mode) = match cli.command {
        None => (None, OutputMode::Json),
        Some(Commands::Calculate { input }) => (input, OutputMode::Json),
        Some(Commands::Report { input }) => (input, OutputMode::Table),
    };

    let options = RunOptions {
        rules,
        strict: cli.strict,
        mode,
    };

    let stdout = io::stdout();
    let mut writer = stdout.lock();

    match input {
        Some(path) => run_file(&path, &mut writer, &options),
        None => run(io::stdin().lock(), &mut writer, &options),
    }
}

fn run_file<W: Write>(path: &Path, writer: &mut W, options: &RunOptions) -> Result<()> {
    let requests = import_file(path)?;
    process_requests(&requests, writer, options)
}

/// Read every request from `reader` and write one result per request
pub fn run<R: BufRead, W: Write>(reader: R, writer: &mut W, options: &RunOptions) -> Result<()> {
    let requests = read_requests(reader).context("failed to read operations")?;
    process_requests(&requests, writer, options)
}

/// Evaluate already-read requests, each on its own fresh position
///
/// Every request is validated before anything is written, so malformed input
/// never yields partial output.
pub fn process_requests<W: Write>(
    requests: &[Request],
    writer: &mut W,
    options: &RunOptions,
) -> Result<()> {
    info!("Processing {} requests", requests.len());

    let batches = requests
        .iter()
        .map(|request| {
            to_commands(request)
                .with_context(|| format!("invalid request on line {}", request.line))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut session = Session::new(options.rules, options.strict);

    for (request, commands) in requests.iter().zip(batches) {
        session
            .dispatch_all(commands.into_iter().chain(std::iter::once(Command::Calculate)))
            .with_context(|| format!("request on line {} failed", request.line))?;

        for calculation in session.take_calculations() {
            match options.mode {
                OutputMode::Json => {
                    writeln!(writer, "{}", format_outcomes_json(&calculation.outcomes())?)?
                }
                OutputMode::Table => {
                    write!(writer, "{}", format_calculation_table(&calculation, request.line))?
                }
            }
        }
        writer.flush()?;
    }

    Ok(())
}
