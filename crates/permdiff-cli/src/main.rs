//! Command-line interface for `permdiff`.
//!
//! Compares two Salesforce `Profile` or `PermissionSet` metadata files and
//! writes a standalone report. Without positional inputs the tool scans a
//! directory (the working directory by default) for exactly two `.xml`
//! files.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use permdiff_core::{ReportConfig, ReportFormat, RunConfig, DEFAULT_OUTPUT, DEFAULT_TITLE};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PERMDIFF_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "permdiff",
    version,
    about = "Compare two Salesforce Profile or PermissionSet metadata files",
    override_usage = "permdiff [OPTIONS] [FILE1 FILE2]"
)]
struct Cli {
    /// Directory scanned for input documents when no files are given.
    #[arg(short = 'd', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Report destination.
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Report format (`html` or `json`).
    #[arg(short = 'f', long = "format", default_value = "html")]
    format: ReportFormat,

    /// Heading of the HTML report.
    #[arg(long = "title", default_value = DEFAULT_TITLE)]
    title: String,

    /// Raise log verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Only print errors.
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue, conflicts_with = "verbose")]
    quiet: bool,

    /// Emit log lines as JSON.
    #[arg(long = "log-json", action = ArgAction::SetTrue)]
    log_json: bool,

    /// Explicit inputs (FILE1 FILE2).
    #[arg()]
    inputs: Vec<PathBuf>,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = RunConfig::default()
            .with_dir(&self.dir)
            .with_output(&self.output)
            .with_format(self.format)
            .with_report(ReportConfig::new().with_title(&self.title));
        match self.inputs.len() {
            0 => {}
            2 => config = config.with_inputs(self.inputs.iter().cloned()),
            found => bail!("expected FILE1 and FILE2, got {found} input path(s)"),
        }
        Ok(config)
    }
}

fn main() {
    match try_main() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let _ = writeln!(io::stderr(), "error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn try_main() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = cli.run_config()?;
    let outcome = permdiff_core::run(&config)
        .with_context(|| format!("cannot produce {}", config.output().display()))?;
    tracing::debug!(
        sections = outcome.sections,
        only_in_left = outcome.totals.only_in_left,
        only_in_right = outcome.totals.only_in_right,
        differing = outcome.totals.differing,
        "comparison finished"
    );
    println!("Comparison report written to {}", outcome.output.display());
    Ok(0)
}

fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(cli.verbose, cli.quiet)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false);
    // A subscriber may already be installed when embedded; keep that one.
    let _ = if cli.log_json {
        builder.json().try_init()
    } else {
        builder.without_time().try_init()
    };
}
