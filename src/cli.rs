//! CLI argument parsing and run dispatch

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{ArgAction, Parser};

use chang::config::{RevRange, RunConfig};
use chang::defaults::{DEFAULT_GIT_TIMEOUT_SECS, DEFAULT_WORKDIR};
use chang::error::Error;
use chang::exit_codes;
use chang::filter::PatternSet;
use chang::git::GitCli;
use chang::output::{failure_text, OutputConfig};
use chang::pipeline;

/// Git Changelog Generator - collect one-line commit messages from many repositories
#[derive(Parser, Debug)]
#[command(name = "chang")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Tag or commit to start from (exclusive, git range semantics)
    #[arg(short = 's', long, value_name = "TAG")]
    start_tag: Option<String>,

    /// Do not look at commits past this tag or commit (inclusive)
    #[arg(short = 'e', long, value_name = "TAG")]
    end_tag: Option<String>,

    /// Read the list of repositories from FILE, one URL per line
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Write the changelog to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Drop commits that do NOT match PATTERN (all patterns must match)
    #[arg(long = "match", value_name = "PATTERN", num_args = 1.., action = ArgAction::Append)]
    include: Vec<String>,

    /// Drop commits that match PATTERN
    #[arg(long, value_name = "PATTERN", num_args = 1.., action = ArgAction::Append)]
    exclude: Vec<String>,

    /// Start fresh: remove previously cloned repositories
    #[arg(short, long)]
    clean: bool,

    /// Do not print progress messages
    #[arg(short, long)]
    quiet: bool,

    /// Only look at the named repositories from the input file
    #[arg(short = 'r', long = "repo", value_name = "REPO", num_args = 1.., action = ArgAction::Append)]
    restrict: Vec<String>,

    /// Directory holding the local clones
    #[arg(long, value_name = "DIR", env = "CHANG_WORKDIR", default_value = DEFAULT_WORKDIR)]
    workdir: PathBuf,

    /// Seconds to wait for each git command before giving up
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_GIT_TIMEOUT_SECS)]
    timeout: u64,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::from_env_and_flag(&self.color)
    }

    /// Execute the run and return the process exit status.
    pub fn execute(self) -> Result<i32> {
        init_logging(&self.log_level, self.quiet);
        let style = self.output_config();

        let range = RevRange::from_bounds(self.start_tag, self.end_tag)?;
        let patterns = PatternSet::new(&self.include, &self.exclude)?;

        let mut config = RunConfig::new(self.input)
            .with_workdir(self.workdir)
            .with_range(range)
            .with_patterns(patterns)
            .with_restrict(self.restrict)
            .with_clean(self.clean)
            .with_quiet(self.quiet)
            .with_git_timeout(Duration::from_secs(self.timeout));
        if let Some(output) = self.output {
            config = config.with_output(output);
        }

        let provider = GitCli::new(config.git_timeout);
        let report = pipeline::run(&config, &provider, &style)?;

        if !report.is_success() {
            let names: Vec<_> = report
                .scrape_failures
                .iter()
                .map(|f| f.name.as_str())
                .collect();
            log::error!("could not extract commits from: {}", names.join(", "));
        }

        Ok(report.exit_code())
    }
}

/// Set up `env_logger`. `RUST_LOG` takes precedence over `--log-level`;
/// `--quiet` lowers the default to warnings.
fn init_logging(level: &str, quiet: bool) {
    let level = if quiet { "warn" } else { level };
    let env = env_logger::Env::default().default_filter_or(level);

    let _ = env_logger::Builder::from_env(env)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            other => writeln!(
                buf,
                "{}: {}",
                other.as_str().to_lowercase(),
                record.args()
            ),
        })
        .try_init();
}

/// Print a fatal error to stderr and map it to an exit status.
pub fn report_error(err: &anyhow::Error, style: &OutputConfig) -> i32 {
    eprintln!("error: {:#}", err);

    match err.downcast_ref::<Error>() {
        Some(error) => {
            if let Error::GitCommand { output, .. } = error {
                if !output.is_empty() {
                    eprintln!("{}", failure_text(style, output));
                }
            }
            error.exit_code()
        }
        None => exit_codes::ERROR,
    }
}
