//! CLI entry point for repo-manager.
//!
//! This module is intentionally thin: it handles argument parsing, logging
//! setup, output and exit codes. All business logic lives in `repomgr-app`.

#![forbid(unsafe_code)]

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use repomgr_app::{
    CheckInput, EXIT_ERROR, ExplainOutput, ReportFormat, format_explanation, format_not_found,
    git_resolver, read_spec, render_report, run_check, run_explain, verdict_exit_code, write_text,
};
use repomgr_settings::{DEFAULT_NETWORK_TIMEOUT_SECS, RunOptions};
use repomgr_types::ids;
use std::io::Write;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "REPO_MANAGER_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "repo-manager",
    version,
    about = "Policy compliance checker for Go module repositories"
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). Overrides REPO_MANAGER_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check every repository in the spec against its policies.
    Run {
        /// Path to the spec file.
        #[arg(long, env = "REPO_MANAGER_SPEC", default_value = ids::DEFAULT_SPEC_FILENAME)]
        spec: Utf8PathBuf,

        /// SSH private key used to list remote tags for `latest`. `$VAR` and `${VAR}` are expanded.
        #[arg(long, env = "REPO_MANAGER_PRIVATE_KEY", default_value = ids::DEFAULT_PRIVATE_KEY)]
        private_key: String,

        /// Timeout for each remote tag lookup, in seconds (0 disables it).
        #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_NETWORK_TIMEOUT_SECS)]
        network_timeout: u64,

        /// Report format.
        #[arg(long, value_enum, default_value_t = FormatArg::Table)]
        format: FormatArg,

        /// Write the report to a file instead of stdout.
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a rule with its params and remediation guidance.
    Explain {
        /// Rule name, e.g. `go-dep-module-min-version`.
        rule: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Table,
    Markdown,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => ReportFormat::Table,
            FormatArg::Markdown => ReportFormat::Markdown,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match dispatch(cli.cmd) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("repo-manager: {err:#}");
            EXIT_ERROR
        }
    };
    std::process::exit(code);
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(cmd: Commands) -> anyhow::Result<i32> {
    match cmd {
        Commands::Run {
            spec,
            private_key,
            network_timeout,
            format,
            output,
        } => {
            let options = RunOptions {
                private_key,
                network_timeout_secs: network_timeout,
            };
            cmd_run(&spec, &options, format.into(), output)
        }
        Commands::Explain { rule } => Ok(cmd_explain(&rule)),
    }
}

fn cmd_run(
    spec_path: &Utf8Path,
    options: &RunOptions,
    format: ReportFormat,
    output: Option<Utf8PathBuf>,
) -> anyhow::Result<i32> {
    debug!(spec = %spec_path, format = format.as_str(), "starting run");
    let spec_text = read_spec(spec_path)?;
    let resolver = git_resolver(options);

    let result = run_check(CheckInput {
        spec_text: &spec_text,
        resolver: &resolver,
    })?;

    let rendered = render_report(&result.report, format)?;
    match output {
        Some(path) => write_text(&path, &rendered).context("write report")?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("write report")?;
        }
    }

    Ok(verdict_exit_code(result.verdict()))
}

fn cmd_explain(rule: &str) -> i32 {
    match run_explain(rule) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            0
        }
        ExplainOutput::NotFound {
            rule,
            available_rules,
        } => {
            eprint!("{}", format_not_found(&rule, available_rules));
            1
        }
    }
}
