//! CleanCopy - copy a project directory without its build outputs and caches.
//!
//! Thin command-line front end over the copy engine: it resolves and checks
//! the two paths, shows progress, prints the summary and turns the result
//! into an exit status.

mod progress;
mod prompt;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use cleancopy_engine::{CopyEngine, IgnoreSet, Interrupt};
use log::debug;
use std::io::IsTerminal;
use std::path::PathBuf;
use crate::progress::{CliProgress, ProgressMode};
use crate::report::{EXIT_INTERRUPTED, EXIT_USAGE};

/// CleanCopy - copy a directory tree, skipping build outputs, caches and dependencies
#[derive(Parser, Debug)]
#[command(name = "cleancopy")]
#[command(version)]
#[command(about = "Copy a directory tree, skipping node_modules, build outputs, caches and temp dirs")]
struct Args {
    /// Source directory (prompted for, or the current directory, if omitted)
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Destination directory, created if missing (prompted for if omitted)
    #[arg(value_name = "DESTINATION")]
    destination: Option<PathBuf>,

    /// Additional directory name to skip (repeatable)
    #[arg(long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,

    /// Do not skip the built-in directory names
    #[arg(long)]
    no_default_ignores: bool,

    /// Never prompt; a missing destination is an error
    #[arg(long)]
    no_prompt: bool,

    /// Print the run statistics as JSON on stdout instead of the summary
    #[arg(long)]
    json: bool,

    /// Print every directory and file as it is copied
    #[arg(long, short, conflicts_with = "quiet")]
    verbose: bool,

    /// No progress output, only the summary
    #[arg(long, short)]
    quiet: bool,
}

impl Args {
    fn ignore_set(&self) -> IgnoreSet {
        let base = if self.no_default_ignores {
            IgnoreSet::empty()
        } else {
            IgnoreSet::default()
        };
        base.with_extra(self.ignore.iter().cloned())
    }

    fn progress_mode(&self) -> ProgressMode {
        if self.quiet || self.json {
            ProgressMode::Silent
        } else if self.verbose {
            ProgressMode::Lines
        } else if std::io::stderr().is_terminal() {
            ProgressMode::Spinner
        } else {
            ProgressMode::Silent
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    let exit_code = match run_cli(&args, install_interrupt_handler) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_USAGE
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(args: &Args) {
    let default_level = if args.verbose { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// First Ctrl-C stops the walk and still prints the summary; a second one exits at once.
fn install_interrupt_handler(interrupt: Interrupt) -> Result<()> {
    ctrlc::set_handler(move || {
        if interrupt.trigger() {
            eprintln!("\nInterrupted; stopping after the current entry (Ctrl-C again to quit now)");
        } else {
            std::process::exit(EXIT_INTERRUPTED);
        }
    })
    .context("failed to install Ctrl-C handler")
}

/// Main CLI logic - separated for testability. Returns the process exit code.
///
/// `arm_interrupt` hooks the run's interrupt flag up to Ctrl-C. It is only
/// called once both paths are settled, so Ctrl-C at a prompt still ends the
/// process straight away.
fn run_cli(args: &Args, arm_interrupt: impl FnOnce(Interrupt) -> Result<()>) -> Result<i32> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let interactive = !args.no_prompt && std::io::stdin().is_terminal();

    let (source, destination) = prompt::resolve_paths(
        args.source.as_deref(),
        args.destination.as_deref(),
        interactive,
        &cwd,
        &mut std::io::stdin().lock(),
        &mut std::io::stderr(),
    )?;
    prompt::validate_paths(&source, &destination)?;

    let interrupt = Interrupt::new();
    if let Err(e) = arm_interrupt(interrupt.clone()) {
        eprintln!("Warning: {:#}", e);
    }

    let ignore = args.ignore_set();
    debug!("ignoring directories named: {}", ignore.sorted_names().join(", "));

    let engine = CopyEngine::new(ignore).with_interrupt(interrupt);
    let progress = CliProgress::new(args.progress_mode());
    let stats = engine.run_with_progress(&source, &destination, Some(&progress));

    if args.json {
        let json = serde_json::to_string_pretty(&stats).context("failed to serialize stats")?;
        println!("{}", json);
    } else {
        eprint!("{}", report::render_summary(&stats));
    }

    Ok(report::exit_code(&stats))
}
