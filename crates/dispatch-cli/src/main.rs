#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use chrono::Timelike;
use clap::{Parser, Subcommand};
use dispatch_core::{FileBacking, Store};
use output::{CliError, OutputMode, render_error};
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "dispatch: single-file incident ticket log",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Log a new incident ticket",
        after_help = "EXAMPLES:\n    # Log a ticket\n    dsp add --incident INC042 --agent \"Agent 1\"\n\n    # Emit machine-readable output\n    dsp add --incident INC042 --agent \"Agent 1\" --json"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        about = "Delete a ticket by id",
        after_help = "EXAMPLES:\n    # Delete record 3\n    dsp rm 3"
    )]
    Rm(cmd::rm::RmArgs),

    #[command(
        about = "List tickets (today by default)",
        after_help = "EXAMPLES:\n    # Today's tickets\n    dsp list\n\n    # The whole month document\n    dsp list --all"
    )]
    List(cmd::list::ListArgs),

    #[command(
        about = "Per-agent tallies for today and this month",
        after_help = "EXAMPLES:\n    dsp stats\n    dsp stats --json"
    )]
    Stats(cmd::stats::StatsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DISPATCH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "dispatch=debug,info"
        } else {
            "dispatch=info,warn"
        })
    });

    let format = env::var("DISPATCH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let config = config::load()?;
    let data_dir = config.data_dir()?;

    // Second precision everywhere: on disk and in comparisons.
    let now = chrono::Local::now().naive_local();
    let now = now.with_nanosecond(0).unwrap_or(now);

    // The document is keyed by the current year-month at open time, so the
    // log rolls over to a fresh file at month boundaries by itself.
    let backing = FileBacking::for_month(&data_dir, now);
    let mut store = match Store::open(Box::new(backing)) {
        Ok(store) => store,
        Err(err) => {
            render_error(output, &CliError::from_store(&err))?;
            anyhow::bail!("{err}");
        }
    };

    match cli.command {
        Commands::Add(ref args) => cmd::add::run_add(args, &mut store, &config, output, now),
        Commands::Rm(ref args) => cmd::rm::run_rm(args, &mut store, output),
        Commands::List(ref args) => cmd::list::run_list(args, &store, output, now),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, &store, output, now),
    }
}
