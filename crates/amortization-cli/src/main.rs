mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::interactive::InteractiveArgs;
use commands::schedule::ScheduleArgs;

/// Loan amortization schedules with fixed overpayment
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortization schedules with fixed overpayment",
    long_about = "Compute a period-by-period amortization schedule for a fixed-rate loan, \
                  optionally with a constant overpayment each month. Reports payment, \
                  interest and principal per period, early payoff, and total interest."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute an amortization schedule
    Schedule(ScheduleArgs),
    /// Read `field=value` lines from stdin and recompute after each change
    Interactive(InteractiveArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amort=warn,amortization_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result: Result<Option<serde_json::Value>, Box<dyn std::error::Error>> = match cli.command
    {
        Commands::Schedule(args) => commands::schedule::run_schedule(args).map(Some),
        Commands::Interactive(args) => {
            commands::interactive::run_interactive(args, cli.output).map(|_| None)
        }
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(Some(value)) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Ok(None) => process::exit(0),
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
