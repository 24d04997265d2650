mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::bareme::IncomeTaxArgs;
use commands::feedback::FeedbackArgs;
use commands::regimes::{MicroArgs, ReelArgs};
use commands::simulate::SimulateArgs;

/// Micro-entrepreneur tax-regime simulator
#[derive(Parser)]
#[command(
    name = "fiscasim",
    version,
    about = "Micro vs régime réel tax simulation for French micro-entrepreneurs",
    long_about = "Simulates net tax and social-contribution outcomes for a business year \
                  under the Micro and Réel French tax regimes, with decimal precision and \
                  an advisory comparison. Indicative only — not regulatory advice."
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
    /// Run the full simulation (both regimes + recommendation)
    Simulate(SimulateArgs),
    /// Micro-regime calculation only
    Micro(MicroArgs),
    /// Régime-réel calculation only
    Reel(ReelArgs),
    /// Progressive income tax on a taxable amount (barème only)
    IncomeTax(IncomeTaxArgs),
    /// Submit free-text feedback (simulated sink)
    Feedback(FeedbackArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Micro(args) => commands::regimes::run_micro(args),
        Commands::Reel(args) => commands::regimes::run_reel(args),
        Commands::IncomeTax(args) => commands::bareme::run_income_tax(args),
        Commands::Feedback(args) => commands::feedback::run_feedback(args),
        Commands::Version => {
            println!("fiscasim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
