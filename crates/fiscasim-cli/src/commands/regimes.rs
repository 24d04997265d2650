use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fiscasim_core::micro::{compute_micro, MicroInput};
use fiscasim_core::reel::{compute_reel, ReelInput};
use fiscasim_core::ActivityType;

use crate::input;

/// Arguments for the micro-regime calculation
#[derive(Args)]
pub struct MicroArgs {
    /// Annual revenue (chiffre d'affaires), in euros
    #[arg(long, alias = "ca")]
    pub revenue: Option<Decimal>,

    /// Annual deductible expenses (charges), in euros
    #[arg(long)]
    pub expenses: Option<Decimal>,

    /// Activity type: VENTE_BIC, SERVICE_BIC, LIBERAL_BNC_AUTRE, LIBERAL_BNC_CIPAV
    #[arg(long)]
    pub activity: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the régime-réel calculation
#[derive(Args)]
pub struct ReelArgs {
    /// Annual revenue (chiffre d'affaires), in euros
    #[arg(long, alias = "ca")]
    pub revenue: Option<Decimal>,

    /// Annual deductible expenses (charges), in euros
    #[arg(long)]
    pub expenses: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_micro(args: MicroArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let micro_input: MicroInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let activity: ActivityType = args
            .activity
            .ok_or("--activity is required (or provide --input)")?
            .parse()?;
        MicroInput {
            annual_revenue: args
                .revenue
                .ok_or("--revenue is required (or provide --input)")?,
            annual_expenses: args.expenses.unwrap_or(Decimal::ZERO),
            activity,
        }
    };

    let result = compute_micro(&micro_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_reel(args: ReelArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let reel_input: ReelInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ReelInput {
            annual_revenue: args
                .revenue
                .ok_or("--revenue is required (or provide --input)")?,
            annual_expenses: args.expenses.unwrap_or(Decimal::ZERO),
        }
    };

    let result = compute_reel(&reel_input)?;
    Ok(serde_json::to_value(result)?)
}
