use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fiscasim_core::advisory::ComparativeAdvisor;
use fiscasim_core::simulation::{simulate, SimulationInput};

use crate::input;

/// Arguments for the full two-regime simulation
#[derive(Args)]
pub struct SimulateArgs {
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

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: SimulationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SimulationInput {
            annual_revenue: args
                .revenue
                .ok_or("--revenue is required (or provide --input)")?,
            annual_expenses: args.expenses.unwrap_or(Decimal::ZERO),
            activity_type: args
                .activity
                .ok_or("--activity is required (or provide --input)")?,
        }
    };

    // Validation failures surface inside the result, never as a process error.
    let result = simulate(&sim_input, &ComparativeAdvisor);
    Ok(serde_json::to_value(result)?)
}
