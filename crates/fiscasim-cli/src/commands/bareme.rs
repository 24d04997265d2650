use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fiscasim_core::bareme::TaxSchedule;

/// Arguments for the barème-only income-tax calculation
#[derive(Args)]
pub struct IncomeTaxArgs {
    /// Taxable income after regime-specific deductions, in euros
    #[arg(long)]
    pub taxable: Decimal,
}

pub fn run_income_tax(args: IncomeTaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule = TaxSchedule::france_2024();
    let tax = schedule.income_tax(args.taxable);

    Ok(serde_json::json!({
        "result": {
            "taxable_income": args.taxable.to_string(),
            "tax_amount": tax.to_string(),
            "schedule": schedule.label,
        }
    }))
}
