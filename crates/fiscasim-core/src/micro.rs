use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::bareme::TaxSchedule;
use crate::types::*;
use crate::FiscalResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicroInput {
    pub annual_revenue: Money,
    pub annual_expenses: Money,
    pub activity: ActivityType,
}

/// Outcome of the micro regime. Fully derived from the input; no identity,
/// no mutation after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroRegimeResult {
    pub taxable_income: Money,
    pub tax_amount: Money,
    pub allowance_applied: Money,
    pub allowance_rate: Rate,
    pub social_contributions_rate: Rate,
    pub cfp_rate: Rate,
    pub social_contributions: Money,
    pub cfp_contribution: Money,
    pub total_contributions: Money,
    pub net_income_after_all: Money,
}

impl MicroRegimeResult {
    /// Zeroed placeholder carrying the activity's rates. Used by the
    /// orchestrator so callers never observe an undefined numeric field.
    pub fn neutral(activity: ActivityType) -> Self {
        let table = rate_table(activity);
        MicroRegimeResult {
            taxable_income: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            allowance_applied: Decimal::ZERO,
            allowance_rate: table.allowance_rate,
            social_contributions_rate: table.social_contribution_rate,
            cfp_rate: table.cfp_rate,
            social_contributions: Decimal::ZERO,
            cfp_contribution: Decimal::ZERO,
            total_contributions: Decimal::ZERO,
            net_income_after_all: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate the micro regime for one year of activity.
///
/// Income tax applies to revenue net of the flat-rate allowance (abattement,
/// floored at 305 and capped at revenue). Social contributions and the CFP
/// levy apply to gross revenue: French contribution assessment ignores the
/// professional-expense allowance. Actual expenses only enter the final net,
/// so callers can compare real disposable income across regimes.
pub fn compute_micro(
    input: &MicroInput,
) -> FiscalResult<ComputationOutput<MicroRegimeResult>> {
    let schedule = TaxSchedule::france_2024();
    compute_micro_with_schedule(input, &schedule)
}

/// Same as [`compute_micro`] but against a caller-supplied barème.
pub fn compute_micro_with_schedule(
    input: &MicroInput,
    schedule: &TaxSchedule,
) -> FiscalResult<ComputationOutput<MicroRegimeResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // Negative amounts are clamped, not rejected: the regime is defined on
    // the non-negative domain.
    let revenue = input.annual_revenue.max(Decimal::ZERO);
    let expenses = input.annual_expenses.max(Decimal::ZERO);
    if revenue != input.annual_revenue {
        warnings.push("Negative annual revenue clamped to 0".to_string());
    }
    if expenses != input.annual_expenses {
        warnings.push("Negative annual expenses clamped to 0".to_string());
    }

    let table = rate_table(input.activity);

    let allowance = (revenue * table.allowance_rate)
        .max(table.min_allowance)
        .min(revenue)
        .round_dp(2);
    let taxable_income = (revenue - allowance).max(Decimal::ZERO).round_dp(2);
    let tax_amount = schedule.income_tax(taxable_income);

    let social_contributions = (revenue * table.social_contribution_rate).round_dp(2);
    let cfp_contribution = (revenue * table.cfp_rate).round_dp(2);
    let total_contributions = social_contributions + cfp_contribution;

    let net_income_after_all =
        (revenue - expenses - tax_amount - social_contributions - cfp_contribution).round_dp(2);

    if expenses > allowance {
        warnings.push(format!(
            "Charges réelles ({expenses}) supérieures à l'abattement forfaitaire ({allowance}) : \
             le régime réel mérite un examen attentif."
        ));
    }

    let result = MicroRegimeResult {
        taxable_income,
        tax_amount,
        allowance_applied: allowance,
        allowance_rate: table.allowance_rate,
        social_contributions_rate: table.social_contribution_rate,
        cfp_rate: table.cfp_rate,
        social_contributions,
        cfp_contribution,
        total_contributions,
        net_income_after_all,
    };

    let assumptions = serde_json::json!({
        "activity": input.activity,
        "annual_revenue": revenue.to_string(),
        "annual_expenses": expenses.to_string(),
        "rate_table": table,
        "schedule": schedule.label,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Micro regime: progressive income tax on allowance-reduced revenue, \
         social contributions and CFP levy on gross revenue",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
