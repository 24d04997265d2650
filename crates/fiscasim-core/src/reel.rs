use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::bareme::TaxSchedule;
use crate::types::*;
use crate::FiscalResult;

/// TNS social-contribution rate applied under the régime réel, assessed on
/// profit net of the contributions themselves.
pub const REEL_CONTRIBUTION_RATE: Rate = dec!(0.45);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelInput {
    pub annual_revenue: Money,
    pub annual_expenses: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelRegimeResult {
    pub taxable_income: Money,
    pub tax_amount: Money,
    pub estimated_social_contributions_rate: Rate,
    pub estimated_social_contributions: Money,
    pub net_income_after_all_contributions: Money,
}

impl ReelRegimeResult {
    /// Zeroed placeholder; see [`crate::micro::MicroRegimeResult::neutral`].
    pub fn neutral() -> Self {
        ReelRegimeResult {
            taxable_income: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            estimated_social_contributions_rate: REEL_CONTRIBUTION_RATE,
            estimated_social_contributions: Decimal::ZERO,
            net_income_after_all_contributions: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate the régime réel for one year of activity.
///
/// Contributions are defined implicitly: they equal `f` times the profit
/// remaining after deducting them, `C = f * (P - C)`. That fixed point has
/// the exact algebraic solution `C = P * f / (1 + f)`; no iteration is
/// involved. Income tax then applies to `P - C`, and contributions are not
/// subtracted a second time from the final net.
pub fn compute_reel(input: &ReelInput) -> FiscalResult<ComputationOutput<ReelRegimeResult>> {
    let schedule = TaxSchedule::france_2024();
    compute_reel_with_schedule(input, &schedule)
}

/// Same as [`compute_reel`] but against a caller-supplied barème.
pub fn compute_reel_with_schedule(
    input: &ReelInput,
    schedule: &TaxSchedule,
) -> FiscalResult<ComputationOutput<ReelRegimeResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let revenue = input.annual_revenue.max(Decimal::ZERO);
    let expenses = input.annual_expenses.max(Decimal::ZERO);
    if revenue != input.annual_revenue {
        warnings.push("Negative annual revenue clamped to 0".to_string());
    }
    if expenses != input.annual_expenses {
        warnings.push("Negative annual expenses clamped to 0".to_string());
    }

    let profit_before_contributions = (revenue - expenses).max(Decimal::ZERO);
    if expenses > revenue {
        warnings.push(
            "Charges supérieures au chiffre d'affaires : résultat ramené à zéro".to_string(),
        );
    }

    let f = REEL_CONTRIBUTION_RATE;
    let contributions = (profit_before_contributions * f / (Decimal::ONE + f)).round_dp(2);
    let taxable_income = (profit_before_contributions - contributions).max(Decimal::ZERO);
    let tax_amount = schedule.income_tax(taxable_income);

    // Contributions were already removed in computing the taxable base.
    let net_income_after_all_contributions = (taxable_income - tax_amount).round_dp(2);

    let result = ReelRegimeResult {
        taxable_income: taxable_income.round_dp(2),
        tax_amount,
        estimated_social_contributions_rate: f,
        estimated_social_contributions: contributions,
        net_income_after_all_contributions,
    };

    let assumptions = serde_json::json!({
        "annual_revenue": revenue.to_string(),
        "annual_expenses": expenses.to_string(),
        "contribution_rate": f.to_string(),
        "schedule": schedule.label,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Régime réel: contributions solved in closed form as P*f/(1+f), \
         progressive income tax on profit net of contributions",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn input(revenue: Decimal, expenses: Decimal) -> ReelInput {
        ReelInput {
            annual_revenue: revenue,
            annual_expenses: expenses,
        }
    }

    #[test]
    fn test_fixed_point_identity() {
        // C must satisfy C = f * (P - C) within rounding tolerance.
        for profit in [dec!(1000), dec!(40000), dec!(123456.78)] {
            let out = compute_reel(&input(profit, dec!(0))).unwrap().result;
            let c = out.estimated_social_contributions;
            let rebuilt = (REEL_CONTRIBUTION_RATE * (profit - c)).round_dp(2);
            assert!(
                (c - rebuilt).abs() <= dec!(0.01),
                "P={profit}: C={c}, f*(P-C)={rebuilt}"
            );
        }
    }

    #[test]
    fn test_scenario_revenue_50000_expenses_10000() {
        let out = compute_reel(&input(dec!(50000), dec!(10000))).unwrap().result;

        // P = 40000, C = 40000 * 0.45 / 1.45 = 12413.79
        assert_eq!(out.estimated_social_contributions, dec!(12413.79));
        assert_eq!(out.taxable_income, dec!(27586.21));
        // Taxable sits below 28797: (27586.21 - 11294) * 0.11 = 1792.14
        assert_eq!(out.tax_amount, dec!(1792.14));
        assert_eq!(out.net_income_after_all_contributions, dec!(25794.07));
    }

    #[test]
    fn test_loss_year_is_all_zero() {
        let out = compute_reel(&input(dec!(10000), dec!(25000))).unwrap();

        assert_eq!(out.result.taxable_income, dec!(0));
        assert_eq!(out.result.estimated_social_contributions, dec!(0));
        assert_eq!(out.result.tax_amount, dec!(0));
        assert_eq!(out.result.net_income_after_all_contributions, dec!(0));
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("chiffre d'affaires")));
    }

    #[test]
    fn test_outputs_never_negative() {
        for (revenue, expenses) in [
            (dec!(0), dec!(0)),
            (dec!(-100), dec!(50)),
            (dec!(100), dec!(100)),
            (dec!(100), dec!(5000)),
        ] {
            let out = compute_reel(&input(revenue, expenses)).unwrap().result;
            assert!(out.taxable_income >= dec!(0));
            assert!(out.estimated_social_contributions >= dec!(0));
            assert!(out.tax_amount >= dec!(0));
        }
    }

    #[test]
    fn test_contributions_not_double_counted() {
        let out = compute_reel(&input(dec!(100000), dec!(20000))).unwrap().result;
        // Net is taxable minus tax only; contributions already left the base.
        assert_eq!(
            out.net_income_after_all_contributions,
            out.taxable_income - out.tax_amount
        );
    }
}
