use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FiscalError;
use crate::types::{Money, Rate};
use crate::FiscalResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One slice of the progressive income-tax barème. `upper_limit` is `None`
/// for the unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_limit: Option<Money>,
    pub rate: Rate,
}

/// An ordered progressive tax schedule. Built once, shared immutably; the
/// yearly barème is configuration, not algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSchedule {
    pub label: String,
    pub brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Build a schedule after checking its structural invariants.
    pub fn new(label: &str, brackets: Vec<TaxBracket>) -> FiscalResult<Self> {
        let schedule = TaxSchedule {
            label: label.to_string(),
            brackets,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// French 2024 barème for a single fiscal part.
    pub fn france_2024() -> Self {
        TaxSchedule {
            label: "Barème IR 2024 (1 part)".to_string(),
            brackets: vec![
                TaxBracket {
                    upper_limit: Some(dec!(11294)),
                    rate: dec!(0),
                },
                TaxBracket {
                    upper_limit: Some(dec!(28797)),
                    rate: dec!(0.11),
                },
                TaxBracket {
                    upper_limit: Some(dec!(82341)),
                    rate: dec!(0.30),
                },
                TaxBracket {
                    upper_limit: Some(dec!(177106)),
                    rate: dec!(0.41),
                },
                TaxBracket {
                    upper_limit: None,
                    rate: dec!(0.45),
                },
            ],
        }
    }

    /// Structural invariants: limits strictly increasing, only the last
    /// bracket unbounded, rates in [0,1] and non-decreasing, first rate zero.
    pub fn validate(&self) -> FiscalResult<()> {
        if self.brackets.is_empty() {
            return Err(FiscalError::InvalidSchedule(
                "schedule has no brackets".to_string(),
            ));
        }

        if self.brackets[0].rate != Decimal::ZERO {
            return Err(FiscalError::InvalidSchedule(
                "first bracket rate must be zero".to_string(),
            ));
        }

        if self.brackets.last().and_then(|b| b.upper_limit).is_some() {
            return Err(FiscalError::InvalidSchedule(
                "last bracket must be unbounded".to_string(),
            ));
        }

        let mut previous_limit = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;
        for (i, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(FiscalError::InvalidSchedule(format!(
                    "bracket {i} rate {} outside [0,1]",
                    bracket.rate
                )));
            }
            if bracket.rate < previous_rate {
                return Err(FiscalError::InvalidSchedule(format!(
                    "bracket {i} rate {} lower than previous {previous_rate}",
                    bracket.rate
                )));
            }
            previous_rate = bracket.rate;

            match bracket.upper_limit {
                Some(limit) => {
                    if i > 0 && limit <= previous_limit {
                        return Err(FiscalError::InvalidSchedule(format!(
                            "bracket {i} limit {limit} not above previous {previous_limit}"
                        )));
                    }
                    if i == 0 && limit <= Decimal::ZERO {
                        return Err(FiscalError::InvalidSchedule(format!(
                            "bracket 0 limit {limit} must be positive"
                        )));
                    }
                    previous_limit = limit;
                }
                None => {
                    if i != self.brackets.len() - 1 {
                        return Err(FiscalError::InvalidSchedule(format!(
                            "bracket {i} unbounded but not last"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Marginal-bracket income tax on a taxable base.
    ///
    /// Each bracket taxes only the slice of income falling inside it; this is
    /// never a flat rate applied to the whole base. Zero or negative input
    /// yields zero. Result rounded to 2 decimals. Total function.
    pub fn income_tax(&self, taxable_income: Money) -> Money {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let mut tax = Decimal::ZERO;
        let mut floor = Decimal::ZERO;
        for bracket in &self.brackets {
            if taxable_income <= floor {
                break;
            }
            let ceiling = bracket.upper_limit.unwrap_or(taxable_income);
            let slice = taxable_income.min(ceiling) - floor;
            if slice > Decimal::ZERO {
                tax += slice * bracket.rate;
            }
            floor = ceiling;
        }

        tax.round_dp(2)
    }
}

/// Income tax under the current default schedule.
pub fn income_tax_2024(taxable_income: Money) -> Money {
    TaxSchedule::france_2024().income_tax(taxable_income)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_schedule_is_valid() {
        TaxSchedule::france_2024().validate().unwrap();
    }

    #[test]
    fn test_zero_floor() {
        let schedule = TaxSchedule::france_2024();
        assert_eq!(schedule.income_tax(dec!(0)), dec!(0));
        assert_eq!(schedule.income_tax(dec!(-1200)), dec!(0));
        assert_eq!(schedule.income_tax(dec!(11294)), dec!(0));
        assert_eq!(schedule.income_tax(dec!(5000)), dec!(0));
    }

    #[test]
    fn test_bracket_boundary_exactness() {
        let schedule = TaxSchedule::france_2024();
        // (28797 - 11294) * 0.11 = 1925.33
        assert_eq!(schedule.income_tax(dec!(28797)), dec!(1925.33));
    }

    #[test]
    fn test_marginal_not_flat() {
        let schedule = TaxSchedule::france_2024();
        // 33000: 17503 * 0.11 + 4203 * 0.30 = 1925.33 + 1260.90
        assert_eq!(schedule.income_tax(dec!(33000)), dec!(3186.23));
        // A flat 30% on the whole base would be 9900 — marginal is far less.
        assert!(schedule.income_tax(dec!(33000)) < dec!(9900));
    }

    #[test]
    fn test_top_bracket_reached() {
        let schedule = TaxSchedule::france_2024();
        // 200000: 17503*0.11 + 53544*0.30 + 94765*0.41 + 22894*0.45
        let expected = dec!(1925.33) + dec!(16063.20) + dec!(38853.65) + dec!(10302.30);
        assert_eq!(schedule.income_tax(dec!(200000)), expected);
    }

    #[test]
    fn test_monotonic_in_income() {
        let schedule = TaxSchedule::france_2024();
        let mut previous = dec!(0);
        for income in [0, 5000, 11294, 11295, 20000, 28797, 50000, 82341, 177106, 250000] {
            let tax = schedule.income_tax(Decimal::from(income));
            assert!(tax >= previous, "tax decreased at income {income}");
            previous = tax;
        }
    }

    #[test]
    fn test_validate_rejects_bounded_last_bracket() {
        let schedule = TaxSchedule {
            label: "broken".to_string(),
            brackets: vec![
                TaxBracket {
                    upper_limit: Some(dec!(10000)),
                    rate: dec!(0),
                },
                TaxBracket {
                    upper_limit: Some(dec!(20000)),
                    rate: dec!(0.10),
                },
            ],
        };
        assert!(matches!(
            schedule.validate(),
            Err(FiscalError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_validate_rejects_decreasing_rates() {
        let result = TaxSchedule::new(
            "broken",
            vec![
                TaxBracket {
                    upper_limit: Some(dec!(10000)),
                    rate: dec!(0),
                },
                TaxBracket {
                    upper_limit: Some(dec!(20000)),
                    rate: dec!(0.30),
                },
                TaxBracket {
                    upper_limit: None,
                    rate: dec!(0.11),
                },
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_non_increasing_limits() {
        let result = TaxSchedule::new(
            "broken",
            vec![
                TaxBracket {
                    upper_limit: Some(dec!(20000)),
                    rate: dec!(0),
                },
                TaxBracket {
                    upper_limit: Some(dec!(20000)),
                    rate: dec!(0.11),
                },
                TaxBracket {
                    upper_limit: None,
                    rate: dec!(0.30),
                },
            ],
        );
        assert!(result.is_err());
    }
}
