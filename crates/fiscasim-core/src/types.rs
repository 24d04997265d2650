use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FiscalError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.231 = 23.1%). Never as percentages.
pub type Rate = Decimal;

/// Business activity category of a micro-entrepreneur. Selected once per
/// simulation; each variant maps to a fixed rate table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    /// Sale of goods (BIC)
    VenteBic,
    /// Commercial or craft services (BIC)
    #[default]
    ServiceBic,
    /// Liberal professions outside CIPAV (BNC)
    LiberalBncAutre,
    /// Regulated liberal professions under the CIPAV pension fund (BNC)
    LiberalBncCipav,
}

impl ActivityType {
    pub const ALL: [ActivityType; 4] = [
        ActivityType::VenteBic,
        ActivityType::ServiceBic,
        ActivityType::LiberalBncAutre,
        ActivityType::LiberalBncCipav,
    ];

    /// Wire string, matching the serde representation.
    pub fn code(&self) -> &'static str {
        match self {
            ActivityType::VenteBic => "VENTE_BIC",
            ActivityType::ServiceBic => "SERVICE_BIC",
            ActivityType::LiberalBncAutre => "LIBERAL_BNC_AUTRE",
            ActivityType::LiberalBncCipav => "LIBERAL_BNC_CIPAV",
        }
    }

    /// Human label used in advisory prose.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::VenteBic => "vente de marchandises (BIC)",
            ActivityType::ServiceBic => "prestations de services commerciales ou artisanales (BIC)",
            ActivityType::LiberalBncAutre => "autres prestations de services libérales (BNC)",
            ActivityType::LiberalBncCipav => "professions libérales réglementées CIPAV (BNC)",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ActivityType {
    type Err = FiscalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VENTE_BIC" => Ok(ActivityType::VenteBic),
            "SERVICE_BIC" => Ok(ActivityType::ServiceBic),
            "LIBERAL_BNC_AUTRE" => Ok(ActivityType::LiberalBncAutre),
            "LIBERAL_BNC_CIPAV" => Ok(ActivityType::LiberalBncCipav),
            other => Err(FiscalError::UnknownActivity(other.to_string())),
        }
    }
}

/// Per-activity constants of the micro regime. Pure configuration — the
/// calculation algorithm never branches on the activity itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Fraction of revenue exempted for income-tax purposes (abattement).
    pub allowance_rate: Rate,
    /// Floor on the absolute allowance, in currency units.
    pub min_allowance: Money,
    /// Social contributions, assessed on gross revenue.
    pub social_contribution_rate: Rate,
    /// Professional-training levy (CFP), assessed on gross revenue.
    pub cfp_rate: Rate,
}

/// Returns the 2024 micro-regime rate table for an activity. Total over the
/// closed enumeration; yearly regulation churn is a data change here.
pub fn rate_table(activity: ActivityType) -> RateTable {
    use ActivityType::*;

    match activity {
        VenteBic => RateTable {
            allowance_rate: dec!(0.71),
            min_allowance: dec!(305),
            social_contribution_rate: dec!(0.123),
            cfp_rate: dec!(0.001),
        },
        ServiceBic => RateTable {
            allowance_rate: dec!(0.50),
            min_allowance: dec!(305),
            social_contribution_rate: dec!(0.212),
            cfp_rate: dec!(0.001),
        },
        LiberalBncAutre => RateTable {
            allowance_rate: dec!(0.34),
            min_allowance: dec!(305),
            social_contribution_rate: dec!(0.231),
            cfp_rate: dec!(0.002),
        },
        LiberalBncCipav => RateTable {
            allowance_rate: dec!(0.34),
            min_allowance: dec!(305),
            social_contribution_rate: dec!(0.232),
            cfp_rate: dec!(0.002),
        },
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_activity_round_trip() {
        for activity in ActivityType::ALL {
            let parsed: ActivityType = activity.code().parse().unwrap();
            assert_eq!(parsed, activity);
        }
    }

    #[test]
    fn test_unknown_activity_rejected() {
        let err = "ARTISAN_XYZ".parse::<ActivityType>().unwrap_err();
        assert!(matches!(err, FiscalError::UnknownActivity(_)));
    }

    #[test]
    fn test_serde_uses_wire_codes() {
        let json = serde_json::to_string(&ActivityType::LiberalBncAutre).unwrap();
        assert_eq!(json, "\"LIBERAL_BNC_AUTRE\"");
    }

    #[test]
    fn test_rate_tables_within_unit_interval() {
        for activity in ActivityType::ALL {
            let table = rate_table(activity);
            for rate in [
                table.allowance_rate,
                table.social_contribution_rate,
                table.cfp_rate,
            ] {
                assert!(rate >= dec!(0) && rate <= dec!(1), "{activity}: {rate}");
            }
            assert_eq!(table.min_allowance, dec!(305));
        }
    }
}
