use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::advisory::{AdvisoryRequest, RecommendationAdvisor, FALLBACK_RECOMMENDATION};
use crate::micro::{compute_micro, MicroInput, MicroRegimeResult};
use crate::reel::{compute_reel, ReelInput, ReelRegimeResult};
use crate::types::{ActivityType, Money};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Raw simulation request as submitted by the caller (originally a web form).
/// The activity arrives as a wire string and is validated here, not upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub annual_revenue: Money,
    pub annual_expenses: Money,
    pub activity_type: String,
}

/// Aggregate outcome of one simulation. Every numeric field is always
/// populated — zeroed placeholders substitute for failed computations, so
/// consumers never branch on missing nested fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub micro: MicroRegimeResult,
    pub reel: ReelRegimeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub activity_type: ActivityType,
}

impl SimulationResult {
    /// Neutral placeholder result carrying an error banner.
    pub fn neutral(activity: ActivityType, error: String) -> Self {
        SimulationResult {
            micro: MicroRegimeResult::neutral(activity),
            reel: ReelRegimeResult::neutral(),
            recommendation: None,
            error: Some(error),
            activity_type: activity,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

struct ValidatedInput {
    annual_revenue: Money,
    annual_expenses: Money,
    activity: ActivityType,
}

/// Schema validation. Collects every violation rather than stopping at the
/// first, so the caller sees one concatenated message.
fn validate(input: &SimulationInput) -> Result<ValidatedInput, Vec<String>> {
    let mut messages: Vec<String> = Vec::new();

    if input.annual_revenue < Decimal::ZERO {
        messages.push("Le chiffre d'affaires annuel doit être positif ou nul.".to_string());
    }
    if input.annual_expenses < Decimal::ZERO {
        messages.push("Les charges annuelles doivent être positives ou nulles.".to_string());
    }

    let activity = match input.activity_type.parse::<ActivityType>() {
        Ok(a) => Some(a),
        Err(_) => {
            messages.push(format!(
                "Type d'activité inconnu : « {} ».",
                input.activity_type
            ));
            None
        }
    };

    match (messages.is_empty(), activity) {
        (true, Some(activity)) => Ok(ValidatedInput {
            annual_revenue: input.annual_revenue,
            annual_expenses: input.annual_expenses,
            activity,
        }),
        _ => Err(messages),
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full simulation: validate, compute both regimes, attach advisory
/// prose. Total function — every failure mode folds into the result.
///
/// Failure handling per source:
/// - validation: `error` populated with the concatenated messages, zeroed
///   placeholder results, no recommendation;
/// - calculator failure (defensive, both calculators are total for validated
///   input): logged, `error` populated, zeroed placeholders, no
///   recommendation;
/// - advisory failure: logged, `recommendation` set to the fixed fallback
///   string, numeric results untouched.
pub fn simulate(
    input: &SimulationInput,
    advisor: &dyn RecommendationAdvisor,
) -> SimulationResult {
    let validated = match validate(input) {
        Ok(v) => v,
        Err(messages) => {
            return SimulationResult::neutral(ActivityType::default(), messages.join(" "));
        }
    };

    let micro = compute_micro(&MicroInput {
        annual_revenue: validated.annual_revenue,
        annual_expenses: validated.annual_expenses,
        activity: validated.activity,
    });
    let reel = compute_reel(&ReelInput {
        annual_revenue: validated.annual_revenue,
        annual_expenses: validated.annual_expenses,
    });

    let (micro, reel) = match (micro, reel) {
        (Ok(m), Ok(r)) => (m.result, r.result),
        (m, r) => {
            let cause = m
                .err()
                .or(r.err())
                .map(|e| e.to_string())
                .unwrap_or_default();
            error!(cause = %cause, "regime calculation failed for validated input");
            return SimulationResult::neutral(
                validated.activity,
                "Le calcul de la simulation a échoué. Veuillez réessayer.".to_string(),
            );
        }
    };

    let recommendation = match advisor.recommend(&AdvisoryRequest {
        annual_revenue: validated.annual_revenue,
        annual_expenses: validated.annual_expenses,
        activity: validated.activity,
    }) {
        Ok(r) => Some(r.recommendation),
        Err(e) => {
            warn!(error = %e, "advisory generation failed, using fallback text");
            Some(FALLBACK_RECOMMENDATION.to_string())
        }
    };

    SimulationResult {
        micro,
        reel,
        recommendation,
        error: None,
        activity_type: validated.activity,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{ComparativeAdvisor, Recommendation};
    use crate::error::FiscalError;
    use crate::FiscalResult;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    struct FailingAdvisor;

    impl RecommendationAdvisor for FailingAdvisor {
        fn recommend(&self, _request: &AdvisoryRequest) -> FiscalResult<Recommendation> {
            Err(FiscalError::AdvisoryUnavailable(
                "upstream timeout".to_string(),
            ))
        }
    }

    fn request(revenue: Decimal, expenses: Decimal, activity: &str) -> SimulationInput {
        SimulationInput {
            annual_revenue: revenue,
            annual_expenses: expenses,
            activity_type: activity.to_string(),
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let result = simulate(
            &request(dec!(50000), dec!(10000), "LIBERAL_BNC_AUTRE"),
            &ComparativeAdvisor,
        );

        assert!(result.error.is_none());
        assert_eq!(result.activity_type, ActivityType::LiberalBncAutre);

        assert_eq!(result.micro.allowance_applied, dec!(17000));
        assert_eq!(result.micro.taxable_income, dec!(33000));
        assert_eq!(result.micro.tax_amount, dec!(3186.23));
        assert_eq!(result.micro.social_contributions, dec!(11550.00));
        assert_eq!(result.micro.cfp_contribution, dec!(100.00));
        assert_eq!(result.micro.net_income_after_all, dec!(25163.77));

        assert_eq!(result.reel.estimated_social_contributions, dec!(12413.79));
        assert_eq!(result.reel.taxable_income, dec!(27586.21));
        assert_eq!(result.reel.tax_amount, dec!(1792.14));
        assert_eq!(
            result.reel.net_income_after_all_contributions,
            dec!(25794.07)
        );

        assert!(result.recommendation.is_some());
    }

    #[test]
    fn test_negative_revenue_yields_neutral_defaults() {
        let result = simulate(&request(dec!(-5), dec!(0), "SERVICE_BIC"), &ComparativeAdvisor);

        assert!(result.error.is_some());
        assert!(result.recommendation.is_none());
        assert_eq!(result.micro, MicroRegimeResult::neutral(ActivityType::default()));
        assert_eq!(result.reel, ReelRegimeResult::neutral());
    }

    #[test]
    fn test_validation_collects_all_messages() {
        let result = simulate(
            &request(dec!(-5), dec!(-10), "AUTO_ECOLE"),
            &ComparativeAdvisor,
        );

        let error = result.error.unwrap();
        assert!(error.contains("chiffre d'affaires"));
        assert!(error.contains("charges"));
        assert!(error.contains("AUTO_ECOLE"));
    }

    #[test]
    fn test_advisory_failure_keeps_numeric_results() {
        let input = request(dec!(50000), dec!(10000), "LIBERAL_BNC_AUTRE");
        let healthy = simulate(&input, &ComparativeAdvisor);
        let degraded = simulate(&input, &FailingAdvisor);

        assert_eq!(degraded.micro, healthy.micro);
        assert_eq!(degraded.reel, healthy.reel);
        assert!(degraded.error.is_none());
        assert_eq!(
            degraded.recommendation.as_deref(),
            Some(FALLBACK_RECOMMENDATION)
        );
    }

    #[test]
    fn test_result_serializes_without_null_holes() {
        let result = simulate(
            &request(dec!(1000), dec!(0), "VENTE_BIC"),
            &ComparativeAdvisor,
        );
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("micro").is_some());
        assert!(json.get("reel").is_some());
        assert!(json.get("error").is_none());
        assert!(json["micro"]["taxable_income"].is_string()); // serde-with-str Decimal
    }
}
