use serde::{Deserialize, Serialize};

use crate::micro::{compute_micro, MicroInput};
use crate::reel::{compute_reel, ReelInput};
use crate::types::{ActivityType, Money};
use crate::FiscalResult;

/// Fallback shown when the advisory provider fails. The numeric comparison
/// is still rendered, so the user can conclude on their own.
pub const FALLBACK_RECOMMENDATION: &str =
    "Le service de recommandation est momentanément indisponible. Comparez le revenu net \
     des deux régimes ci-dessus : le régime au revenu net le plus élevé est généralement \
     le plus avantageux. Résultat indicatif, sans valeur réglementaire.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    pub annual_revenue: Money,
    pub annual_expenses: Money,
    pub activity: ActivityType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendation: String,
}

/// Boundary to the advisory text generator. The production deployment backs
/// this with a generative text service; anything implementing the trait can
/// stand in. Implementations performing network I/O should enforce their own
/// bounded timeout and surface expiry as an `Err` — the orchestrator treats
/// every failure the same way (fallback text, numeric results intact).
pub trait RecommendationAdvisor {
    fn recommend(&self, request: &AdvisoryRequest) -> FiscalResult<Recommendation>;
}

/// Deterministic local advisor: runs both calculators and writes French
/// prose comparing the net outcomes. Keeps the engine usable offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparativeAdvisor;

impl RecommendationAdvisor for ComparativeAdvisor {
    fn recommend(&self, request: &AdvisoryRequest) -> FiscalResult<Recommendation> {
        let micro = compute_micro(&MicroInput {
            annual_revenue: request.annual_revenue,
            annual_expenses: request.annual_expenses,
            activity: request.activity,
        })?
        .result;
        let reel = compute_reel(&ReelInput {
            annual_revenue: request.annual_revenue,
            annual_expenses: request.annual_expenses,
        })?
        .result;

        let micro_net = micro.net_income_after_all;
        let reel_net = reel.net_income_after_all_contributions;
        let gap = (micro_net - reel_net).abs();

        let verdict = if micro_net > reel_net {
            format!(
                "le régime micro-entreprise paraît plus avantageux, avec un revenu net estimé \
                 de {micro_net} € contre {reel_net} € au régime réel (écart : {gap} €)."
            )
        } else if reel_net > micro_net {
            format!(
                "le régime réel paraît plus avantageux, avec un revenu net estimé de \
                 {reel_net} € contre {micro_net} € en micro-entreprise (écart : {gap} €)."
            )
        } else {
            "les deux régimes aboutissent à un revenu net estimé identique ; d'autres critères \
             (simplicité déclarative, TVA, évolution prévue des charges) peuvent départager."
                .to_string()
        };

        let text = format!(
            "Pour une activité de {activity}, avec un chiffre d'affaires annuel de {revenue} € \
             et {expenses} € de charges, {verdict} Estimation indicative fondée sur le barème \
             2024 pour une part fiscale, sans valeur réglementaire.",
            activity = request.activity.label(),
            revenue = request.annual_revenue,
            expenses = request.annual_expenses,
        );

        Ok(Recommendation {
            recommendation: text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_comparative_advisor_names_the_better_regime() {
        // Heavy real expenses favour the réel regime.
        let rec = ComparativeAdvisor
            .recommend(&AdvisoryRequest {
                annual_revenue: dec!(60000),
                annual_expenses: dec!(45000),
                activity: ActivityType::ServiceBic,
            })
            .unwrap();
        assert!(rec
            .recommendation
            .contains("le régime réel paraît plus avantageux"));

        // Negligible expenses favour the flat-rate allowance.
        let rec = ComparativeAdvisor
            .recommend(&AdvisoryRequest {
                annual_revenue: dec!(60000),
                annual_expenses: dec!(0),
                activity: ActivityType::ServiceBic,
            })
            .unwrap();
        assert!(rec
            .recommendation
            .contains("micro-entreprise paraît plus avantageux"));
    }

    #[test]
    fn test_advisor_is_deterministic() {
        let request = AdvisoryRequest {
            annual_revenue: dec!(42000),
            annual_expenses: dec!(9000),
            activity: ActivityType::LiberalBncCipav,
        };
        let a = ComparativeAdvisor.recommend(&request).unwrap();
        let b = ComparativeAdvisor.recommend(&request).unwrap();
        assert_eq!(a.recommendation, b.recommendation);
    }
}
