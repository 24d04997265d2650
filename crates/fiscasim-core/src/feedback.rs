use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use tracing::info;

/// Maximum accepted feedback length, in characters.
pub const MAX_FEEDBACK_CHARS: usize = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackReceipt {
    pub success: bool,
    pub message: String,
}

/// Destination for user feedback. Fully independent of the simulation path;
/// a real sink (spreadsheet, ticketing system) implements this trait.
pub trait FeedbackSink {
    fn submit(&self, feedback: &Feedback) -> FeedbackReceipt;
}

/// Stub sink: validates, logs, and simulates the latency of an external
/// write. Never touches simulation state.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedSink {
    pub simulated_delay_ms: u64,
}

impl SimulatedSink {
    pub fn new() -> Self {
        SimulatedSink {
            simulated_delay_ms: 400,
        }
    }
}

impl Default for SimulatedSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackSink for SimulatedSink {
    fn submit(&self, feedback: &Feedback) -> FeedbackReceipt {
        if let Err(message) = validate(feedback) {
            return FeedbackReceipt {
                success: false,
                message,
            };
        }

        if self.simulated_delay_ms > 0 {
            thread::sleep(Duration::from_millis(self.simulated_delay_ms));
        }

        info!(
            chars = feedback.text.chars().count(),
            "feedback recorded (simulated sink)"
        );

        FeedbackReceipt {
            success: true,
            message: "Merci pour votre retour !".to_string(),
        }
    }
}

fn validate(feedback: &Feedback) -> Result<(), String> {
    if feedback.text.trim().is_empty() {
        return Err("Le message ne peut pas être vide.".to_string());
    }
    if feedback.text.chars().count() > MAX_FEEDBACK_CHARS {
        return Err(format!(
            "Le message dépasse la limite de {MAX_FEEDBACK_CHARS} caractères."
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink() -> SimulatedSink {
        // No artificial delay in tests.
        SimulatedSink {
            simulated_delay_ms: 0,
        }
    }

    #[test]
    fn test_accepts_reasonable_feedback() {
        let receipt = sink().submit(&Feedback {
            text: "Très utile, merci.".to_string(),
        });
        assert!(receipt.success);
    }

    #[test]
    fn test_rejects_empty_feedback() {
        let receipt = sink().submit(&Feedback {
            text: "   ".to_string(),
        });
        assert!(!receipt.success);
        assert!(receipt.message.contains("vide"));
    }

    #[test]
    fn test_rejects_oversized_feedback() {
        let receipt = sink().submit(&Feedback {
            text: "x".repeat(MAX_FEEDBACK_CHARS + 1),
        });
        assert!(!receipt.success);
        assert!(receipt.message.contains("2000"));
    }

    #[test]
    fn test_boundary_length_accepted() {
        let receipt = sink().submit(&Feedback {
            text: "x".repeat(MAX_FEEDBACK_CHARS),
        });
        assert!(receipt.success);
    }
}
