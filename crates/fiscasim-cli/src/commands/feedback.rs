use clap::Args;
use serde_json::Value;

use fiscasim_core::feedback::{Feedback, FeedbackSink, SimulatedSink};

/// Arguments for feedback submission
#[derive(Args)]
pub struct FeedbackArgs {
    /// Feedback text (non-empty, at most 2000 characters)
    #[arg(long)]
    pub message: String,
}

pub fn run_feedback(args: FeedbackArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let receipt = SimulatedSink::new().submit(&Feedback { text: args.message });
    Ok(serde_json::to_value(receipt)?)
}
