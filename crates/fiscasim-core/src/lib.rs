pub mod advisory;
pub mod bareme;
pub mod error;
pub mod feedback;
pub mod micro;
pub mod reel;
pub mod simulation;
pub mod types;

pub use error::FiscalError;
pub use types::*;

/// Standard result type for all fiscasim operations
pub type FiscalResult<T> = Result<T, FiscalError>;
