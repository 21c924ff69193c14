pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "presentation")]
pub mod presentation;

pub use error::AmortizationError;
pub use types::*;

/// Standard result type for all amortization operations
pub type AmortizationResult<T> = Result<T, AmortizationError>;
