pub mod error;
pub mod instrument;
pub mod time_value;
pub mod types;

#[cfg(feature = "interest")]
pub mod interest;

#[cfg(feature = "planning")]
pub mod planning;

#[cfg(feature = "analytics")]
pub mod analytics;

pub use error::FinCalcError;
pub use types::*;

/// Standard result type for all fincalc operations
pub type FinCalcResult<T> = Result<T, FinCalcError>;
