use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Logarithm of non-positive value in {context} (argument: {argument})")]
    NonPositiveLogarithm { context: String, argument: Decimal },

    #[error("Convergence failure: {function} did not converge after {iterations} iterations (delta: {last_delta})")]
    ConvergenceFailure {
        function: String,
        iterations: u32,
        last_delta: Decimal,
    },

    #[error("Numeric overflow in {context}")]
    Overflow { context: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinCalcError {
    /// True for violations of a mathematical precondition (zero denominator,
    /// log of a non-positive value, non-positive principal or tenure).
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            FinCalcError::InvalidInput { .. }
                | FinCalcError::DivisionByZero { .. }
                | FinCalcError::NonPositiveLogarithm { .. }
                | FinCalcError::Overflow { .. }
        )
    }
}

impl From<serde_json::Error> for FinCalcError {
    fn from(e: serde_json::Error) -> Self {
        FinCalcError::SerializationError(e.to_string())
    }
}
