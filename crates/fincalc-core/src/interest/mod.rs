pub mod emi;
pub mod rates;

pub use emi::{analyze_loan, emi_amortization_schedule, emi_calculator};
pub use rates::{compound_interest, simple_interest};
