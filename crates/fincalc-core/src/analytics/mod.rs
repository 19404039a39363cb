pub mod currency;
pub mod risk_return;

pub use currency::format_currency;
pub use risk_return::risk_return_analysis;
