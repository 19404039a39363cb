use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use fincalc_core::analytics;
use fincalc_core::instrument::traced;
use fincalc_core::Currency;

use crate::input;

/// Arguments for mean / standard deviation of returns
#[derive(Args)]
pub struct RiskReturnArgs {
    /// Path to a JSON array of periodic returns
    #[arg(long)]
    pub input: Option<String>,

    /// Comma-separated periodic returns (e.g. "0.1,0.2,-0.05")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub returns: Option<Vec<Decimal>>,
}

/// Arguments for currency formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatCurrencyArgs {
    /// Amount to format
    #[arg(long)]
    pub value: Decimal,

    /// Currency code
    #[arg(long, default_value = "USD")]
    pub currency: String,
}

pub fn run_risk_return(args: RiskReturnArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let returns: Vec<Decimal> = match args.returns {
        Some(r) => r,
        None => input::load(args.input.as_deref(), "risk/return analysis")?,
    };
    let result = traced(
        "risk_return_analysis",
        format_args!("observations={}", returns.len()),
        || analytics::risk_return_analysis(&returns),
    )?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_format_currency(args: FormatCurrencyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let currency = Currency::from_code(&args.currency);
    let formatted = traced(
        "format_currency",
        format_args!("value={}, currency={}", args.value, currency),
        || Ok(analytics::format_currency(args.value, &currency)),
    )?;
    Ok(json!({ "formatted": formatted }))
}
