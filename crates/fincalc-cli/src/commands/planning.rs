use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::instrument::traced;
use fincalc_core::planning;

/// Arguments for SIP maturity
#[derive(Args)]
pub struct SipArgs {
    /// Amount invested at the start of each month
    #[arg(long)]
    pub monthly_investment: Decimal,

    /// Expected annual return in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Investment horizon in months
    #[arg(long)]
    pub months: u32,
}

/// Arguments for lumpsum maturity
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LumpsumArgs {
    /// Amount invested today
    #[arg(long)]
    pub principal: Decimal,

    /// Expected annual return in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Decimal,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = traced(
        "sip_calculator",
        format_args!(
            "monthly_investment={}, annual_rate={}, tenure_months={}",
            args.monthly_investment, args.rate, args.months
        ),
        || planning::sip_calculator(args.monthly_investment, args.rate, args.months),
    )?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_lumpsum(args: LumpsumArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = traced(
        "lumpsum_calculator",
        format_args!(
            "principal={}, annual_rate={}, tenure_years={}",
            args.principal, args.rate, args.years
        ),
        || planning::lumpsum_calculator(args.principal, args.rate, args.years),
    )?;
    Ok(serde_json::to_value(result)?)
}
