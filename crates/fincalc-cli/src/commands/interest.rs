use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use fincalc_core::instrument::{traced, traced_with};
use fincalc_core::interest::{self, emi::LoanInput};

use crate::input;

/// Arguments for simple interest
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SimpleInterestArgs {
    /// Principal amount
    #[arg(long)]
    pub principal: Decimal,

    /// Annual rate in percent (e.g. 5 for 5%)
    #[arg(long)]
    pub rate: Decimal,

    /// Time in years
    #[arg(long)]
    pub years: Decimal,
}

/// Arguments for compound interest
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CompoundInterestArgs {
    /// Principal amount
    #[arg(long)]
    pub principal: Decimal,

    /// Annual rate in percent (e.g. 5 for 5%)
    #[arg(long)]
    pub rate: Decimal,

    /// Time in years (fractions allowed)
    #[arg(long)]
    pub years: Decimal,

    /// Compounding periods per year (1 = annual, 12 = monthly, 365 = daily)
    #[arg(long, default_value = "1")]
    pub frequency: Decimal,
}

/// Arguments shared by the EMI and amortisation commands
#[derive(Args)]
pub struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Tenure in months
    #[arg(long)]
    pub months: u32,
}

/// Arguments for the full loan report
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file ({"principal", "annual_rate", "tenure_months"})
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simple_interest(args: SimpleInterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let si = traced(
        "simple_interest",
        format_args!("p={}, r={}, t={}", args.principal, args.rate, args.years),
        || Ok(interest::simple_interest(args.principal, args.rate, args.years)),
    )?;
    Ok(json!({
        "simple_interest": si,
        "total_amount": args.principal + si,
    }))
}

pub fn run_compound_interest(
    args: CompoundInterestArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let ci = traced(
        "compound_interest",
        format_args!(
            "p={}, r={}, t={}, n={}",
            args.principal, args.rate, args.years, args.frequency
        ),
        || interest::compound_interest(args.principal, args.rate, args.years, args.frequency),
    )?;
    Ok(json!({
        "compound_interest": ci.round_dp(2),
        "total_amount": (args.principal + ci).round_dp(2),
    }))
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let summary = traced(
        "emi_calculator",
        format_args!("principal={}, annual_rate={}, tenure_months={}", args.principal, args.rate, args.months),
        || interest::emi_calculator(args.principal, args.rate, args.months),
    )?;
    Ok(serde_json::to_value(summary)?)
}

pub fn run_amortization(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule = traced_with(
        "emi_amortization_schedule",
        format_args!("principal={}, annual_rate={}, tenure_months={}", args.principal, args.rate, args.months),
        || interest::emi_amortization_schedule(args.principal, args.rate, args.months),
        |rows| format!("{} rows", rows.len()),
    )?;
    Ok(serde_json::to_value(schedule)?)
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = input::load(args.input.as_deref(), "loan analysis")?;
    let result = traced_with(
        "analyze_loan",
        format_args!(
            "principal={}, annual_rate={}, tenure_months={}",
            loan_input.principal, loan_input.annual_rate, loan_input.tenure_months
        ),
        || interest::analyze_loan(&loan_input),
        |out| format!("emi={}, warnings={}", out.result.summary.emi, out.warnings.len()),
    )?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn decimal_field(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    #[test]
    fn test_simple_interest_output_shape() {
        let value = run_simple_interest(SimpleInterestArgs {
            principal: dec!(1000),
            rate: dec!(5),
            years: dec!(2),
        })
        .unwrap();
        assert_eq!(decimal_field(&value["simple_interest"]), dec!(100));
        assert_eq!(decimal_field(&value["total_amount"]), dec!(1100));
    }

    #[test]
    fn test_compound_interest_zero_frequency_errors() {
        let err = run_compound_interest(CompoundInterestArgs {
            principal: dec!(1000),
            rate: dec!(10),
            years: dec!(2),
            frequency: Decimal::ZERO,
        })
        .unwrap_err();
        assert!(err.to_string().contains("Division by zero"));
    }

    #[test]
    fn test_amortization_is_row_array() {
        let value = run_amortization(EmiArgs {
            principal: dec!(100000),
            rate: dec!(10),
            months: 12,
        })
        .unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(decimal_field(&rows[11]["remaining_principal"]), Decimal::ZERO);
    }
}
