use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use fincalc_core::instrument::traced;
use fincalc_core::time_value;

/// Arguments for future value of a single sum
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FvArgs {
    /// Present value
    #[arg(long)]
    pub pv: Decimal,

    /// Rate per period as a decimal (e.g. 0.01 for 1%)
    #[arg(long)]
    pub rate: Decimal,

    /// Number of periods
    #[arg(long)]
    pub nper: u32,
}

/// Arguments for present value of a single sum
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PvArgs {
    /// Future value
    #[arg(long)]
    pub fv: Decimal,

    /// Rate per period as a decimal
    #[arg(long)]
    pub rate: Decimal,

    /// Number of periods
    #[arg(long)]
    pub nper: u32,
}

/// Arguments for level annuity payment
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PmtArgs {
    /// Amount borrowed or invested today
    #[arg(long)]
    pub pv: Decimal,

    /// Rate per period as a decimal
    #[arg(long)]
    pub rate: Decimal,

    /// Number of periods
    #[arg(long)]
    pub nper: u32,
}

/// Arguments for number of periods
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct NperArgs {
    /// Amount borrowed today
    #[arg(long)]
    pub pv: Decimal,

    /// Level payment per period
    #[arg(long)]
    pub pmt: Decimal,

    /// Rate per period as a decimal
    #[arg(long)]
    pub rate: Decimal,
}

/// Arguments for the implied rate solver
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RateArgs {
    /// Amount borrowed today (positive)
    #[arg(long)]
    pub pv: Decimal,

    /// Level payment per period (opposite sign to pv, e.g. -88.85)
    #[arg(long)]
    pub pmt: Decimal,

    /// Number of periods
    #[arg(long)]
    pub nper: u32,

    /// Fail instead of returning a best estimate when the solver does not converge
    #[arg(long)]
    pub strict: bool,
}

pub fn run_fv(args: FvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fv = traced(
        "fv",
        format_args!("pv={}, rate={}, n={}", args.pv, args.rate, args.nper),
        || time_value::fv(args.pv, args.rate, args.nper),
    )?;
    Ok(json!({ "fv": fv }))
}

pub fn run_pv(args: PvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pv = traced(
        "pv",
        format_args!("fv={}, rate={}, n={}", args.fv, args.rate, args.nper),
        || time_value::pv(args.fv, args.rate, args.nper),
    )?;
    Ok(json!({ "pv": pv }))
}

pub fn run_pmt(args: PmtArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pmt = traced(
        "pmt",
        format_args!("pv={}, rate={}, n={}", args.pv, args.rate, args.nper),
        || time_value::pmt(args.pv, args.rate, args.nper),
    )?;
    Ok(json!({ "pmt": pmt }))
}

pub fn run_nper(args: NperArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let nper = traced(
        "nper",
        format_args!("pv={}, pmt={}, rate={}", args.pv, args.pmt, args.rate),
        || time_value::nper(args.pv, args.pmt, args.rate),
    )?;
    Ok(json!({ "nper": nper }))
}

pub fn run_rate(args: RateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let solution = traced(
        "rate",
        format_args!("pv={}, pmt={}, n={}", args.pv, args.pmt, args.nper),
        || time_value::solve_rate(args.pv, args.pmt, args.nper),
    )?;

    let mut warnings: Vec<String> = Vec::new();
    if !solution.converged {
        if args.strict {
            solution.clone().into_converged()?;
        }
        warnings.push(format!(
            "Solver stopped after {} iterations without converging; rate is a best estimate",
            solution.iterations
        ));
    }

    Ok(json!({
        "rate": solution.rate,
        "iterations": solution.iterations,
        "converged": solution.converged,
        "warnings": warnings,
    }))
}
