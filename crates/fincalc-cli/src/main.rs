mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analytics::{FormatCurrencyArgs, RiskReturnArgs};
use commands::interest::{CompoundInterestArgs, EmiArgs, LoanArgs, SimpleInterestArgs};
use commands::planning::{LumpsumArgs, SipArgs};
use commands::time_value::{FvArgs, NperArgs, PmtArgs, PvArgs, RateArgs};

/// Personal finance calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Personal finance calculations with decimal precision",
    long_about = "A CLI for loan, savings and time-value-of-money calculations \
                  with decimal precision. Supports simple and compound interest, \
                  EMI and amortisation schedules, SIP and lumpsum maturity, \
                  FV/PV/PMT/NPER/RATE, return statistics and currency formatting."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log each calculation to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simple interest on a principal
    SimpleInterest(SimpleInterestArgs),
    /// Compound interest earned over a period
    CompoundInterest(CompoundInterestArgs),
    /// Equated monthly instalment for a loan
    Emi(EmiArgs),
    /// Month-by-month amortisation schedule for a loan
    Amortization(EmiArgs),
    /// Full loan report (summary, schedule, reconciliation)
    Loan(LoanArgs),
    /// Maturity of a monthly systematic investment plan
    Sip(SipArgs),
    /// Maturity of a one-off investment
    Lumpsum(LumpsumArgs),
    /// Future value of a single sum
    Fv(FvArgs),
    /// Present value of a single sum
    Pv(PvArgs),
    /// Level payment that amortises a present value
    Pmt(PmtArgs),
    /// Number of periods needed to repay a loan
    Nper(NperArgs),
    /// Implied periodic rate of a level-payment loan
    Rate(RateArgs),
    /// Mean and standard deviation of periodic returns
    RiskReturn(RiskReturnArgs),
    /// Format an amount with currency code and thousands separators
    FormatCurrency(FormatCurrencyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::SimpleInterest(args) => commands::interest::run_simple_interest(args),
        Commands::CompoundInterest(args) => commands::interest::run_compound_interest(args),
        Commands::Emi(args) => commands::interest::run_emi(args),
        Commands::Amortization(args) => commands::interest::run_amortization(args),
        Commands::Loan(args) => commands::interest::run_loan(args),
        Commands::Sip(args) => commands::planning::run_sip(args),
        Commands::Lumpsum(args) => commands::planning::run_lumpsum(args),
        Commands::Fv(args) => commands::time_value::run_fv(args),
        Commands::Pv(args) => commands::time_value::run_pv(args),
        Commands::Pmt(args) => commands::time_value::run_pmt(args),
        Commands::Nper(args) => commands::time_value::run_nper(args),
        Commands::Rate(args) => commands::time_value::run_rate(args),
        Commands::RiskReturn(args) => commands::analytics::run_risk_return(args),
        Commands::FormatCurrency(args) => commands::analytics::run_format_currency(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
