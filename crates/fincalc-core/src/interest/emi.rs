use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::time_value::annuity_payment;
use crate::types::*;
use crate::FinCalcResult;

/// Headline figures for an equated-monthly-instalment loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiSummary {
    pub emi: Money,
    pub total_payment: Money,
    pub total_interest: Money,
}

/// A single month of an amortisation schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub emi: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub remaining_principal: Money,
}

/// Input for a full loan report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    /// Annual rate as a percentage (10 = 10%)
    pub annual_rate: Percent,
    pub tenure_months: u32,
}

/// Output of `analyze_loan`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub summary: EmiSummary,
    pub schedule: Vec<AmortizationRow>,
    /// Sum of the rounded `principal_paid` column
    pub total_principal_paid: Money,
    /// Sum of the rounded `interest_paid` column
    pub total_interest_paid: Money,
}

fn validate_loan(principal: Money, annual_rate: Percent, tenure_months: u32) -> FinCalcResult<()> {
    if principal <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "principal".into(),
            reason: "Loan principal must be positive".into(),
        });
    }
    if annual_rate < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if tenure_months == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "tenure_months".into(),
            reason: "Tenure must be at least 1 month".into(),
        });
    }
    Ok(())
}

fn monthly_rate(annual_rate: Percent) -> Rate {
    annual_rate / dec!(1200)
}

/// EMI, total payment and total interest, each rounded to cents.
///
/// Totals are derived from the unrounded instalment.
pub fn emi_calculator(
    principal: Money,
    annual_rate: Percent,
    tenure_months: u32,
) -> FinCalcResult<EmiSummary> {
    validate_loan(principal, annual_rate, tenure_months)?;

    let emi = annuity_payment(principal, monthly_rate(annual_rate), tenure_months)?;
    let total_payment = emi * Decimal::from(tenure_months);
    let total_interest = total_payment - principal;

    Ok(EmiSummary {
        emi: emi.round_dp(2),
        total_payment: total_payment.round_dp(2),
        total_interest: total_interest.round_dp(2),
    })
}

/// Month-by-month reducing-balance schedule.
///
/// The balance is carried at full precision and each row is rounded to cents
/// on its own, so column sums can drift from the principal by a few cents on
/// long tenures. For principals of a few cents the rounded
/// `remaining_principal` column repeats values (0.04, 0.04, 0.03, ...); it
/// never increases. The last row always closes the loan at exactly zero.
pub fn emi_amortization_schedule(
    principal: Money,
    annual_rate: Percent,
    tenure_months: u32,
) -> FinCalcResult<Vec<AmortizationRow>> {
    validate_loan(principal, annual_rate, tenure_months)?;

    let rate = monthly_rate(annual_rate);
    let emi = annuity_payment(principal, rate, tenure_months)?;

    let mut schedule = Vec::with_capacity(tenure_months as usize);
    let mut remaining = principal;

    for month in 1..=tenure_months {
        let interest = remaining * rate;
        let mut principal_paid = emi - interest;
        remaining -= principal_paid;

        // Fold overshoot (negative) or final-month residue (positive) back
        // into this month's principal so the loan closes at zero.
        if remaining < Decimal::ZERO || month == tenure_months {
            principal_paid += remaining;
            remaining = Decimal::ZERO;
        }

        schedule.push(AmortizationRow {
            month,
            emi: emi.round_dp(2),
            principal_paid: principal_paid.round_dp(2),
            interest_paid: interest.round_dp(2),
            remaining_principal: remaining.round_dp(2),
        });
    }

    Ok(schedule)
}

/// EMI summary plus full schedule, wrapped with methodology and warnings.
pub fn analyze_loan(input: &LoanInput) -> FinCalcResult<ComputationOutput<LoanAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let summary = emi_calculator(input.principal, input.annual_rate, input.tenure_months)?;
    let schedule =
        emi_amortization_schedule(input.principal, input.annual_rate, input.tenure_months)?;

    let total_principal_paid: Money = schedule.iter().map(|r| r.principal_paid).sum();
    let total_interest_paid: Money = schedule.iter().map(|r| r.interest_paid).sum();

    if input.annual_rate.is_zero() {
        warnings.push("Zero interest rate: EMI is principal divided by tenure".into());
    }

    let drift = (total_principal_paid - input.principal).abs();
    if drift > dec!(0.01) {
        warnings.push(format!(
            "Per-row rounding: principal column sums to {total_principal_paid}, {drift} away from the principal"
        ));
    }

    let output = LoanAnalysis {
        summary,
        schedule,
        total_principal_paid,
        total_interest_paid,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "EMI amortisation (reducing balance, monthly rests)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_rate.to_string(),
            "tenure_months": input.tenure_months,
            "rounding": "per-row, 2dp",
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_emi_textbook_case() {
        let s = emi_calculator(dec!(100000), dec!(10), 12).unwrap();
        assert_eq!(s.emi, dec!(8791.59));
        // 8791.588723... * 12
        assert_eq!(s.total_payment, dec!(105499.06));
        assert_eq!(s.total_interest, dec!(5499.06));
    }

    #[test]
    fn test_emi_zero_rate() {
        let s = emi_calculator(dec!(12000), Decimal::ZERO, 12).unwrap();
        assert_eq!(s.emi, dec!(1000));
        assert_eq!(s.total_payment, dec!(12000));
        assert_eq!(s.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_emi_rejects_bad_inputs() {
        assert!(emi_calculator(Decimal::ZERO, dec!(10), 12).is_err());
        assert!(emi_calculator(dec!(-5), dec!(10), 12).is_err());
        assert!(emi_calculator(dec!(1000), dec!(-1), 12).is_err());
        let err = emi_calculator(dec!(1000), dec!(10), 0).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let schedule = emi_amortization_schedule(dec!(100000), dec!(10), 12).unwrap();
        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].month, 1);
        assert_eq!(schedule.last().unwrap().remaining_principal, Decimal::ZERO);
    }

    #[test]
    fn test_schedule_first_month_split() {
        let schedule = emi_amortization_schedule(dec!(100000), dec!(12), 24).unwrap();
        let first = &schedule[0];
        // 1% of 100,000
        assert_eq!(first.interest_paid, dec!(1000.00));
        assert!((first.principal_paid + first.interest_paid - first.emi).abs() <= dec!(0.01));
    }

    #[test]
    fn test_schedule_zero_rate_is_straight_line() {
        let schedule = emi_amortization_schedule(dec!(1200), Decimal::ZERO, 12).unwrap();
        for (i, row) in schedule.iter().enumerate() {
            assert_eq!(row.interest_paid, Decimal::ZERO);
            assert_eq!(row.principal_paid, dec!(100));
            assert_eq!(row.remaining_principal, dec!(1200) - dec!(100) * Decimal::from(i as u32 + 1));
        }
    }

    #[test]
    fn test_schedule_tiny_principal_repeats_rounded_balance() {
        let schedule = emi_amortization_schedule(dec!(0.05), dec!(10), 12).unwrap();
        let balances: Vec<Decimal> = schedule.iter().map(|r| r.remaining_principal).collect();
        assert!(balances.windows(2).all(|w| w[0] >= w[1]), "{balances:?}");
        assert!(balances.windows(2).any(|w| w[0] == w[1]), "{balances:?}");
        assert_eq!(balances[1], dec!(0.04));
        assert_eq!(balances[2], dec!(0.04));
        assert_eq!(*balances.last().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_schedule_rejects_bad_inputs() {
        assert!(emi_amortization_schedule(dec!(1000), dec!(10), 0).is_err());
        assert!(emi_amortization_schedule(Decimal::ZERO, dec!(10), 12).is_err());
    }

    #[test]
    fn test_analyze_loan_totals() {
        let input = LoanInput {
            principal: dec!(250000),
            annual_rate: dec!(8.5),
            tenure_months: 240,
        };
        let out = analyze_loan(&input).unwrap();
        let res = &out.result;
        assert_eq!(res.schedule.len(), 240);
        assert!((res.total_principal_paid - dec!(250000)).abs() <= dec!(2.40));
        assert!((res.total_interest_paid - res.summary.total_interest).abs() <= dec!(2.40));
        assert!(out.methodology.contains("EMI"));
    }

    #[test]
    fn test_analyze_loan_zero_rate_warning() {
        let input = LoanInput {
            principal: dec!(1200),
            annual_rate: Decimal::ZERO,
            tenure_months: 12,
        };
        let out = analyze_loan(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Zero interest rate")));
    }
}
