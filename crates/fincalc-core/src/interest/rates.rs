use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FinCalcError;
use crate::time_value::compound_factor;
use crate::types::{Money, Percent, Years};
use crate::FinCalcResult;

/// Simple interest `p * r * t / 100`.
///
/// No validation: negative principal, rate or time flow straight through.
pub fn simple_interest(principal: Money, annual_rate: Percent, years: Years) -> Money {
    principal * annual_rate * years / dec!(100)
}

/// Compound interest earned (not the maturity amount):
/// `p * (1 + r / (100 n))^(n t) - p`.
///
/// `frequency` is the number of compounding periods per year.
pub fn compound_interest(
    principal: Money,
    annual_rate: Percent,
    years: Years,
    frequency: Decimal,
) -> FinCalcResult<Money> {
    if frequency.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "compound_interest: compounding frequency cannot be zero".into(),
        });
    }

    let periodic_rate = annual_rate / (dec!(100) * frequency);
    let factor = compound_factor(Decimal::ONE + periodic_rate, frequency * years)?;
    let amount = principal
        .checked_mul(factor)
        .ok_or_else(|| FinCalcError::Overflow {
            context: "compound_interest maturity amount".into(),
        })?;
    Ok(amount - principal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_interest_textbook() {
        assert_eq!(simple_interest(dec!(1000), dec!(5), dec!(2)), dec!(100));
        assert_eq!(simple_interest(dec!(2000), dec!(3), dec!(1)), dec!(60));
    }

    #[test]
    fn test_simple_interest_accepts_negative_inputs() {
        assert_eq!(simple_interest(dec!(-1000), dec!(5), dec!(2)), dec!(-100));
        assert_eq!(simple_interest(dec!(1000), dec!(-5), dec!(2)), dec!(-100));
    }

    #[test]
    fn test_compound_interest_annual() {
        let ci = compound_interest(dec!(1000), dec!(10), dec!(2), dec!(1)).unwrap();
        assert_eq!(ci, dec!(210));
    }

    #[test]
    fn test_compound_interest_semi_annual() {
        // 500 * 1.025^6 - 500 = 79.85
        let ci = compound_interest(dec!(500), dec!(5), dec!(3), dec!(2)).unwrap();
        assert!((ci - dec!(79.85)).abs() < dec!(0.01), "ci={ci}");
    }

    #[test]
    fn test_compound_interest_daily() {
        let ci = compound_interest(dec!(1000), dec!(5), dec!(10), dec!(365)).unwrap();
        assert!(ci > Decimal::ZERO);
        // Continuous-compounding ceiling: 1000 * (e^0.5 - 1) = 648.72
        assert!(ci < dec!(648.73), "ci={ci}");
    }

    #[test]
    fn test_compound_interest_fractional_years() {
        // 1000 * 1.1^0.5 - 1000 = 48.81
        let ci = compound_interest(dec!(1000), dec!(10), dec!(0.5), dec!(1)).unwrap();
        assert!((ci - dec!(48.81)).abs() < dec!(0.01), "ci={ci}");
    }

    #[test]
    fn test_compound_interest_zero_frequency_rejected() {
        let err = compound_interest(dec!(1000), dec!(10), dec!(2), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, FinCalcError::DivisionByZero { .. }));
        assert!(err.is_domain_error());
    }
}
