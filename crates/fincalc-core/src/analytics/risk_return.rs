use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
use crate::types::Rate;
use crate::FinCalcResult;

/// Mean and dispersion of a return series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReturn {
    pub mean_return: Rate,
    /// Population standard deviation (n denominator)
    pub stddev: Rate,
}

/// Mean return and population standard deviation, both rounded to 4 dp.
pub fn risk_return_analysis(returns: &[Decimal]) -> FinCalcResult<RiskReturn> {
    if returns.is_empty() {
        return Err(FinCalcError::InsufficientData(
            "Returns series cannot be empty".into(),
        ));
    }

    let n = Decimal::from(returns.len() as i64);
    let mean: Decimal = returns.iter().sum::<Decimal>() / n;
    let variance: Decimal = returns.iter().map(|r| (r - mean) * (r - mean)).sum::<Decimal>() / n;
    let stddev = variance.sqrt().unwrap_or(Decimal::ZERO);

    Ok(RiskReturn {
        mean_return: mean.round_dp(4),
        stddev: stddev.round_dp(4),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_risk_return_basic() {
        let res = risk_return_analysis(&[dec!(0.1), dec!(0.2), dec!(0.15), dec!(0.18)]).unwrap();
        assert_eq!(res.mean_return, dec!(0.1575));
        // variance 0.00141875, sqrt 0.037666
        assert_eq!(res.stddev, dec!(0.0377));
    }

    #[test]
    fn test_risk_return_constant_series() {
        let res = risk_return_analysis(&[dec!(0.05); 6]).unwrap();
        assert_eq!(res.mean_return, dec!(0.05));
        assert_eq!(res.stddev, Decimal::ZERO);
    }

    #[test]
    fn test_risk_return_empty_rejected() {
        assert!(matches!(
            risk_return_analysis(&[]).unwrap_err(),
            FinCalcError::InsufficientData(_)
        ));
    }
}
