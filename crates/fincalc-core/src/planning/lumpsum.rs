use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
use crate::time_value::compound_factor;
use crate::types::{Money, Percent, Years};
use crate::FinCalcResult;

/// Maturity of a one-off investment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpsumResult {
    pub maturity_value: Money,
    pub total_gain: Money,
}

/// Annually compounded growth of a single investment: `P * (1 + R/100)^t`.
pub fn lumpsum_calculator(
    principal: Money,
    annual_rate: Percent,
    tenure_years: Years,
) -> FinCalcResult<LumpsumResult> {
    let factor = compound_factor(Decimal::ONE + annual_rate / dec!(100), tenure_years)?;
    let maturity = principal
        .checked_mul(factor)
        .ok_or_else(|| FinCalcError::Overflow {
            context: "lumpsum maturity value".into(),
        })?;
    let gain = maturity - principal;

    Ok(LumpsumResult {
        maturity_value: maturity.round_dp(2),
        total_gain: gain.round_dp(2),
    })
}
