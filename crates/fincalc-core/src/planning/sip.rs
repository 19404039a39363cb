use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
use crate::time_value::pow_int;
use crate::types::{Money, Percent};
use crate::FinCalcResult;

/// Maturity of a systematic investment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipResult {
    pub maturity_value: Money,
    pub total_invested: Money,
    pub total_gain: Money,
}

/// Future value of a monthly SIP, with each instalment invested at the start
/// of its month (annuity-due): `M * ((1+r)^n - 1) / r * (1+r)`.
///
/// A 0% rate returns the plain sum of instalments `M * n`.
pub fn sip_calculator(
    monthly_investment: Money,
    annual_rate: Percent,
    tenure_months: u32,
) -> FinCalcResult<SipResult> {
    let r = annual_rate / dec!(1200);
    let n = Decimal::from(tenure_months);
    let total_invested = monthly_investment * n;

    let maturity = if r.is_zero() {
        total_invested
    } else {
        let growth = pow_int(Decimal::ONE + r, tenure_months)?;
        monthly_investment
            .checked_mul((growth - Decimal::ONE) / r)
            .and_then(|v| v.checked_mul(Decimal::ONE + r))
            .ok_or_else(|| FinCalcError::Overflow {
                context: "SIP maturity value".into(),
            })?
    };

    let gain = maturity - total_invested;
    Ok(SipResult {
        maturity_value: maturity.round_dp(2),
        total_invested: total_invested.round_dp(2),
        total_gain: gain.round_dp(2),
    })
}
