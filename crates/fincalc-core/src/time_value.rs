use log::warn;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
use crate::types::{Money, Rate};
use crate::FinCalcResult;

const INITIAL_RATE_GUESS: Decimal = dec!(0.05);
const RATE_TOLERANCE: Decimal = dec!(0.000001);
const MAX_RATE_ITERATIONS: u32 = 100;
const MAX_STEP_HALVINGS: u32 = 30;
const MIN_RATE: Decimal = dec!(-0.99);
const MAX_RATE: Decimal = dec!(10);

/// Below this the annuity factor is taken from its series about zero,
/// where `(1 - (1+g)^-n) / g` is 0/0.
const SMALL_RATE: Decimal = dec!(0.000000001);

/// Outcome of the Newton-Raphson rate solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSolution {
    /// Best estimate of the per-period rate.
    pub rate: Rate,
    pub iterations: u32,
    pub converged: bool,
    /// Size of the final Newton step.
    pub last_delta: Decimal,
}

impl RateSolution {
    /// Reject a solution that did not meet the convergence tolerance.
    pub fn into_converged(self) -> FinCalcResult<Rate> {
        if self.converged {
            Ok(self.rate)
        } else {
            Err(FinCalcError::ConvergenceFailure {
                function: "RATE".into(),
                iterations: self.iterations,
                last_delta: self.last_delta,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Compounding helpers
// ---------------------------------------------------------------------------

/// Raise `base` to an integer power by square-and-multiply.
pub(crate) fn pow_int(base: Decimal, n: u32) -> FinCalcResult<Decimal> {
    let mut result = Decimal::ONE;
    let mut b = base;
    let mut exp = n;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(b).ok_or_else(|| overflow("integer power"))?;
        }
        exp >>= 1;
        if exp > 0 {
            b = b.checked_mul(b).ok_or_else(|| overflow("integer power"))?;
        }
    }
    Ok(result)
}

/// `base^exponent`. Whole-number exponents are multiplied out exactly;
/// fractional ones go through `checked_powd` and need a positive base.
pub(crate) fn compound_factor(base: Decimal, exponent: Decimal) -> FinCalcResult<Decimal> {
    if exponent.fract().is_zero() {
        if let Some(n) = exponent.abs().to_u32() {
            let factor = pow_int(base, n)?;
            if exponent.is_sign_negative() {
                if factor.is_zero() {
                    return Err(FinCalcError::DivisionByZero {
                        context: "compound factor with negative exponent".into(),
                    });
                }
                return Ok(Decimal::ONE / factor);
            }
            return Ok(factor);
        }
    }

    if base <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "base".into(),
            reason: format!("{base} cannot be raised to the fractional power {exponent}"),
        });
    }
    base.checked_powd(exponent)
        .ok_or_else(|| overflow("fractional power"))
}

/// `(1 + rate)^-nper`. Stays bounded for positive rates however long the
/// term, where the growth factor `(1 + rate)^nper` would overflow.
pub(crate) fn discount_factor(rate: Rate, nper: u32) -> FinCalcResult<Decimal> {
    let growth = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| overflow("discount factor"))?;
    let per_period = Decimal::ONE
        .checked_div(growth)
        .ok_or_else(|| FinCalcError::DivisionByZero {
            context: "discount factor at a rate of -100%".into(),
        })?;
    pow_int(per_period, nper)
}

/// Level payment that amortises `present_value` over `nper` periods at `rate`,
/// unrounded: `pv * r / (1 - (1+r)^-n)`. Shared by `pmt` and the EMI
/// calculators.
pub(crate) fn annuity_payment(present_value: Money, rate: Rate, nper: u32) -> FinCalcResult<Money> {
    if nper == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(present_value / Decimal::from(nper));
    }

    let denominator = Decimal::ONE - discount_factor(rate, nper)?;
    if denominator.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    present_value
        .checked_mul(rate)
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| overflow("PMT"))
}

fn overflow(context: &str) -> FinCalcError {
    FinCalcError::Overflow {
        context: context.into(),
    }
}

// ---------------------------------------------------------------------------
// TVM primitives
// ---------------------------------------------------------------------------

/// Future Value of a single sum: `pv * (1 + rate)^n`, rounded to cents.
pub fn fv(present_value: Money, rate: Rate, nper: u32) -> FinCalcResult<Money> {
    let factor = pow_int(Decimal::ONE + rate, nper)?;
    let value = present_value
        .checked_mul(factor)
        .ok_or_else(|| overflow("FV"))?;
    Ok(value.round_dp(2))
}

/// Present Value of a single sum: `fv * (1 + rate)^-n`, rounded to cents.
pub fn pv(future_value: Money, rate: Rate, nper: u32) -> FinCalcResult<Money> {
    let discount = discount_factor(rate, nper)?;
    let value = future_value
        .checked_mul(discount)
        .ok_or_else(|| overflow("PV"))?;
    Ok(value.round_dp(2))
}

/// Payment (PMT) of an ordinary annuity, rounded to cents.
///
/// Zero rate degenerates to straight-line repayment `pv / n`.
pub fn pmt(present_value: Money, rate: Rate, nper: u32) -> FinCalcResult<Money> {
    Ok(annuity_payment(present_value, rate, nper)?.round_dp(2))
}

/// Number of periods (NPER) needed to repay `present_value` with level
/// payments of `payment`, rounded to two decimals.
pub fn nper(present_value: Money, payment: Money, rate: Rate) -> FinCalcResult<Decimal> {
    if rate.is_zero() {
        if payment.is_zero() {
            return Err(FinCalcError::DivisionByZero {
                context: "NPER payment".into(),
            });
        }
        return Ok((present_value / payment).round_dp(2));
    }

    let interest = present_value * rate;
    let remainder = payment - interest;
    if payment <= interest {
        // Payment never covers the interest, so the balance never amortises.
        return Err(FinCalcError::NonPositiveLogarithm {
            context: "NPER: payment must exceed per-period interest".into(),
            argument: remainder,
        });
    }

    let ratio = payment / remainder;
    let growth = Decimal::ONE + rate;
    if ratio <= Decimal::ZERO {
        return Err(FinCalcError::NonPositiveLogarithm {
            context: "NPER payment ratio".into(),
            argument: ratio,
        });
    }
    if growth <= Decimal::ZERO {
        return Err(FinCalcError::NonPositiveLogarithm {
            context: "NPER growth factor".into(),
            argument: growth,
        });
    }

    let numerator = ratio.checked_ln().ok_or_else(|| overflow("NPER logarithm"))?;
    let denominator = growth.checked_ln().ok_or_else(|| overflow("NPER logarithm"))?;
    if denominator.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "NPER log growth".into(),
        });
    }
    Ok((numerator / denominator).round_dp(2))
}

/// Per-period rate implied by `present_value`, level `payment` and `nper`.
///
/// Cash flows follow the usual sign convention: money received and money
/// paid carry opposite signs (borrow `1000`, repay `-88.85`). Returns the
/// solver's best estimate even when it stops without converging; see
/// [`solve_rate`] for the diagnostics.
pub fn rate(present_value: Money, payment: Money, nper: u32) -> FinCalcResult<Rate> {
    let solution = solve_rate(present_value, payment, nper)?;
    if !solution.converged {
        warn!(
            "rate | pv={present_value}, pmt={payment}, n={nper} | no convergence after {} iterations (last step {}), returning best estimate {}",
            solution.iterations, solution.last_delta, solution.rate
        );
    }
    Ok(solution.rate)
}

/// Residual of `pv + pmt * (1 - (1+g)^-n) / g` and its derivative in `g`.
/// `None` once any term leaves the Decimal range.
fn rate_residual(
    present_value: Money,
    payment: Money,
    nper: u32,
    guess: Rate,
) -> Option<(Decimal, Decimal)> {
    let n = Decimal::from(nper);
    let per_period = Decimal::ONE.checked_div(Decimal::ONE + guess)?;
    let discount = pow_int(per_period, nper).ok()?;

    let (annuity, d_annuity) = if guess.abs() < SMALL_RATE {
        // a(g) ~ n - n(n+1)/2 * g
        let slope = n.checked_mul(n + Decimal::ONE)? / dec!(2);
        (n.checked_sub(slope.checked_mul(guess)?)?, -slope)
    } else {
        let repaid = Decimal::ONE - discount;
        let annuity = repaid.checked_div(guess)?;
        // d/dg [(1 - (1+g)^-n) / g] = (n (1+g)^-(n+1) g - (1 - (1+g)^-n)) / g^2
        let numerator = n
            .checked_mul(discount)?
            .checked_mul(per_period)?
            .checked_mul(guess)?
            .checked_sub(repaid)?;
        (annuity, numerator.checked_div(guess.checked_mul(guess)?)?)
    };

    let f = present_value.checked_add(payment.checked_mul(annuity)?)?;
    let df = payment.checked_mul(d_annuity)?;
    Some((f, df))
}

/// Damped Newton-Raphson on the discounted annuity equation
/// `pv + pmt * (1 - (1+g)^-n) / g = 0`.
///
/// Each step is halved until the new guess stays inside `[-0.99, 10]`, is
/// representable, and does not increase the residual. When no such step
/// exists the solver stops and reports the last good guess as unconverged.
pub fn solve_rate(present_value: Money, payment: Money, nper: u32) -> FinCalcResult<RateSolution> {
    if nper == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods cannot be zero".into(),
        });
    }

    let stalled = |rate: Rate, iterations: u32, last_delta: Decimal| RateSolution {
        rate,
        iterations,
        converged: false,
        last_delta,
    };

    let mut guess = INITIAL_RATE_GUESS;
    let mut last_delta = Decimal::MAX;
    let Some((mut f, mut df)) = rate_residual(present_value, payment, nper, guess) else {
        return Ok(stalled(guess, 0, last_delta));
    };

    for i in 1..=MAX_RATE_ITERATIONS {
        let Some(step) = f.checked_div(df) else {
            return Ok(stalled(guess, i, last_delta));
        };
        last_delta = step.abs();

        if last_delta < RATE_TOLERANCE {
            return Ok(RateSolution {
                rate: guess - step,
                iterations: i,
                converged: true,
                last_delta,
            });
        }

        let mut trial = step;
        let mut accepted = None;
        for _ in 0..MAX_STEP_HALVINGS {
            let candidate = guess
                .checked_sub(trial)
                .map(|g| g.clamp(MIN_RATE, MAX_RATE));
            if let Some((g, (next_f, next_df))) = candidate
                .and_then(|g| rate_residual(present_value, payment, nper, g).map(|r| (g, r)))
            {
                if next_f.abs() <= f.abs() {
                    accepted = Some((g, next_f, next_df));
                    break;
                }
            }
            trial /= dec!(2);
        }

        match accepted {
            Some((g, next_f, next_df)) => {
                guess = g;
                f = next_f;
                df = next_df;
            }
            None => return Ok(stalled(guess, i, last_delta)),
        }
    }

    Ok(stalled(guess, MAX_RATE_ITERATIONS, last_delta))
}
