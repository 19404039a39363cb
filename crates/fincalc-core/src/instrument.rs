//! Call logging for engine functions.
//!
//! The calculators never log on their own; adapters wrap a call here to get
//! one `info` line per success and one `error` line per failure:
//!
//! ```
//! use fincalc_core::instrument::traced;
//! use fincalc_core::time_value;
//! use rust_decimal_macros::dec;
//!
//! let payment = traced(
//!     "pmt",
//!     format_args!("pv=1000, rate=0.01, n=12"),
//!     || time_value::pmt(dec!(1000), dec!(0.01), 12),
//! )
//! .unwrap();
//! assert_eq!(payment, dec!(88.85));
//! ```

use log::{error, info};
use std::fmt::{Debug, Display};

use crate::FinCalcResult;

/// Run `call`, logging `operation | params | result=...` or `... | error=...`.
pub fn traced<T, F>(operation: &str, params: impl Display, call: F) -> FinCalcResult<T>
where
    T: Debug,
    F: FnOnce() -> FinCalcResult<T>,
{
    traced_with(operation, params, call, |value| format!("{value:?}"))
}

/// Like [`traced`], but `summarize` decides what the success line shows.
/// Useful for large results such as a 360-row schedule.
pub fn traced_with<T, F, S>(
    operation: &str,
    params: impl Display,
    call: F,
    summarize: S,
) -> FinCalcResult<T>
where
    F: FnOnce() -> FinCalcResult<T>,
    S: FnOnce(&T) -> String,
{
    match call() {
        Ok(value) => {
            info!("{operation} | {params} | result={}", summarize(&value));
            Ok(value)
        }
        Err(e) => {
            error!("{operation} | {params} | error={e}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinCalcError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_traced_passes_value_through() {
        let v = traced("double", "x=2", || Ok(dec!(2) * dec!(2))).unwrap();
        assert_eq!(v, dec!(4));
    }

    #[test]
    fn test_traced_passes_error_through() {
        let err = traced("fail", "x=0", || -> FinCalcResult<Decimal> {
            Err(FinCalcError::DivisionByZero {
                context: "test".into(),
            })
        })
        .unwrap_err();
        assert!(matches!(err, FinCalcError::DivisionByZero { .. }));
    }

    #[test]
    fn test_traced_with_returns_full_value() {
        let rows = traced_with(
            "rows",
            "n=3",
            || Ok(vec![1, 2, 3]),
            |v| format!("{} rows", v.len()),
        )
        .unwrap();
        assert_eq!(rows, vec![1, 2, 3]);
    }
}
