use fincalc_core::interest;
use fincalc_core::planning;
use fincalc_core::time_value;
use fincalc_core::FinCalcError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// SIP / lumpsum
// ===========================================================================

#[test]
fn test_sip_maturity_exceeds_invested() {
    for (m, r, n) in [(dec!(1000), dec!(12), 12u32), (dec!(500), dec!(10), 24)] {
        let res = planning::sip_calculator(m, r, n).unwrap();
        assert_eq!(res.total_invested, m * Decimal::from(n));
        assert!(res.maturity_value > res.total_invested);
        assert!((res.total_invested + res.total_gain - res.maturity_value).abs() <= dec!(0.01));
    }
}

#[test]
fn test_sip_is_annuity_due() {
    // Annuity-due FV = ordinary FV * (1 + r); one month at 1% on 1000
    let res = planning::sip_calculator(dec!(1000), dec!(12), 1).unwrap();
    assert_eq!(res.maturity_value, dec!(1010));
}

#[test]
fn test_lumpsum_matches_compound_interest() {
    let cases = [
        (dec!(10000), dec!(10), dec!(5)),
        (dec!(5000), dec!(8), dec!(10)),
        (dec!(2500), dec!(6.5), dec!(3)),
    ];
    for (p, r, t) in cases {
        let lump = planning::lumpsum_calculator(p, r, t).unwrap();
        let ci = interest::compound_interest(p, r, t, Decimal::ONE).unwrap();
        assert!(
            (lump.maturity_value - (p + ci)).abs() <= dec!(0.01),
            "lumpsum {} vs p + ci {}",
            lump.maturity_value,
            p + ci
        );
        assert!((lump.maturity_value - p - lump.total_gain).abs() <= dec!(0.01));
    }
}

// ===========================================================================
// Time value of money
// ===========================================================================

#[test]
fn test_fv_textbook() {
    let v = time_value::fv(dec!(1000), dec!(0.1), 2).unwrap();
    assert!((v - dec!(1210)).abs() <= dec!(1));
}

#[test]
fn test_pv_fv_round_trip() {
    let cases = [
        (dec!(1000), dec!(0.1), 2u32),
        (dec!(2500), dec!(0.0075), 36),
        (dec!(99.99), dec!(0.05), 10),
    ];
    for (x, r, n) in cases {
        let future = time_value::fv(x, r, n).unwrap();
        let back = time_value::pv(future, r, n).unwrap();
        assert!((back - x).abs() <= dec!(0.01), "{} -> {} -> {}", x, future, back);
    }
}

#[test]
fn test_pmt_nonzero_rate_branch() {
    let p = time_value::pmt(dec!(1000), dec!(0.01), 12).unwrap();
    assert!((p - dec!(88.85)).abs() <= dec!(0.5));
}

#[test]
fn test_pmt_zero_rate_branch() {
    let p = time_value::pmt(dec!(900), Decimal::ZERO, 9).unwrap();
    assert_eq!(p, dec!(100));
}

#[test]
fn test_nper_inverts_pmt() {
    let payment = time_value::pmt(dec!(5000), dec!(0.005), 48).unwrap();
    let periods = time_value::nper(dec!(5000), payment, dec!(0.005)).unwrap();
    assert!((periods - dec!(48)).abs() < dec!(0.1), "periods={}", periods);
}

#[test]
fn test_nper_zero_rate_branch() {
    assert_eq!(time_value::nper(dec!(1000), dec!(100), Decimal::ZERO).unwrap(), dec!(10));
}

#[test]
fn test_nper_insufficient_payment() {
    let err = time_value::nper(dec!(1000), dec!(5), dec!(0.01)).unwrap_err();
    assert!(matches!(err, FinCalcError::NonPositiveLogarithm { .. }));
}

#[test]
fn test_rate_inverts_pmt() {
    let payment = time_value::pmt(dec!(8000), dec!(0.0077), 48).unwrap();
    let r = time_value::rate(dec!(8000), -payment, 48).unwrap();
    assert!((r - dec!(0.0077)).abs() < dec!(0.00001), "rate={}", r);
}

#[test]
fn test_rate_zero_when_payments_just_return_principal() {
    let solution = time_value::solve_rate(dec!(1200), dec!(-100), 12).unwrap();
    assert!(solution.converged);
    assert!(solution.rate.abs() < dec!(0.0001), "rate={}", solution.rate);
}

#[test]
fn test_rate_non_convergence_returns_best_estimate() {
    // Same-sign cash flows have no root; the solver gives up quietly.
    let solution = time_value::solve_rate(dec!(1000), dec!(100), 12).unwrap();
    assert!(!solution.converged);
    assert!(time_value::rate(dec!(1000), dec!(100), 12).is_ok());
    assert!(matches!(
        solution.into_converged().unwrap_err(),
        FinCalcError::ConvergenceFailure { .. }
    ));
}
