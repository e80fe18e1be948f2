use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanMathError;
use crate::types::{Money, Percent, Rate, DISPLAY_DP};
use crate::LoanMathResult;

pub const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT_DIVISOR: Decimal = dec!(100);

/// Convert an annual percentage (5 = 5%) into a monthly decimal rate.
pub fn monthly_rate(annual_rate_pct: Percent) -> Rate {
    annual_rate_pct / PERCENT_DIVISOR / MONTHS_PER_YEAR
}

/// `(1 + rate)^periods`, failing instead of overflowing the Decimal range.
pub fn compound_factor(rate: Rate, periods: u32) -> LoanMathResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powi(i64::from(periods))
        .ok_or_else(|| LoanMathError::Overflow {
            context: format!("compound factor (1 + {rate})^{periods}"),
        })
}

/// Fixed monthly payment that amortizes `principal` over `term_months`.
///
/// `payment = P * r(1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate.
/// The formula is undefined at `r = 0`, so a rate that rounds to zero
/// at display precision repays the principal in equal parts instead.
pub fn amortized_payment(
    principal: Money,
    annual_rate_pct: Percent,
    term_months: u32,
) -> LoanMathResult<Money> {
    if term_months == 0 {
        return Err(LoanMathError::InvalidInput {
            field: "term_months".into(),
            reason: "Cannot amortize over zero periods".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(LoanMathError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    let periods = Decimal::from(term_months);
    if annual_rate_pct.round_dp(DISPLAY_DP).is_zero() {
        return Ok(principal / periods);
    }

    let rate = monthly_rate(annual_rate_pct);
    let factor = compound_factor(rate, term_months)?;
    let denominator = factor - Decimal::ONE;

    // Rate too small to move the factor at 28 significant digits.
    if denominator.is_zero() {
        return Ok(principal / periods);
    }

    let overflow = || LoanMathError::Overflow {
        context: "amortized payment".into(),
    };
    let numerator = rate.checked_mul(factor).ok_or_else(overflow)?;
    let annuity = numerator.checked_div(denominator).ok_or_else(overflow)?;
    principal.checked_mul(annuity).ok_or_else(overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_from_percent() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(6)), dec!(0.005));
    }

    #[test]
    fn test_compound_factor_basic() {
        assert_eq!(compound_factor(dec!(0.01), 2).unwrap(), dec!(1.0201));
        assert_eq!(compound_factor(dec!(0.05), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_compound_factor_overflow_is_reported() {
        let err = compound_factor(dec!(1.0), 200).unwrap_err();
        assert!(matches!(err, LoanMathError::Overflow { .. }));
    }

    #[test]
    fn test_payment_one_year_at_five_percent() {
        let pmt = amortized_payment(dec!(1000), dec!(5), 12).unwrap();
        // 1000 * 0.0041667 * 1.0511619 / 0.0511619 ≈ 85.6075
        assert!((pmt - dec!(85.6075)).abs() < dec!(0.0001), "got {pmt}");
        assert_eq!(pmt.round_dp(2), dec!(85.61));
    }

    #[test]
    fn test_payment_single_month_is_principal_plus_interest() {
        let pmt = amortized_payment(dec!(1000), dec!(5), 1).unwrap();
        let expected = dec!(1000) * (Decimal::ONE + monthly_rate(dec!(5)));
        assert!((pmt - expected).abs() < dec!(0.0000001), "got {pmt}");
    }

    #[test]
    fn test_payment_zero_rate_splits_principal() {
        let pmt = amortized_payment(dec!(1200), dec!(0), 12).unwrap();
        assert_eq!(pmt, dec!(100));
    }

    #[test]
    fn test_payment_rate_rounding_to_zero_splits_principal() {
        let pmt = amortized_payment(dec!(1200), dec!(0.004), 12).unwrap();
        assert_eq!(pmt, dec!(100));
    }

    #[test]
    fn test_payment_zero_term_rejected() {
        let err = amortized_payment(dec!(1000), dec!(5), 0).unwrap_err();
        assert_eq!(err.field(), Some("term_months"));
    }

    #[test]
    fn test_payment_negative_rate_rejected() {
        let err = amortized_payment(dec!(1000), dec!(-1), 12).unwrap_err();
        assert_eq!(err.field(), Some("annual_rate_pct"));
    }

    #[test]
    fn test_payment_overflow_reported_not_panicking() {
        let err = amortized_payment(dec!(1000), dec!(1200), 5000).unwrap_err();
        assert!(matches!(err, LoanMathError::Overflow { .. }));
    }
}
