use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::breakdown::loan_totals;
use super::LoanInput;
use crate::time_value::amortized_payment;
use crate::types::Money;
use crate::LoanMathResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermLabel {
    /// Half the original term, rounded down.
    Shorter,
    /// Double the original term.
    Longer,
}

impl fmt::Display for TermLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermLabel::Shorter => write!(f, "Shorter Term"),
            TermLabel::Longer => write!(f, "Longer Term"),
        }
    }
}

impl TermLabel {
    /// Term this variant uses for a loan of `term_months`.
    pub fn term_for(self, term_months: u32) -> u32 {
        match self {
            TermLabel::Shorter => term_months / 2,
            TermLabel::Longer => term_months.saturating_mul(2),
        }
    }
}

/// The same loan repaid over a different number of months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermComparison {
    pub term_months: u32,
    pub label: TermLabel,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
}

/// Shorter and longer variants of `input`, in that order.
///
/// A one-month loan has no shorter variant (zero periods cannot be
/// amortized), so only the longer one is returned.
pub fn compute_term_comparisons(input: &LoanInput) -> LoanMathResult<Vec<TermComparison>> {
    let mut comparisons = Vec::with_capacity(2);

    for label in [TermLabel::Shorter, TermLabel::Longer] {
        let term_months = label.term_for(input.term_months);
        if term_months == 0 {
            trace!("skipping {label}: zero-month term");
            continue;
        }

        let monthly_payment =
            amortized_payment(input.principal, input.annual_rate_pct, term_months)?;
        let (total_payment, total_interest) =
            loan_totals(input.principal, monthly_payment, term_months)?;

        comparisons.push(TermComparison {
            term_months,
            label,
            monthly_payment,
            total_payment,
            total_interest,
        });
    }

    Ok(comparisons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoanMathError;
    use crate::loan::compute_breakdown;
    use rust_decimal_macros::dec;

    #[test]
    fn test_terms_are_half_and_double() {
        let input = LoanInput::new(dec!(1000), dec!(5), 12);
        let c = compute_term_comparisons(&input).unwrap();

        assert_eq!(c.len(), 2);
        assert_eq!((c[0].label, c[0].term_months), (TermLabel::Shorter, 6));
        assert_eq!((c[1].label, c[1].term_months), (TermLabel::Longer, 24));
    }

    #[test]
    fn test_odd_term_rounds_down() {
        let input = LoanInput::new(dec!(1000), dec!(5), 7);
        let c = compute_term_comparisons(&input).unwrap();
        assert_eq!(c[0].term_months, 3);
        assert_eq!(c[1].term_months, 14);
    }

    #[test]
    fn test_known_values_for_six_and_twenty_four_months() {
        let input = LoanInput::new(dec!(1000), dec!(5), 12);
        let c = compute_term_comparisons(&input).unwrap();

        // 6 months ≈ 169.1056, 24 months ≈ 43.8714
        assert!((c[0].monthly_payment - dec!(169.1056)).abs() < dec!(0.0001));
        assert!((c[1].monthly_payment - dec!(43.8714)).abs() < dec!(0.0001));
        assert!((c[0].total_interest - dec!(14.6339)).abs() < dec!(0.0001));
        assert!((c[1].total_interest - dec!(52.9134)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_shorter_pays_more_monthly_less_interest() {
        let input = LoanInput::new(dec!(25_000), dec!(8.5), 60);
        let base = compute_breakdown(&input).unwrap();
        let c = compute_term_comparisons(&input).unwrap();

        assert!(c[0].monthly_payment > base.monthly_payment);
        assert!(c[0].total_interest < base.total_interest);
        assert!(c[1].monthly_payment < base.monthly_payment);
        assert!(c[1].total_interest > base.total_interest);
    }

    #[test]
    fn test_single_month_omits_shorter() {
        let input = LoanInput::new(dec!(1000), dec!(5), 1);
        let c = compute_term_comparisons(&input).unwrap();

        assert_eq!(c.len(), 1);
        assert_eq!(c[0].label, TermLabel::Longer);
        assert_eq!(c[0].term_months, 2);
    }

    #[test]
    fn test_longer_term_total_overflow_is_reported() {
        // 12 months totals ≈ 7.81e28 (fits); 24 months ≈ 8.00e28 (does not)
        let input = LoanInput::new(dec!(76_000_000_000_000_000_000_000_000_000), dec!(5), 12);
        assert!(compute_breakdown(&input).is_ok());

        let err = compute_term_comparisons(&input).unwrap_err();
        assert!(matches!(err, LoanMathError::Overflow { .. }), "got {err:?}");
    }

    #[test]
    fn test_label_display_and_serde() {
        assert_eq!(TermLabel::Shorter.to_string(), "Shorter Term");
        assert_eq!(
            serde_json::to_string(&TermLabel::Longer).unwrap(),
            "\"longer\""
        );
    }
}
