//! "What if you saved instead": deposit the loan payment every month into
//! an account compounding monthly at a fixed hypothetical rate.
//!
//! The balance is simulated month by month rather than taken from the
//! closed-form annuity future value, because the month the balance first
//! covers the principal is part of the result.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanMathError;
use crate::time_value::monthly_rate;
use crate::types::{Money, Percent};
use crate::LoanMathResult;

/// Hypothetical annual savings rates, in the order results are reported.
pub const SAVINGS_RATES_PCT: [Percent; 3] = [dec!(2), dec!(4), dec!(6)];

/// Outcome of saving the loan payment at one hypothetical rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsAlternative {
    pub annual_rate_pct: Percent,
    /// Balance after the full term.
    pub total_saved: Money,
    /// total_saved - total loan payment.
    pub difference: Money,
    /// First month whose closing balance covers the principal.
    pub months_to_reach_loan: Option<u32>,
    pub reached_loan_amount: bool,
}

/// One month of the savings simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsMonth {
    pub month: u32,
    /// Closing balance after interest and the deposit.
    pub balance: Money,
    /// Latched: stays true once any month has covered the target.
    pub reached_loan_amount: bool,
}

/// State carried from one month to the next.
#[derive(Debug, Clone, Copy, Default)]
struct SavingsAccumulator {
    balance: Money,
    reached_in: Option<u32>,
}

impl SavingsAccumulator {
    /// Grow the balance one period, deposit at period end, latch the
    /// first month the balance reaches `target`.
    fn step(
        self,
        month: u32,
        growth: Decimal,
        deposit: Money,
        target: Money,
    ) -> LoanMathResult<Self> {
        let balance = self
            .balance
            .checked_mul(growth)
            .and_then(|b| b.checked_add(deposit))
            .ok_or_else(|| LoanMathError::Overflow {
                context: format!("savings balance at month {month}"),
            })?;

        let reached_in = self
            .reached_in
            .or_else(|| (balance >= target).then_some(month));

        Ok(Self {
            balance,
            reached_in,
        })
    }
}

/// Save `monthly_payment` for `term_months` at each rate in
/// [`SAVINGS_RATES_PCT`] and compare against the loan.
pub fn compute_savings_alternatives(
    principal: Money,
    term_months: u32,
    monthly_payment: Money,
    total_payment: Money,
) -> LoanMathResult<Vec<SavingsAlternative>> {
    SAVINGS_RATES_PCT
        .iter()
        .map(|&annual_rate_pct| -> LoanMathResult<SavingsAlternative> {
            let growth = Decimal::ONE + monthly_rate(annual_rate_pct);
            let end = (1..=term_months).try_fold(SavingsAccumulator::default(), |acc, month| {
                acc.step(month, growth, monthly_payment, principal)
            })?;

            Ok(SavingsAlternative {
                annual_rate_pct,
                total_saved: end.balance,
                difference: end.balance - total_payment,
                months_to_reach_loan: end.reached_in,
                reached_loan_amount: end.reached_in.is_some(),
            })
        })
        .collect()
}

/// Month-by-month balances of the same simulation at a single rate.
pub fn savings_trace(
    annual_rate_pct: Percent,
    term_months: u32,
    monthly_deposit: Money,
    target: Money,
) -> LoanMathResult<Vec<SavingsMonth>> {
    if annual_rate_pct < Decimal::ZERO {
        return Err(LoanMathError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Savings rate cannot be negative".into(),
        });
    }

    let growth = Decimal::ONE + monthly_rate(annual_rate_pct);
    let mut acc = SavingsAccumulator::default();
    let mut rows = Vec::with_capacity(term_months as usize);

    for month in 1..=term_months {
        acc = acc.step(month, growth, monthly_deposit, target)?;
        rows.push(SavingsMonth {
            month,
            balance: acc.balance,
            reached_loan_amount: acc.reached_in.is_some(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rates_reported_in_fixed_order() {
        let alts = compute_savings_alternatives(dec!(1000), 12, dec!(90), dec!(1080)).unwrap();
        let rates: Vec<Decimal> = alts.iter().map(|a| a.annual_rate_pct).collect();
        assert_eq!(rates, vec![dec!(2), dec!(4), dec!(6)]);
    }

    #[test]
    fn test_first_deposit_earns_nothing() {
        let rows = savings_trace(dec!(6), 2, dec!(200), dec!(1000)).unwrap();
        assert_eq!(rows[0].balance, dec!(200));
        // 200 * 1.005 + 200
        assert_eq!(rows[1].balance, dec!(401));
    }

    #[test]
    fn test_latch_on_first_crossing() {
        // At 6%: 200, 401, 603.005, 806.020025, 1010.050125125
        let alts = compute_savings_alternatives(dec!(1000), 12, dec!(200), dec!(2400)).unwrap();
        let six = alts[2];
        assert_eq!(six.months_to_reach_loan, Some(5));
        assert!(six.reached_loan_amount);

        let rows = savings_trace(dec!(6), 12, dec!(200), dec!(1000)).unwrap();
        assert_eq!(rows[4].balance, dec!(1010.050125125));
        assert!(!rows[3].reached_loan_amount);
        assert!(rows[4..].iter().all(|r| r.reached_loan_amount));
    }

    #[test]
    fn test_not_reached_when_deposits_fall_short() {
        let alts = compute_savings_alternatives(dec!(10_000), 12, dec!(100), dec!(1200)).unwrap();
        for alt in &alts {
            assert_eq!(alt.months_to_reach_loan, None);
            assert!(!alt.reached_loan_amount);
        }
    }

    #[test]
    fn test_difference_is_saved_minus_paid() {
        let alts = compute_savings_alternatives(dec!(1000), 12, dec!(90), dec!(1080)).unwrap();
        for alt in &alts {
            assert_eq!(alt.difference, alt.total_saved - dec!(1080));
            assert!(alt.total_saved > dec!(1080));
        }
    }

    #[test]
    fn test_total_saved_non_decreasing_in_rate() {
        let alts = compute_savings_alternatives(dec!(5000), 48, dec!(120), dec!(5760)).unwrap();
        assert!(alts[0].total_saved <= alts[1].total_saved);
        assert!(alts[1].total_saved <= alts[2].total_saved);
    }

    #[test]
    fn test_trace_matches_alternative_end_balance() {
        let alts = compute_savings_alternatives(dec!(1000), 12, dec!(85), dec!(1020)).unwrap();
        let rows = savings_trace(dec!(4), 12, dec!(85), dec!(1000)).unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[11].balance, alts[1].total_saved);
    }

    #[test]
    fn test_trace_rejects_negative_rate() {
        let err = savings_trace(dec!(-1200), 12, dec!(100), dec!(1000)).unwrap_err();
        assert_eq!(err.field(), Some("annual_rate_pct"));
    }

    #[test]
    fn test_trace_at_zero_rate_sums_deposits() {
        let rows = savings_trace(dec!(0), 3, dec!(100), dec!(250)).unwrap();
        assert_eq!(rows[2].balance, dec!(300));
        assert_eq!(rows.iter().filter(|r| r.reached_loan_amount).count(), 1);
    }

    #[test]
    fn test_zero_term_saves_nothing() {
        let alts = compute_savings_alternatives(dec!(1000), 0, dec!(85), dec!(0)).unwrap();
        assert!(alts.iter().all(|a| a.total_saved.is_zero() && !a.reached_loan_amount));
    }
}
