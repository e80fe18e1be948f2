use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LoanInput;
use crate::error::LoanMathError;
use crate::time_value::amortized_payment;
use crate::types::Money;
use crate::LoanMathResult;

/// Payment breakdown for the loan as entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: Money,
    /// monthly_payment * term_months.
    pub total_payment: Money,
    /// total_payment - principal.
    pub total_interest: Money,
}

/// Monthly payment, total paid and total interest for `input`.
pub fn compute_breakdown(input: &LoanInput) -> LoanMathResult<LoanResult> {
    let monthly_payment =
        amortized_payment(input.principal, input.annual_rate_pct, input.term_months)?;
    let (total_payment, total_interest) =
        loan_totals(input.principal, monthly_payment, input.term_months)?;

    Ok(LoanResult {
        monthly_payment,
        total_payment,
        total_interest,
    })
}

/// Total paid and total interest for a level payment over `term_months`.
pub(crate) fn loan_totals(
    principal: Money,
    monthly_payment: Money,
    term_months: u32,
) -> LoanMathResult<(Money, Money)> {
    let total_payment = monthly_payment
        .checked_mul(Decimal::from(term_months))
        .ok_or_else(|| LoanMathError::Overflow {
            context: format!("total payment over {term_months} months"),
        })?;
    let total_interest =
        total_payment
            .checked_sub(principal)
            .ok_or_else(|| LoanMathError::Overflow {
                context: "total interest".into(),
            })?;
    Ok((total_payment, total_interest))
}
