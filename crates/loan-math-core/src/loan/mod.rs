//! Loan calculator: amortized payment breakdown, alternative-term
//! comparisons and "what if you saved instead" projections.
//!
//! Every function here is pure. Inputs are validated once by
//! [`validate_loan_input`]; the `compute_*` functions assume validated input
//! and only fail if the Decimal range is exceeded.

pub mod breakdown;
pub mod comparison;
pub mod savings;

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanMathError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LoanMathResult;

pub use breakdown::{compute_breakdown, LoanResult};
pub use comparison::{compute_term_comparisons, TermComparison, TermLabel};
pub use savings::{
    compute_savings_alternatives, savings_trace, SavingsAlternative, SavingsMonth,
    SAVINGS_RATES_PCT,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Smallest loan the calculator accepts.
pub const MIN_PRINCIPAL: Money = dec!(100);
/// Smallest annual interest rate (percent) the calculator accepts.
pub const MIN_ANNUAL_RATE_PCT: Percent = dec!(0.1);
/// Shortest term in months.
pub const MIN_TERM_MONTHS: u32 = 1;

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// Parameters for a single loan calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate in percent (5 = 5%).
    pub annual_rate_pct: Percent,
    /// Number of monthly payments.
    pub term_months: u32,
}

impl LoanInput {
    pub fn new(principal: Money, annual_rate_pct: Percent, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate_pct,
            term_months,
        }
    }
}

/// Everything a single submission produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub breakdown: LoanResult,
    /// Shorter term first, then longer. The shorter variant is omitted when
    /// half the term rounds down to zero months.
    pub term_comparisons: Vec<TermComparison>,
    /// One entry per rate in [`SAVINGS_RATES_PCT`], in that order.
    pub savings_alternatives: Vec<SavingsAlternative>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Full analysis: payment breakdown, term comparisons and savings alternatives.
pub fn analyze_loan(input: &LoanInput) -> LoanMathResult<ComputationOutput<LoanAnalysis>> {
    let start = Instant::now();
    validate_loan_input(input)?;

    let analysis = run_analysis(input)?;
    let warnings = comparison_warnings(input, &analysis.term_comparisons);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortized loan payment with term comparison and savings alternatives",
        &assumptions(input),
        warnings,
        elapsed,
        analysis,
    ))
}

/// Payment breakdown only.
pub fn calculate_payment(input: &LoanInput) -> LoanMathResult<ComputationOutput<LoanResult>> {
    let start = Instant::now();
    validate_loan_input(input)?;

    let breakdown = compute_breakdown(input)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortized loan payment (annuity formula)",
        &assumptions(input),
        Vec::new(),
        elapsed,
        breakdown,
    ))
}

/// Half-term and double-term variants at the same rate.
pub fn compare_terms(
    input: &LoanInput,
) -> LoanMathResult<ComputationOutput<Vec<TermComparison>>> {
    let start = Instant::now();
    validate_loan_input(input)?;

    let comparisons = compute_term_comparisons(input)?;
    let warnings = comparison_warnings(input, &comparisons);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Term comparison: half and double the original term",
        &assumptions(input),
        warnings,
        elapsed,
        comparisons,
    ))
}

/// Savings alternatives for the loan's own payment stream.
pub fn project_savings(
    input: &LoanInput,
) -> LoanMathResult<ComputationOutput<Vec<SavingsAlternative>>> {
    let start = Instant::now();
    validate_loan_input(input)?;

    let breakdown = compute_breakdown(input)?;
    let alternatives = compute_savings_alternatives(
        input.principal,
        input.term_months,
        breakdown.monthly_payment,
        breakdown.total_payment,
    )?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly-compounded savings of the loan payment, deposited at period end",
        &assumptions(input),
        Vec::new(),
        elapsed,
        alternatives,
    ))
}

/// Run every calculation without validation or the envelope.
pub fn run_analysis(input: &LoanInput) -> LoanMathResult<LoanAnalysis> {
    let breakdown = compute_breakdown(input)?;
    let term_comparisons = compute_term_comparisons(input)?;
    let savings_alternatives = compute_savings_alternatives(
        input.principal,
        input.term_months,
        breakdown.monthly_payment,
        breakdown.total_payment,
    )?;

    debug!(
        "analyzed loan principal={} rate={}% term={}m payment={}",
        input.principal, input.annual_rate_pct, input.term_months, breakdown.monthly_payment
    );

    Ok(LoanAnalysis {
        breakdown,
        term_comparisons,
        savings_alternatives,
    })
}

fn comparison_warnings(input: &LoanInput, comparisons: &[TermComparison]) -> Vec<String> {
    let mut warnings = Vec::new();
    if !comparisons.iter().any(|c| c.label == TermLabel::Shorter) {
        warn!(
            "shorter term omitted for {}-month loan",
            input.term_months
        );
        warnings.push(format!(
            "Shorter term not applicable: half of {} months rounds down to zero",
            input.term_months
        ));
    }
    warnings
}

fn assumptions(input: &LoanInput) -> serde_json::Value {
    serde_json::json!({
        "principal": input.principal.to_string(),
        "annual_rate_pct": input.annual_rate_pct.to_string(),
        "term_months": input.term_months,
        "savings_rates_pct": SAVINGS_RATES_PCT
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Range checks applied before any calculation.
pub fn validate_loan_input(input: &LoanInput) -> LoanMathResult<()> {
    if input.principal < MIN_PRINCIPAL {
        return Err(LoanMathError::InvalidInput {
            field: "principal".into(),
            reason: format!("Loan amount must be at least {MIN_PRINCIPAL}"),
        });
    }
    if input.annual_rate_pct < MIN_ANNUAL_RATE_PCT {
        return Err(LoanMathError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: format!("Interest rate must be at least {MIN_ANNUAL_RATE_PCT}%"),
        });
    }
    if input.term_months < MIN_TERM_MONTHS {
        return Err(LoanMathError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }
    Ok(())
}

/// Whether `value` is a whole number (used for term entered as a Decimal).
pub(crate) fn is_whole(value: Decimal) -> bool {
    value.fract().is_zero()
}
