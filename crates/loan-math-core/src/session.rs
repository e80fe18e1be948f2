//! Calculator session state for a form-driven front end.
//!
//! The form, its validation errors and the last displayed analysis live in
//! one immutable [`CalculatorState`]. [`reduce`] maps a state and a user
//! action to the next state without touching the old one, so a front end
//! only stores the latest value it got back.

use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LoanMathError;
use crate::loan::{
    is_whole, run_analysis, LoanAnalysis, LoanInput, MIN_ANNUAL_RATE_PCT, MIN_PRINCIPAL,
    MIN_TERM_MONTHS,
};
use crate::types::{format_money, Money, Percent};

const DEFAULT_LOAN_AMOUNT: Money = dec!(1000);
const DEFAULT_INTEREST_RATE: Percent = dec!(5);
const DEFAULT_TERM: Decimal = dec!(12);

/// Form fields, named as the form shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    LoanAmount,
    InterestRate,
    Term,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::LoanAmount => write!(f, "Loan Amount"),
            FormField::InterestRate => write!(f, "Interest Rate (%)"),
            FormField::Term => write!(f, "Loan Term (Months)"),
        }
    }
}

/// Raw values as entered. The term stays a Decimal until validated so a
/// fractional entry can be reported instead of silently truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanForm {
    pub loan_amount: Money,
    pub interest_rate: Percent,
    pub term: Decimal,
}

impl Default for LoanForm {
    fn default() -> Self {
        Self {
            loan_amount: DEFAULT_LOAN_AMOUNT,
            interest_rate: DEFAULT_INTEREST_RATE,
            term: DEFAULT_TERM,
        }
    }
}

impl LoanForm {
    fn with(self, field: FormField, value: Decimal) -> Self {
        match field {
            FormField::LoanAmount => Self {
                loan_amount: value,
                ..self
            },
            FormField::InterestRate => Self {
                interest_rate: value,
                ..self
            },
            FormField::Term => Self { term: value, ..self },
        }
    }

    /// Check every field and build the calculator input, or report one
    /// error per failing field.
    pub fn validate(&self) -> Result<LoanInput, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.loan_amount < MIN_PRINCIPAL {
            errors.push(FieldError::new(
                FormField::LoanAmount,
                format!("Loan amount must be at least Php{MIN_PRINCIPAL}"),
            ));
        }
        if self.interest_rate < MIN_ANNUAL_RATE_PCT {
            errors.push(FieldError::new(
                FormField::InterestRate,
                "Interest rate must be positive",
            ));
        }

        let term_months = if self.term < Decimal::from(MIN_TERM_MONTHS) {
            errors.push(FieldError::new(FormField::Term, "Term must be at least 1"));
            None
        } else if !is_whole(self.term) {
            errors.push(FieldError::new(
                FormField::Term,
                "Term must be a whole number of months",
            ));
            None
        } else {
            let months = self.term.to_u32();
            if months.is_none() {
                errors.push(FieldError::new(FormField::Term, "Term is too long"));
            }
            months
        };

        match term_months {
            Some(term_months) if errors.is_empty() => Ok(LoanInput::new(
                self.loan_amount,
                self.interest_rate,
                term_months,
            )),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalculatorAction {
    /// Replace one form value.
    Edit { field: FormField, value: Decimal },
    /// Validate the form and, if valid, compute a new analysis.
    Submit,
    /// Back to the default form with nothing displayed.
    Reset,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub form: LoanForm,
    pub errors: Vec<FieldError>,
    /// Analysis of the last valid submission.
    pub analysis: Option<LoanAnalysis>,
    /// Number of successful submissions.
    pub submissions: u32,
}

impl CalculatorState {
    pub fn error_for(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Headline figures formatted for display, if anything was computed.
    pub fn summary(&self) -> Option<DisplaySummary> {
        self.analysis.as_ref().map(|a| DisplaySummary {
            monthly_payment: format_money(a.breakdown.monthly_payment),
            total_interest: format_money(a.breakdown.total_interest),
            total_payment: format_money(a.breakdown.total_payment),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySummary {
    pub monthly_payment: String,
    pub total_interest: String,
    pub total_payment: String,
}

/// Next state for `action`. `state` is left untouched.
pub fn reduce(state: &CalculatorState, action: CalculatorAction) -> CalculatorState {
    match action {
        CalculatorAction::Edit { field, value } => CalculatorState {
            form: state.form.with(field, value),
            ..state.clone()
        },
        CalculatorAction::Submit => submit(state),
        CalculatorAction::Reset => CalculatorState::default(),
    }
}

fn submit(state: &CalculatorState) -> CalculatorState {
    let input = match state.form.validate() {
        Ok(input) => input,
        Err(errors) => {
            debug!("submission rejected with {} field error(s)", errors.len());
            return CalculatorState {
                errors,
                ..state.clone()
            };
        }
    };

    match run_analysis(&input) {
        Ok(analysis) => CalculatorState {
            form: state.form,
            errors: Vec::new(),
            analysis: Some(analysis),
            submissions: state.submissions + 1,
        },
        // Only reachable when a value exceeds the Decimal range.
        Err(e) => CalculatorState {
            errors: vec![FieldError::new(field_for_error(&e), e.to_string())],
            ..state.clone()
        },
    }
}

/// Form field a calculation error is shown under. Overflow of the
/// compounding factor comes from the term; every other overflow scales
/// with the loan amount.
fn field_for_error(error: &LoanMathError) -> FormField {
    match error {
        LoanMathError::InvalidInput { field, .. } => match field.as_str() {
            "annual_rate_pct" => FormField::InterestRate,
            "term_months" => FormField::Term,
            _ => FormField::LoanAmount,
        },
        LoanMathError::Overflow { context } if context.starts_with("compound factor") => {
            FormField::Term
        }
        _ => FormField::LoanAmount,
    }
}
