use napi::Result as NapiResult;
use napi_derive::napi;

use loan_math_core::loan::{self, LoanInput};
use loan_math_core::session::{self, CalculatorAction, CalculatorState};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_loan(input_json: &str) -> NapiResult<LoanInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan calculator
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = loan::analyze_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_payment(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = loan::calculate_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_terms(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = loan::compare_terms(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_savings(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = loan::project_savings(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Calculator session
// ---------------------------------------------------------------------------

/// Initial form state (default values, nothing computed).
#[napi]
pub fn initial_calculator_state() -> NapiResult<String> {
    serde_json::to_string(&CalculatorState::default()).map_err(to_napi_error)
}

/// Apply one form action to a serialized state and return the next state.
#[napi]
pub fn reduce_calculator(state_json: String, action_json: String) -> NapiResult<String> {
    let state: CalculatorState = serde_json::from_str(&state_json).map_err(to_napi_error)?;
    let action: CalculatorAction = serde_json::from_str(&action_json).map_err(to_napi_error)?;
    let next = session::reduce(&state, action);
    serde_json::to_string(&next).map_err(to_napi_error)
}
