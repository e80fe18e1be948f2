use clap::Args;
use log::info;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_math_core::loan::{self, LoanInput};

use crate::input;

/// Loan parameters shared by every loan command
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (5 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long, alias = "months")]
    pub term: Option<u32>,
}

/// Arguments for the savings comparison
#[derive(Args)]
pub struct SavingsArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Print the month-by-month savings balance at this annual rate (percent)
    /// instead of the summary
    #[arg(long)]
    pub trace_rate: Option<Decimal>,
}

fn resolve_input(args: LoanArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_months: args.term.ok_or("--term is required (or provide --input)")?,
        }
    };
    info!(
        "loan input: principal={} rate={}% term={}m",
        loan_input.principal, loan_input.annual_rate_pct, loan_input.term_months
    );
    Ok(loan_input)
}

pub fn run_analyze(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_input(args)?;
    let result = loan::analyze_loan(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_input(args)?;
    let result = loan::calculate_payment(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_input(args)?;
    let result = loan::compare_terms(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_savings(args: SavingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_input(args.loan)?;

    let Some(rate) = args.trace_rate else {
        let result = loan::project_savings(&loan_input)?;
        return Ok(serde_json::to_value(result)?);
    };

    loan::validate_loan_input(&loan_input)?;
    let breakdown = loan::compute_breakdown(&loan_input)?;
    let rows = loan::savings_trace(
        rate,
        loan_input.term_months,
        breakdown.monthly_payment,
        loan_input.principal,
    )?;
    Ok(serde_json::to_value(rows)?)
}
