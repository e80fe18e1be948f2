pub mod error;
pub mod loan;
pub mod time_value;
pub mod types;

#[cfg(feature = "session")]
pub mod session;

pub use error::LoanMathError;
pub use types::*;

/// Standard result type for all loan-math operations
pub type LoanMathResult<T> = Result<T, LoanMathError>;
