use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanMathError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanMathError {
    /// Field name for `InvalidInput`, if this is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            LoanMathError::InvalidInput { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LoanMathError {
    fn from(e: serde_json::Error) -> Self {
        LoanMathError::SerializationError(e.to_string())
    }
}
