use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Periodic rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Annual rates as entered by a user, in percent (5 = 5%).
pub type Percent = Decimal;

/// Label printed in front of displayed amounts.
pub const CURRENCY_LABEL: &str = "Php";

/// Decimal places used whenever an amount is shown to a user.
pub const DISPLAY_DP: u32 = 2;

/// Render an amount for display, e.g. `Php 85.61`.
pub fn format_money(amount: Money) -> String {
    format!(
        "{} {:.2}",
        CURRENCY_LABEL,
        amount.round_dp(DISPLAY_DP)
    )
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_money_rounds_to_cents() {
        assert_eq!(format_money(dec!(85.607481788)), "Php 85.61");
        assert_eq!(format_money(dec!(1027.289781)), "Php 1027.29");
    }

    #[test]
    fn test_format_money_pads_whole_amounts() {
        assert_eq!(format_money(dec!(100)), "Php 100.00");
    }

    #[test]
    fn test_with_metadata_envelope() {
        let out = with_metadata(
            "test",
            &serde_json::json!({ "a": 1 }),
            vec!["w".into()],
            7,
            dec!(1.5),
        );
        assert_eq!(out.result, dec!(1.5));
        assert_eq!(out.warnings, vec!["w".to_string()]);
        assert_eq!(out.metadata.computation_time_us, 7);
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }
}
