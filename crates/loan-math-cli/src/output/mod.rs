pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use loan_math_core::DISPLAY_DP;
use rust_decimal::Decimal;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar for human-facing formats. Decimal amounts (serialised as
/// strings) are shown to two places.
pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => match s.parse::<Decimal>() {
            Ok(d) => format!("{:.2}", d.round_dp(DISPLAY_DP)),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Flatten nested objects into `parent.child` keys; arrays are kept whole.
pub(crate) fn flatten<'a>(prefix: &str, value: &'a Value, out: &mut Vec<(String, &'a Value)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&name, val, out);
            }
        }
        _ => out.push((prefix.to_string(), value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_scalar_rounds_decimal_strings() {
        assert_eq!(format_scalar(&json!("85.607481788467")), "85.61");
        assert_eq!(format_scalar(&json!("shorter")), "shorter");
        assert_eq!(format_scalar(&json!(12)), "12");
        assert_eq!(format_scalar(&Value::Null), "-");
    }

    #[test]
    fn test_flatten_nested_objects() {
        let v = json!({ "breakdown": { "monthly_payment": "1", "total_payment": "2" }, "n": 3 });
        let mut out = Vec::new();
        flatten("", &v, &mut out);
        let keys: Vec<&str> = out.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["breakdown.monthly_payment", "breakdown.total_payment", "n"]);
    }
}
