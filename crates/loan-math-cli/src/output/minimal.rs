use serde_json::Value;

use super::{flatten, format_scalar};

/// Key answer fields, most important first. Matched against the last
/// segment of a flattened key, so `breakdown.monthly_payment` counts.
const PRIORITY_KEYS: [&str; 3] = ["monthly_payment", "total_payment", "total_saved"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    println!("{}", minimal_answer(result_obj));
}

fn minimal_answer(result: &Value) -> String {
    match result {
        Value::Object(_) => {
            let mut fields = Vec::new();
            flatten("", result, &mut fields);

            for key in PRIORITY_KEYS {
                let hit = fields.iter().find(|(name, val)| {
                    !val.is_null() && name.rsplit('.').next() == Some(key)
                });
                if let Some((_, val)) = hit {
                    return format_scalar(val);
                }
            }

            match fields.first() {
                Some((name, val)) => format!("{}: {}", name, format_scalar(val)),
                None => String::new(),
            }
        }
        // One line per record, first priority field found in each
        Value::Array(arr) => arr
            .iter()
            .map(minimal_answer)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => format_scalar(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_monthly_payment_wins() {
        let v = json!({
            "breakdown": { "monthly_payment": "85.6074", "total_payment": "1027.29" },
            "term_comparisons": []
        });
        assert_eq!(minimal_answer(&v), "85.61");
    }

    #[test]
    fn test_array_prints_one_line_per_record() {
        let v = json!([
            { "annual_rate_pct": "2", "total_saved": "1036.759" },
            { "annual_rate_pct": "4", "total_saved": "1046.334" }
        ]);
        assert_eq!(minimal_answer(&v), "1036.76\n1046.33");
    }
}
