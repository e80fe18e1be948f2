use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, format_scalar};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result);
                print_envelope_notes(map);
            } else {
                print_result(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", format_scalar(value)),
    }
}

/// Scalars (including nested objects, flattened) go into one Field/Value
/// table; each array of records gets a table of its own.
fn print_result(result: &Value) {
    match result {
        Value::Object(_) => {
            let mut fields = Vec::new();
            flatten("", result, &mut fields);

            let (arrays, scalars): (Vec<_>, Vec<_>) =
                fields.into_iter().partition(|(_, v)| v.is_array());

            if !scalars.is_empty() {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (key, val) in &scalars {
                    builder.push_record([key.clone(), format_scalar(val)]);
                }
                println!("{}", Table::from(builder));
            }

            for (key, val) in arrays {
                if let Value::Array(arr) = val {
                    println!("\n{}", title_case(&key));
                    print_array_table(arr);
                }
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", format_scalar(result)),
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(headers.iter().map(|h| title_case(h)));

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_scalar).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_scalar(item));
        }
    }
}

/// `months_to_reach_loan` -> `Months To Reach Loan`
fn title_case(key: &str) -> String {
    key.split(['_', '.'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
