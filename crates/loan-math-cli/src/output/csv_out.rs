use serde_json::Value;
use std::io;

use super::flatten;

/// Write output as CSV to stdout. Values keep full precision.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match body {
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        Value::Object(_) => {
            let mut fields = Vec::new();
            flatten("", body, &mut fields);

            // Nested record lists are written as their own CSV blocks
            let (arrays, scalars): (Vec<_>, Vec<_>) =
                fields.into_iter().partition(|(_, v)| v.is_array());

            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in &scalars {
                let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
            }
            let _ = wtr.flush();

            for (_, val) in arrays {
                if let Value::Array(arr) = val {
                    println!();
                    let mut block = csv::WriterBuilder::new()
                        .flexible(true)
                        .from_writer(io::stdout().lock());
                    write_array_csv(&mut block, arr);
                    let _ = block.flush();
                }
            }
            return;
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(body)]);
        }
    }

    let _ = wtr.flush();
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
