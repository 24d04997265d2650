use serde_json::Value;
use std::io;

use super::{format_scalar, is_simulation};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if is_simulation(value) {
        // Long format: regime,field,value — one row per numeric output.
        let _ = wtr.write_record(["regime", "field", "value"]);
        for regime in ["micro", "reel"] {
            if let Some(Value::Object(map)) = value.get(regime) {
                for (key, val) in map {
                    let _ = wtr.write_record([regime, key.as_str(), &format_scalar(val)]);
                }
            }
        }
        for key in ["activity_type", "recommendation", "error"] {
            if let Some(val) = value.get(key) {
                if !val.is_null() {
                    let _ = wtr.write_record(["", key, &format_scalar(val)]);
                }
            }
        }
        let _ = wtr.flush();
        return;
    }

    match value {
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            let rows: &serde_json::Map<String, Value> = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            for (key, val) in rows {
                let _ = wtr.write_record([key.as_str(), &format_scalar(val)]);
            }
        }
        _ => {
            let _ = wtr.write_record([&format_scalar(value)]);
        }
    }

    let _ = wtr.flush();
}
