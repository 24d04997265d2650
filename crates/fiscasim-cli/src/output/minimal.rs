use serde_json::Value;

use super::{format_scalar, is_simulation};

/// Print just the key answer values from the output.
pub fn print_minimal(value: &Value) {
    // Full simulation: the two net incomes are the answer.
    if is_simulation(value) {
        if let Some(error) = value.get("error").and_then(Value::as_str) {
            println!("{}", error);
            return;
        }
        let micro_net = value
            .pointer("/micro/net_income_after_all")
            .map(format_scalar)
            .unwrap_or_default();
        let reel_net = value
            .pointer("/reel/net_income_after_all_contributions")
            .map(format_scalar)
            .unwrap_or_default();
        println!("micro: {micro_net}");
        println!("reel: {reel_net}");
        return;
    }

    // Otherwise unwrap the computation envelope if present.
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "net_income_after_all",
        "net_income_after_all_contributions",
        "tax_amount",
        "message",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_scalar(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(result_obj));
}
