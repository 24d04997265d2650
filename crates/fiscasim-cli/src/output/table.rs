use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_scalar, is_simulation};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    if is_simulation(value) {
        print_simulation_tables(value);
        return;
    }

    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_envelope_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

/// Side-by-side rendering of a full simulation: one table per regime, then
/// the recommendation or error banner as prose.
fn print_simulation_tables(value: &Value) {
    if let Some(activity) = value.get("activity_type") {
        println!("Activité : {}", format_scalar(activity));
    }

    if let Some(micro) = value.get("micro") {
        println!("\nRégime micro-entreprise");
        print_flat_object(micro);
    }
    if let Some(reel) = value.get("reel") {
        println!("\nRégime réel");
        print_flat_object(reel);
    }

    if let Some(Value::String(error)) = value.get("error") {
        println!("\nErreur : {}", error);
    }
    if let Some(Value::String(rec)) = value.get("recommendation") {
        println!("\nRecommandation :\n{}", rec);
    }
}

fn print_envelope_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(_) = result {
        print_flat_object(result);
    }

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

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_scalar(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    } else {
        println!("{}", value);
    }
}
