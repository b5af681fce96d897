//! json-stable: deterministic JSON serialization with sorted object keys.
//!
//! Object keys are sorted before their members are written, so two values
//! that differ only in member insertion order produce the same string.
//! Arrays keep their element order. The diff uses this as its leaf
//! equality fallback and operation formatting uses it for display; it is
//! never the wire format of an operation.

use serde_json::{Number, Value};

/// Serialize `value` to a deterministic JSON string with sorted object keys.
pub fn stringify(val: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, val);
    out
}

fn write_value(out: &mut String, val: &Value) {
    match val {
        Value::Number(n) => write_number(out, n),
        Value::Null | Value::Bool(_) | Value::String(_) => out.push_str(&val.to_string()),
        Value::Array(arr) => {
            out.push('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_value(out, &obj[key.as_str()]);
            }
            out.push('}');
        }
    }
}

/// Floats holding an integral value are written in integer form, so `1.0`
/// and `1` share one spelling. Magnitudes from `1e21` up keep the float
/// form.
fn write_number(out: &mut String, n: &Number) {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                out.push('0');
            } else {
                out.push_str(&format!("{f:.0}"));
            }
        }
        _ => out.push_str(&n.to_string()),
    }
}
