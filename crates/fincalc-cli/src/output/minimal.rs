use serde_json::{Map, Value};

/// Fields that carry the headline answer, in order of preference.
const PRIORITY_KEYS: [&str; 11] = [
    "emi",
    "maturity_value",
    "simple_interest",
    "compound_interest",
    "fv",
    "pv",
    "pmt",
    "nper",
    "rate",
    "mean_return",
    "formatted",
];

/// Print just the key answer value from the output.
///
/// Looks through the `result` envelope and one level of nested objects
/// (e.g. a loan report's `summary`) for a well-known field. A schedule
/// prints its closing row.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(map) => {
            if let Some(val) = headline(map) {
                println!("{}", format_minimal(val));
            } else if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_minimal(val));
            }
        }
        Value::Array(rows) => match rows.last() {
            Some(last) => println!("{}", format_minimal(last)),
            None => println!("(empty)"),
        },
        other => println!("{}", format_minimal(other)),
    }
}

fn headline(map: &Map<String, Value>) -> Option<&Value> {
    let direct = PRIORITY_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|val| !val.is_null());
    if direct.is_some() {
        return direct;
    }
    map.values()
        .filter_map(Value::as_object)
        .find_map(|nested| headline(nested))
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
