//! Property-path access over serialised records.
//!
//! Grids, detail panels, and in-memory stores address record fields by the
//! camelCase property path of the record's JSON form, for example
//! `customerCode` or `address.city`.

use std::cmp::Ordering;

use pagination::Sort;
use serde::Serialize;
use serde_json::Value;

/// Resolve a dotted property path against a JSON value.
///
/// Numeric segments index into arrays.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use wealthdesk::domain::resolve_path;
///
/// let value = json!({"address": {"city": "Pune"}, "tags": ["a", "b"]});
/// assert_eq!(resolve_path(&value, "address.city"), Some(&json!("Pune")));
/// assert_eq!(resolve_path(&value, "tags.1"), Some(&json!("b")));
/// assert_eq!(resolve_path(&value, "missing"), None);
/// ```
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Coerce a resolved value to display text.
///
/// Strings pass through verbatim, numbers and booleans use their display
/// form, and null or missing values become the empty string.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => other.to_string(),
    }
}

/// String-coerced identifier at `id_field`, if the record has one.
pub fn record_id(value: &Value, id_field: &str) -> Option<String> {
    match resolve_path(value, id_field) {
        None | Some(Value::Null) => None,
        found => Some(value_text(found)),
    }
}

const fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

/// Total order over resolved values used for server-side sorting.
///
/// Missing and null values sort first. Strings compare case-insensitively,
/// falling back to a case-sensitive comparison to keep the order total.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_u64(), y.as_u64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x
            .to_lowercase()
            .cmp(&y.to_lowercase())
            .then_with(|| x.cmp(y)),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(a)
            .cmp(&type_rank(b))
            .then_with(|| value_text(a).cmp(&value_text(b))),
    }
}

/// Stable-sort `records` by the property path and direction in `sort`.
///
/// # Errors
/// Returns the serialisation error if a record cannot be converted to JSON.
pub fn sort_records<T: Serialize>(records: Vec<T>, sort: &Sort) -> Result<Vec<T>, serde_json::Error> {
    let mut keyed = records
        .into_iter()
        .map(|record| serde_json::to_value(&record).map(|value| (value, record)))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by(|(a, _), (b, _)| {
        sort.direction().apply(compare_values(
            resolve_path(a, sort.field()),
            resolve_path(b, sort.field()),
        ))
    });
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}
