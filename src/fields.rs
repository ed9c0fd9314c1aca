use crate::value::{FieldBag, Value};

/// A shape a field can be read as.
pub trait Shape: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl Shape for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl Shape for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Shape for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_number()
    }
}

impl Shape for Vec<Value> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_list().map(<[Value]>::to_vec)
    }
}

impl Shape for FieldBag {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_map().cloned()
    }
}

/// A string or a number, kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar(pub String);

impl Shape for Scalar {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_scalar_text().map(Scalar)
    }
}

/// Reads `name` as `T`; absent or mistyped fields yield `default`.
pub fn extract<T: Shape>(bag: &FieldBag, name: &str, default: T) -> T {
    bag.get(name).and_then(T::from_value).unwrap_or(default)
}

pub fn text(bag: &FieldBag, name: &str, default: &str) -> String {
    bag.get(name)
        .and_then(String::from_value)
        .unwrap_or_else(|| default.to_string())
}

pub fn scalar(bag: &FieldBag, name: &str, default: &str) -> String {
    bag.get(name)
        .and_then(Scalar::from_value)
        .map(|Scalar(text)| text)
        .unwrap_or_else(|| default.to_string())
}

pub fn flag(bag: &FieldBag, name: &str, default: bool) -> bool {
    extract(bag, name, default)
}

/// Reads a list of strings. Numbers are kept as text; other items are dropped.
pub fn strings_or(bag: &FieldBag, name: &str, defaults: &[&str]) -> Vec<String> {
    let items: Vec<String> = extract(bag, name, Vec::new())
        .iter()
        .filter_map(Value::as_scalar_text)
        .collect();

    if items.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}

/// Reads a list of records.
///
/// Mapping items are taken as-is. A bare string or number becomes a record
/// holding its text under `primary`. Anything else becomes an empty record
/// whose fields all fall back to their defaults when read.
pub fn records_or(
    bag: &FieldBag,
    name: &str,
    primary: &str,
    defaults: &[&[(&str, &str)]],
) -> Vec<FieldBag> {
    let items = extract(bag, name, Vec::new());
    if items.is_empty() {
        return defaults
            .iter()
            .map(|pairs| {
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), Value::from(*v)))
                    .collect()
            })
            .collect();
    }

    items
        .into_iter()
        .map(|item| match item {
            Value::Map(map) => map,
            other => other
                .as_scalar_text()
                .map(|text| FieldBag::from([(primary.to_string(), Value::Text(text))]))
                .unwrap_or_default(),
        })
        .collect()
}
