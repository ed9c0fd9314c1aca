use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Loosely-typed per-block data mapping.
pub type FieldBag = BTreeMap<String, Value>;

/// A single value inside a block's field bag.
///
/// Deserializing a `Value` never fails on shape: anything a JSON, YAML or TOML
/// document can hold maps onto one of these variants.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Map(FieldBag),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&FieldBag> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Strings pass through, numbers are printed without a trailing `.0`.
    pub fn as_scalar_text(&self) -> Option<String> {
        match self {
            Value::Text(text) => Some(text.clone()),
            Value::Number(number) => Some(format_number(*number)),
            _ => None,
        }
    }
}

pub fn format_number(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        format!("{}", number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<FieldBag> for Value {
    fn from(map: FieldBag) -> Self {
        Value::Map(map)
    }
}

/// Builds a field bag from `(key, value)` pairs.
pub fn bag<K, V, I>(pairs: I) -> FieldBag
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut out = FieldBag::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            out.insert(key, value);
        }
        Ok(Value::Map(out))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{Value, format_number};

    #[test]
    fn json_maps_onto_every_variant() {
        let value: Value =
            serde_json::from_str(r#"{"a": "x", "b": true, "c": 3, "d": [1, "y"], "e": null}"#)
                .expect("valid json");
        let map = value.as_map().expect("top-level map");

        assert_eq!(map["a"], Value::Text("x".into()));
        assert_eq!(map["b"], Value::Bool(true));
        assert_eq!(map["c"], Value::Number(3.0));
        assert_eq!(
            map["d"],
            Value::List(vec![Value::Number(1.0), Value::Text("y".into())])
        );
        assert_eq!(map["e"], Value::Null);
    }

    #[test]
    fn yaml_and_toml_deserialize_into_values() {
        let yaml: Value = serde_yaml::from_str("title: Hi\nitems:\n  - one\n  - two\n")
            .expect("valid yaml");
        assert_eq!(
            yaml.as_map().and_then(|m| m["items"].as_list()).map(<[_]>::len),
            Some(2)
        );

        let toml: Value = toml::from_str("title = \"Hi\"\ncount = 4\n").expect("valid toml");
        assert_eq!(
            toml.as_map().and_then(|m| m["count"].as_number()),
            Some(4.0)
        );
    }

    #[test]
    fn integral_numbers_print_without_fraction() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(Value::Number(7.0).as_scalar_text().as_deref(), Some("7"));
        assert_eq!(Value::Bool(true).as_scalar_text(), None);
    }
}
