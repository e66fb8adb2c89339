//! Structured literal values.
//!
//! Frame `description` and `transform` fields hold JSON literals. They are
//! decoded with serde_json and converted into [`Literal`], so callers never
//! depend on the decoder's own value type.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A generic tagged value: null, bool, number, string, array or object.
///
/// Object entries keep the order in which they were written.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Literal {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Literal>),
    Object(Vec<(String, Literal)>),
}

impl Literal {
    /// Decode a JSON literal. Surrounding whitespace is allowed.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from(value))
    }

    /// Render as compact JSON.
    pub fn to_json(&self) -> String {
        Value::from(self).to_string()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Literal]> {
        match self {
            Literal::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Literal)]> {
        match self {
            Literal::Object(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    /// Look up an object entry by key. Returns `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&Literal> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl From<Value> for Literal {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Literal::Null,
            Value::Bool(b) => Literal::Bool(b),
            // Every serde_json number has an f64 view
            Value::Number(n) => Literal::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Literal::String(s),
            Value::Array(items) => Literal::Array(items.into_iter().map(Literal::from).collect()),
            Value::Object(map) => Literal::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Literal::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => {
                if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
                    Value::from(*n as i64)
                } else {
                    // Non-finite numbers have no JSON form
                    serde_json::Number::from_f64(*n)
                        .map(Value::Number)
                        .unwrap_or(Value::Null)
                }
            }
            Literal::String(s) => Value::String(s.clone()),
            Literal::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            Literal::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Literal::from)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(Literal::parse(" null ").unwrap(), Literal::Null);
        assert_eq!(Literal::parse("true").unwrap(), Literal::Bool(true));
        assert_eq!(Literal::parse("-2.5").unwrap(), Literal::Number(-2.5));
        assert_eq!(Literal::parse(" \"origin\"").unwrap(), Literal::from("origin"));
    }

    #[test]
    fn test_parse_nested_keeps_key_order() {
        let literal = Literal::parse(r#"{"z": 1, "a": [1, {"b": null}], "m": "x"}"#).unwrap();

        let keys: Vec<&str> = literal
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);

        let inner = &literal.get("a").unwrap().as_array().unwrap()[1];
        assert!(inner.get("b").unwrap().is_null());
        assert_eq!(literal.get("m").and_then(Literal::as_str), Some("x"));
        assert!(literal.get("missing").is_none());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Literal::parse("").is_err());
        assert!(Literal::parse("[1, 2").is_err());
        assert!(Literal::parse("origin").is_err());
    }

    #[test]
    fn test_to_json_integers_stay_integers() {
        let literal = Literal::parse("[1, 0.5, -3]").unwrap();
        assert_eq!(literal.to_json(), "[1,0.5,-3]");
    }

    #[test]
    fn test_to_json_reparses_equal() {
        let literal = Literal::parse(r#"{"k": [[1, 2], [3, 4]], "s": "a:b", "t": false}"#).unwrap();
        assert_eq!(Literal::parse(&literal.to_json()).unwrap(), literal);
    }
}
