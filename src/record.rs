//! The record being rendered: one point of interest's property values.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{PopupError, PopupResult};
use crate::schema::PropDef;

/// A raw property value as it arrives from the data source.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    List(Vec<String>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

/// A property value viewed through its schema definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropValue<'a> {
    Absent,
    Scalar(&'a Value),
    VocabSingle(&'a str),
    VocabMulti(&'a [String]),
}

/// Property values of one record, keyed by property name. Absent properties
/// are simply not present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The value as a string slice, if it is text.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(Value::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// View a property through its schema definition.
    ///
    /// This is where unexpected value shapes are caught: a vocabulary property
    /// must hold a code (or, for multi-valued properties, a list of codes).
    pub fn typed<'a>(&'a self, name: &str, def: Option<&PropDef>) -> PopupResult<PropValue<'a>> {
        let Some(value) = self.values.get(name) else {
            return Ok(PropValue::Absent);
        };

        let Some(def) = def.filter(|d| d.is_vocab()) else {
            return Ok(PropValue::Scalar(value));
        };

        match value {
            Value::List(codes) if def.is_multi() => Ok(PropValue::VocabMulti(codes)),
            Value::Text(code) => Ok(PropValue::VocabSingle(code)),
            other => Err(PopupError::InvalidPropertyValue {
                property: name.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Parse a record from a YAML mapping of property names to scalars or
    /// lists of scalars. `null` values are dropped.
    pub fn from_yaml_str(yaml: &str) -> PopupResult<Self> {
        let raw: BTreeMap<String, Option<RawValue>> = serde_yaml::from_str(yaml)?;
        let values = raw
            .into_iter()
            .filter_map(|(name, raw)| raw.map(|raw| (name, raw.into_value())))
            .collect();
        Ok(Record { values })
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Record {
            values: iter.into_iter().collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawScalar {
    fn into_string(self) -> String {
        match self {
            RawScalar::Bool(b) => b.to_string(),
            RawScalar::Number(n) => n.to_string(),
            RawScalar::Text(s) => s,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Scalar(RawScalar),
    List(Vec<RawScalar>),
}

impl RawValue {
    fn into_value(self) -> Value {
        match self {
            RawValue::Scalar(RawScalar::Bool(b)) => Value::Bool(b),
            RawValue::Scalar(RawScalar::Number(n)) => Value::Number(n),
            RawValue::Scalar(RawScalar::Text(s)) => Value::Text(s),
            RawValue::List(items) => {
                Value::List(items.into_iter().map(RawScalar::into_string).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropDef;

    #[test]
    fn test_display() {
        assert_eq!(Value::from("x").to_string(), "x");
        assert_eq!(Value::Number(53.5).to_string(), "53.5");
        assert_eq!(Value::Number(7.0).to_string(), "7");
        assert_eq!(
            Value::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()).to_string(),
            "2024-03-09"
        );
        assert_eq!(
            Value::List(vec!["a".to_string(), "b".to_string()]).to_string(),
            "a,b"
        );
    }

    #[test]
    fn test_typed_absent() {
        let r = Record::new();
        assert_eq!(r.typed("x", Some(&PropDef::vocab("ind:"))), Ok(PropValue::Absent));
    }

    #[test]
    fn test_typed_scalar_for_plain_value() {
        let r = Record::new().with("regNo", 1234.0);
        assert_eq!(
            r.typed("regNo", Some(&PropDef::Value)),
            Ok(PropValue::Scalar(&Value::Number(1234.0)))
        );
        // No schema entry behaves as a plain value
        assert!(matches!(r.typed("regNo", None), Ok(PropValue::Scalar(_))));
    }

    #[test]
    fn test_typed_vocab_shapes() {
        let r = Record::new()
            .with("industry", "ind:A")
            .with("activities", vec!["aci:1".to_string(), "aci:2".to_string()]);
        assert_eq!(
            r.typed("industry", Some(&PropDef::vocab("ind:"))),
            Ok(PropValue::VocabSingle("ind:A"))
        );
        assert!(matches!(
            r.typed("activities", Some(&PropDef::multi("aci:"))),
            Ok(PropValue::VocabMulti(codes)) if codes.len() == 2
        ));
        // A multi-vocab property may hold a single code
        assert_eq!(
            r.typed("industry", Some(&PropDef::multi("ind:"))),
            Ok(PropValue::VocabSingle("ind:A"))
        );
    }

    #[test]
    fn test_typed_rejects_bad_vocab_value() {
        let r = Record::new()
            .with("industry", 3.0)
            .with("codes", vec!["ind:A".to_string()]);
        assert!(matches!(
            r.typed("industry", Some(&PropDef::vocab("ind:"))),
            Err(PopupError::InvalidPropertyValue { .. })
        ));
        // A list on a single-valued vocab property is not interpretable
        assert!(matches!(
            r.typed("codes", Some(&PropDef::vocab("ind:"))),
            Err(PopupError::InvalidPropertyValue { .. })
        ));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "name: Acme Co-op\nlat: 53.6\nactive: true\nregNo: ~\nactivities: [aci:1, aci:2]\n";
        let r = Record::from_yaml_str(yaml).unwrap();
        assert_eq!(r.text("name"), Some("Acme Co-op"));
        assert_eq!(r.get("lat"), Some(&Value::Number(53.6)));
        assert_eq!(r.get("active"), Some(&Value::Bool(true)));
        assert_eq!(r.get("regNo"), None);
        assert_eq!(
            r.get("activities"),
            Some(&Value::List(vec!["aci:1".to_string(), "aci:2".to_string()]))
        );
    }

    #[test]
    fn test_from_yaml_rejects_nested_maps() {
        assert!(matches!(
            Record::from_yaml_str("address:\n  street: x\n"),
            Err(PopupError::Yaml(_))
        ));
    }
}
