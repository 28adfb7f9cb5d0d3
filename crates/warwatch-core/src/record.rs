//! Open-ended feed records.
//!
//! A [`Record`] is an ordered mapping from field name to [`FieldValue`]. Every
//! feed shape (war effect, feature config, online override) is carried as a
//! `Record` so the diff engine stays generic and fields unknown to this crate
//! survive a poll untouched.
//!
//! ## Canonical form
//!
//! Two values are considered equal by the diff engine exactly when their
//! canonical JSON strings are equal. The canonical form sorts object keys at
//! every nesting level and keeps array order as-is. Integral floats print as
//! integers, so `1.0` and `1` compare equal.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::errors::WatchError;

/// A single field value inside a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integers that do not fit in `i64`
    UInt(u64),
    Float(f64),
    Text(String),
    Array(Vec<FieldValue>),
    Object(Record),
}

impl FieldValue {
    /// Convert back into a `serde_json::Value`, preserving field order.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::UInt(u) => Value::Number((*u).into()),
            FieldValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Array(items) => Value::Array(items.iter().map(FieldValue::to_json).collect()),
            FieldValue::Object(record) => record.to_json(),
        }
    }

    /// JSON value with object keys sorted at every level.
    fn canonical_json(&self) -> Value {
        match self {
            FieldValue::Array(items) => {
                Value::Array(items.iter().map(FieldValue::canonical_json).collect())
            }
            FieldValue::Object(record) => {
                let mut entries: Vec<(&str, Value)> = record
                    .iter()
                    .map(|(k, v)| (k, v.canonical_json()))
                    .collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                let mut map = Map::new();
                for (k, v) in entries {
                    map.insert(k.to_string(), v);
                }
                Value::Object(map)
            }
            FieldValue::Float(f) => match integral(*f) {
                Some(i) => Value::Number(i.into()),
                None => self.to_json(),
            },
            other => other.to_json(),
        }
    }

    /// Canonical serialized form used for equality and key lookups.
    pub fn canonical(&self) -> String {
        // Serializing a Value cannot fail: every map key is a string
        serde_json::to_string(&self.canonical_json()).unwrap_or_default()
    }

    /// True when both values have the same canonical form.
    pub fn same_as(&self, other: &FieldValue) -> bool {
        self.canonical() == other.canonical()
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

/// `f` as an `i64` when it has no fractional part and fits.
fn integral(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then(|| f as i64)
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::Text(s),
            Value::Array(items) => FieldValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => FieldValue::Object(Record::from_map(map)),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<i64>> for FieldValue {
    fn from(values: Vec<i64>) -> Self {
        FieldValue::Array(values.into_iter().map(FieldValue::Int).collect())
    }
}

impl std::fmt::Display for FieldValue {
    /// Strings print bare, everything else prints as canonical JSON.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            other => write!(f, "{}", other.canonical()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::UInt(u) => serializer.serialize_u64(*u),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Array(items) => items.serialize(serializer),
            FieldValue::Object(record) => record.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FieldValue::from)
    }
}

/// An ordered, open-ended mapping from field name to value.
///
/// Field order is arrival order from the source. Inserting an existing
/// field name replaces its value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn from_map(map: Map<String, Value>) -> Self {
        Self {
            fields: map.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }

    /// Build a record from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `WatchError::Serialization` if `value` is not an object.
    pub fn from_json(value: Value) -> Result<Self, WatchError> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(WatchError::Serialization {
                message: format!("expected a JSON object, got: {}", other),
            }),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (k, v) in &self.fields {
            map.insert(k.clone(), v.to_json());
        }
        Value::Object(map)
    }

    /// Canonical serialized form of the whole record.
    pub fn canonical(&self) -> String {
        FieldValue::Object(self.clone()).canonical()
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Record::from_json(value).map_err(D::Error::custom)
    }
}
