//! # Field Values
//!
//! A form value is one of three kinds: text (everything typed into an input, including
//! numbers not yet parsed), a number, or a boolean for checkboxes. [`FormValues`] maps
//! field names to values and converts to the JSON object handed to HTTP actions.

use crate::field::{FieldDescriptor, FieldType};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    /// Blank text and an unchecked box are empty; a number never is.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Bool(checked) => !checked,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The numeric reading of this value; text is parsed after trimming.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => Some(*number).filter(|n| n.is_finite()),
            FieldValue::Text(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            FieldValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(checked) => Some(*checked),
            _ => None,
        }
    }

    /// Whether this kind of value can be held by a field of `field_type`.
    pub fn fits(&self, field_type: FieldType) -> bool {
        match (self, field_type) {
            (FieldValue::Bool(_), FieldType::Checkbox) => true,
            (FieldValue::Bool(_), _) | (_, FieldType::Checkbox) => false,
            (FieldValue::Number(_), field_type) => field_type.is_numeric(),
            (FieldValue::Text(_), _) => true,
        }
    }

    /// Reads a JSON value (e.g. a field of a record being edited) as a value for a field
    /// of `field_type`. `null` and nested values have no reading.
    pub fn from_json(value: &Value, field_type: FieldType) -> Option<Self> {
        match (value, field_type) {
            (Value::Bool(checked), FieldType::Checkbox) => Some(FieldValue::Bool(*checked)),
            (Value::Number(number), field_type) if field_type.is_numeric() => {
                number.as_f64().map(FieldValue::Number)
            }
            (Value::Number(number), FieldType::Checkbox) => {
                Some(FieldValue::Bool(number.as_f64() != Some(0.0)))
            }
            (Value::Number(number), _) => Some(FieldValue::Text(number.to_string())),
            (Value::String(text), FieldType::Checkbox) => Some(FieldValue::Bool(text == "true")),
            (Value::String(text), _) => Some(FieldValue::Text(text.clone())),
            (Value::Bool(checked), _) => Some(FieldValue::Text(checked.to_string())),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(text) if text.trim().is_empty() => Value::Null,
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::Number(number) => number_to_json(*number),
            FieldValue::Bool(checked) => Value::Bool(*checked),
        }
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn number_to_json(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        Value::Number(Number::from(number as i64))
    } else {
        Number::from_f64(number).map_or(Value::Null, Value::Number)
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Bool(checked) => write!(f, "{checked}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<f64> for FieldValue {
    fn from(number: f64) -> Self {
        FieldValue::Number(number)
    }
}

impl From<i64> for FieldValue {
    fn from(number: i64) -> Self {
        FieldValue::Number(number as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(checked: bool) -> Self {
        FieldValue::Bool(checked)
    }
}

/// Values of a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for prefill data.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Trimmed text of a field; `None` when absent, blank or not text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(FieldValue::as_text)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(FieldValue::as_bool).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Prefill values for `fields` read from a JSON object, e.g. the record being edited.
    /// Keys that are missing, `null` or not fields of the form are skipped.
    pub fn from_record(record: &Value, fields: &[FieldDescriptor]) -> Self {
        let mut values = Self::new();
        for field in fields {
            if let Some(value) = record
                .get(&field.name)
                .and_then(|raw| FieldValue::from_json(raw, field.field_type))
            {
                values.insert(field.name.clone(), value);
            }
        }
        values
    }

    /// Converts number and currency text to numbers. Text that does not parse is left as is.
    pub(crate) fn normalized(&self, fields: &[FieldDescriptor]) -> Self {
        let mut values = self.clone();
        for field in fields.iter().filter(|f| f.field_type.is_numeric()) {
            let Some(slot) = values.0.get_mut(&field.name) else {
                continue;
            };
            if matches!(slot, FieldValue::Text(_)) {
                if let Some(number) = slot.as_number() {
                    *slot = FieldValue::Number(number);
                }
            }
        }
        values
    }

    /// The JSON object for an HTTP body. Blank text becomes `null`.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
