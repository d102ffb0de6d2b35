//! # Validation
//!
//! Built-in checks run in a fixed order and stop at the first failure:
//!
//! 1. required: an empty value fails; an empty optional value skips the remaining
//!    built-in checks
//! 2. numeric bounds for number and currency fields (text that does not parse is an
//!    invalid number)
//! 3. length bounds and pattern for text and textarea fields
//!
//! The custom validator runs after them. A message from it replaces the built-in result;
//! no message leaves the built-in result standing.

use crate::field::FieldDescriptor;
use crate::value::{FieldValue, FormValues};
use std::collections::BTreeMap;

/// Result of validating a whole form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValidation {
    pub valid: bool,
    pub errors: BTreeMap<String, String>,
}

pub fn validate_field(field: &FieldDescriptor, value: &FieldValue) -> Option<String> {
    let builtin = builtin_error(field, value);
    match field.validation.as_ref().and_then(|rules| rules.custom.as_ref()) {
        Some(custom) => custom(value).or(builtin),
        None => builtin,
    }
}

fn builtin_error(field: &FieldDescriptor, value: &FieldValue) -> Option<String> {
    let label = &field.label;
    if value.is_empty() {
        return field.required.then(|| format!("{label} is required"));
    }

    let rules = field.validation.as_ref();
    let min = rules.and_then(|rules| rules.min);
    let max = rules.and_then(|rules| rules.max);

    if field.field_type.is_numeric() {
        let Some(number) = value.as_number() else {
            return Some(format!("{label} must be a valid number"));
        };
        if let Some(min) = min.filter(|min| number < *min) {
            return Some(format!("{label} must be at least {min}"));
        }
        if let Some(max) = max.filter(|max| number > *max) {
            return Some(format!("{label} must be at most {max}"));
        }
    }

    if field.field_type.is_textual() {
        let text = value.to_string();
        let length = text.chars().count() as f64;
        if let Some(min) = min.filter(|min| length < *min) {
            return Some(format!("{label} must be at least {min} characters"));
        }
        if let Some(max) = max.filter(|max| length > *max) {
            return Some(format!("{label} must be at most {max} characters"));
        }
        if let Some(pattern) = rules.and_then(|rules| rules.pattern.as_ref()) {
            if !pattern.is_match(&text) {
                return Some(format!("{label} format is invalid"));
            }
        }
    }

    None
}

/// Validates every field; a field missing from `values` is validated as its empty value.
pub fn validate_form(values: &FormValues, fields: &[FieldDescriptor]) -> FormValidation {
    let errors: BTreeMap<String, String> = fields
        .iter()
        .filter_map(|field| {
            let empty = field.empty_value();
            let value = values.get(&field.name).unwrap_or(&empty);
            validate_field(field, value).map(|message| (field.name.clone(), message))
        })
        .collect();
    FormValidation {
        valid: errors.is_empty(),
        errors,
    }
}
