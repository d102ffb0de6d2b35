//! # Field Descriptors
//!
//! A form is described by an ordered list of [`FieldDescriptor`]s. Each descriptor says
//! what kind of input to show, whether a value is required, presentation hints and the
//! validation rules to apply. Descriptors are built with a small builder API and checked
//! with [`FieldDescriptor::check`] before use.

use crate::error::FormConfigError;
use crate::value::FieldValue;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Email,
    Date,
    Time,
    Select,
    Checkbox,
    Currency,
}

impl FieldType {
    /// Number and currency fields hold numeric values and use numeric bounds.
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldType::Number | FieldType::Currency)
    }

    /// Text and textarea fields use length bounds and patterns.
    pub fn is_textual(self) -> bool {
        matches!(self, FieldType::Text | FieldType::Textarea)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Currency => "currency",
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Returns a message when the value is invalid.
pub type CustomValidator = Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

/// Validation rules for a field.
///
/// `min`/`max` bound the numeric value of number and currency fields and the length (in
/// characters) of text and textarea fields. `pattern` applies to text and textarea only.
/// The custom validator runs last and has the final word when it reports a message.
#[derive(Clone, Default)]
pub struct Validation {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<Regex>,
    pub custom: Option<CustomValidator>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn custom<F>(mut self, validator: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(validator));
        self
    }
}

impl Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validation")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub placeholder: Option<String>,
    pub default_value: Option<FieldValue>,
    pub options: Vec<FieldOption>,
    pub validation: Option<Validation>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            required: false,
            placeholder: None,
            default_value: None,
            options: Vec::new(),
            validation: None,
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Text)
    }

    pub fn textarea(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Textarea)
    }

    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Number)
    }

    pub fn currency(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Currency)
    }

    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Date)
    }

    pub fn checkbox(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Checkbox)
    }

    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<FieldOption>,
    ) -> Self {
        Self::new(name, label, FieldType::Select).options(options)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// The value of an untouched field: unchecked for checkboxes, blank otherwise.
    pub fn empty_value(&self) -> FieldValue {
        match self.field_type {
            FieldType::Checkbox => FieldValue::Bool(false),
            _ => FieldValue::Text(String::new()),
        }
    }

    /// The value a freshly opened form starts with.
    pub fn seed_value(&self) -> FieldValue {
        self.default_value
            .clone()
            .unwrap_or_else(|| self.empty_value())
    }

    /// Checks the descriptor for configuration mistakes.
    pub fn check(&self) -> Result<(), FormConfigError> {
        if self.field_type == FieldType::Select && self.options.is_empty() {
            return Err(FormConfigError::EmptyOptions(self.name.clone()));
        }
        if let Some(Validation {
            min: Some(min),
            max: Some(max),
            ..
        }) = &self.validation
        {
            if min > max {
                return Err(FormConfigError::InvertedBounds {
                    field: self.name.clone(),
                    min: *min,
                    max: *max,
                });
            }
        }
        if let Some(default) = &self.default_value {
            if !default.fits(self.field_type) {
                return Err(FormConfigError::DefaultMismatch {
                    field: self.name.clone(),
                    field_type: self.field_type,
                });
            }
        }
        Ok(())
    }
}

/// Checks every descriptor and that field names are unique.
pub fn check_fields(fields: &[FieldDescriptor]) -> Result<(), FormConfigError> {
    let mut seen = HashSet::new();
    for field in fields {
        field.check()?;
        if !seen.insert(field.name.as_str()) {
            return Err(FormConfigError::DuplicateField(field.name.clone()));
        }
    }
    Ok(())
}
