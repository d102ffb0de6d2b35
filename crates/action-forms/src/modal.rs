//! # Action Modal Configuration
//!
//! Everything a generic "create / edit" modal needs: title and copy, the ordered field
//! list, the submit button, the injected action and optional prefill data. A config is
//! checked when it is built, so a broken field list never reaches the screen.

use crate::action::FormAction;
use crate::error::FormConfigError;
use crate::field::{check_fields, FieldDescriptor};
use crate::form::FormState;
use crate::value::FormValues;
use serde::Serialize;
use std::fmt::{self, Debug};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Default,
    Destructive,
    Outline,
    Secondary,
}

#[derive(Clone)]
pub struct ActionModalConfig {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDescriptor>,
    pub submit_button_text: String,
    pub submit_button_variant: ButtonVariant,
    pub action: Arc<dyn FormAction>,
    pub initial_data: Option<FormValues>,
}

impl ActionModalConfig {
    pub fn new(
        title: impl Into<String>,
        fields: Vec<FieldDescriptor>,
        submit_button_text: impl Into<String>,
        action: Arc<dyn FormAction>,
    ) -> Result<Self, FormConfigError> {
        check_fields(&fields)?;
        Ok(Self {
            title: title.into(),
            description: None,
            fields,
            submit_button_text: submit_button_text.into(),
            submit_button_variant: ButtonVariant::Default,
            action,
            initial_data: None,
        })
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.submit_button_variant = variant;
        self
    }

    /// Prefill values for an "edit" variant of the modal.
    pub fn initial_data(mut self, values: FormValues) -> Self {
        self.initial_data = Some(values);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fresh form state for opening the modal. Reopening replaces any previous state.
    pub fn open(&self) -> FormState {
        FormState::initialize(&self.fields, self.initial_data.as_ref())
    }
}

impl Debug for ActionModalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionModalConfig")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("fields", &self.fields)
            .field("submit_button_text", &self.submit_button_text)
            .field("submit_button_variant", &self.submit_button_variant)
            .field("initial_data", &self.initial_data)
            .finish_non_exhaustive()
    }
}
