//! # Form State
//!
//! The per-modal state: current values, field errors and the submitting flag. It is
//! created when a modal opens, updated on every input, reset after a successful submit
//! and never persisted.
//!
//! Submission is split into [`FormState::begin_submit`] and [`FormState::finish_submit`]
//! so an event loop can run the action elsewhere; [`FormState::submit`] does both.

use crate::error::{ActionError, FormConfigError};
use crate::field::FieldDescriptor;
use crate::modal::ActionModalConfig;
use crate::validate::{validate_form, FormValidation};
use crate::value::{FieldValue, FormValues};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// What happened to a submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; the action was not called.
    Invalid,
    /// The action reported success and the form was reset.
    Accepted,
    /// The action reported failure; values are kept.
    Rejected,
    /// The action returned an error; values are kept.
    Failed(ActionError),
    /// A submit is already running.
    Busy,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub values: FormValues,
    pub errors: BTreeMap<String, String>,
    pub submitting: bool,
}

impl FormState {
    /// Seeds every field from `initial_data`, then its default, then its empty value.
    pub fn initialize(fields: &[FieldDescriptor], initial_data: Option<&FormValues>) -> Self {
        let values = fields
            .iter()
            .map(|field| {
                let value = initial_data
                    .and_then(|data| data.get(&field.name))
                    .cloned()
                    .unwrap_or_else(|| field.seed_value());
                (field.name.clone(), value)
            })
            .collect();
        Self {
            values,
            errors: BTreeMap::new(),
            submitting: false,
        }
    }

    /// Sets one field and clears that field's error only.
    pub fn set_value(
        &mut self,
        fields: &[FieldDescriptor],
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormConfigError> {
        let field = fields
            .iter()
            .find(|field| field.name == name)
            .ok_or_else(|| FormConfigError::UnknownField(name.to_string()))?;
        let value = value.into();
        if !value.fits(field.field_type) {
            return Err(FormConfigError::ValueMismatch {
                field: name.to_string(),
                field_type: field.field_type,
            });
        }
        self.values.insert(name, value);
        self.errors.remove(name);
        Ok(())
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Validates the current values and stores the errors.
    pub fn validate(&mut self, fields: &[FieldDescriptor]) -> FormValidation {
        let report = validate_form(&self.values, fields);
        self.errors = report.errors.clone();
        report
    }

    /// Validates and, when valid, marks the form as submitting and returns the payload for
    /// the action. Number and currency text is converted to numbers in the payload.
    pub fn begin_submit(
        &mut self,
        fields: &[FieldDescriptor],
    ) -> Result<FormValues, SubmitOutcome> {
        if self.submitting {
            debug!("Submit refused, already submitting");
            return Err(SubmitOutcome::Busy);
        }
        let report = self.validate(fields);
        if !report.valid {
            debug!(errors = report.errors.len(), "Submit blocked by validation");
            return Err(SubmitOutcome::Invalid);
        }
        self.submitting = true;
        Ok(self.values.normalized(fields))
    }

    /// Applies the action's result. Success resets the form to a fresh create form.
    pub fn finish_submit(
        &mut self,
        fields: &[FieldDescriptor],
        result: Result<bool, ActionError>,
    ) -> SubmitOutcome {
        match result {
            Ok(true) => {
                *self = Self::initialize(fields, None);
                SubmitOutcome::Accepted
            }
            Ok(false) => {
                self.submitting = false;
                SubmitOutcome::Rejected
            }
            Err(e) => {
                warn!(error = %e, "Form action failed");
                self.submitting = false;
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Validates, runs the config's action and applies its result.
    pub async fn submit(&mut self, config: &ActionModalConfig) -> SubmitOutcome {
        match self.begin_submit(&config.fields) {
            Err(outcome) => outcome,
            Ok(payload) => {
                let result = config.action.run(payload).await;
                self.finish_submit(&config.fields, result)
            }
        }
    }
}
