//! # Render Model
//!
//! A serializable description of what a modal shows, independent of any UI toolkit.

use crate::delete::DeleteConfirmation;
use crate::field::{FieldDescriptor, FieldOption, FieldType};
use crate::form::FormState;
use crate::modal::{ActionModalConfig, ButtonVariant};
use crate::value::FieldValue;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputKind {
    TextInput,
    Textarea,
    NumberInput,
    EmailInput,
    DatePicker,
    TimeInput,
    Select { options: Vec<FieldOption> },
    Checkbox,
    CurrencyInput,
}

impl InputKind {
    fn for_field(field: &FieldDescriptor) -> Self {
        match field.field_type {
            FieldType::Text => InputKind::TextInput,
            FieldType::Textarea => InputKind::Textarea,
            FieldType::Number => InputKind::NumberInput,
            FieldType::Email => InputKind::EmailInput,
            FieldType::Date => InputKind::DatePicker,
            FieldType::Time => InputKind::TimeInput,
            FieldType::Select => InputKind::Select {
                options: field.options.clone(),
            },
            FieldType::Checkbox => InputKind::Checkbox,
            FieldType::Currency => InputKind::CurrencyInput,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub input: InputKind,
    pub value: FieldValue,
    pub error: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalView {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FieldView>,
    pub submit_button_text: String,
    pub submit_button_variant: ButtonVariant,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteView {
    pub title: String,
    pub description: String,
    pub item_name: String,
    pub confirm_text: Option<String>,
    pub typed: String,
    pub can_confirm: bool,
    pub confirm_label: &'static str,
}

pub fn render(state: &FormState, config: &ActionModalConfig) -> ModalView {
    let fields = config
        .fields
        .iter()
        .map(|field| FieldView {
            name: field.name.clone(),
            label: field.label.clone(),
            input: InputKind::for_field(field),
            value: state
                .values
                .get(&field.name)
                .cloned()
                .unwrap_or_else(|| field.empty_value()),
            error: state.errors.get(&field.name).cloned(),
            placeholder: field.placeholder.clone(),
            required: field.required,
        })
        .collect();

    ModalView {
        title: config.title.clone(),
        description: config.description.clone(),
        fields,
        submit_button_text: config.submit_button_text.clone(),
        submit_button_variant: config.submit_button_variant,
        submitting: state.submitting,
    }
}

pub fn render_delete(modal: &DeleteConfirmation) -> DeleteView {
    let config = &modal.config;
    DeleteView {
        title: config.title.clone(),
        description: config.description.clone(),
        item_name: config.item_name.clone(),
        confirm_text: config.confirm_text.clone(),
        typed: modal.typed().to_string(),
        can_confirm: modal.can_confirm() && !modal.is_running(),
        confirm_label: if modal.is_running() {
            "Confirming..."
        } else {
            "Confirm"
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{action_fn, confirm_fn};
    use crate::delete::DeleteModalConfig;
    use crate::error::ActionError;
    use serde_json::json;

    #[test]
    fn renders_fields_in_order_with_errors() {
        let config = ActionModalConfig::new(
            "New charge",
            vec![
                FieldDescriptor::text("title", "Title")
                    .required()
                    .placeholder("e.g. Water"),
                FieldDescriptor::select(
                    "status",
                    "Status",
                    vec![FieldOption::new("UNPAID", "Unpaid")],
                ),
                FieldDescriptor::date("due_date", "Due date"),
            ],
            "Create",
            action_fn(|_| async { Ok::<bool, ActionError>(true) }),
        )
        .unwrap()
        .description("Add a charge for a building");

        let mut state = config.open();
        state.validate(&config.fields);
        let view = render(&state, &config);

        assert_eq!(view.fields.len(), 3);
        assert_eq!(view.fields[0].error.as_deref(), Some("Title is required"));
        assert_eq!(view.fields[2].input, InputKind::DatePicker);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["fields"][1]["input"]["kind"], "select");
        assert_eq!(json["fields"][1]["input"]["options"][0], json!({ "value": "UNPAID", "label": "Unpaid" }));
        assert_eq!(json["submit_button_variant"], "default");
    }

    #[test]
    fn delete_view_tracks_typed_text() {
        let config = DeleteModalConfig::new(
            "Delete building",
            "All related charges will be removed.",
            "Residence Atlas",
            confirm_fn(|| async { Ok::<bool, ActionError>(true) }),
        )
        .confirm_text("Residence Atlas");
        let mut modal = DeleteConfirmation::new(config);

        assert!(!render_delete(&modal).can_confirm);
        modal.type_text("Residence Atlas");
        let view = render_delete(&modal);
        assert!(view.can_confirm);
        assert_eq!(view.confirm_label, "Confirm");
    }
}
