//! Modal configurations for the charges screen.
//!
//! Each builder returns a config whose action calls the [`ChargeClient`]; the client's
//! controller shows the success or error notice, and the modal only learns whether to
//! close.

use crate::charges::ChargeError;
use crate::clients::ChargeClient;
use crate::model::{BulkChargeCreate, Cents, Charge, ChargeCreate, ChargeUpdate};
use action_forms::{
    action_fn, confirm_fn, ActionError, ActionModalConfig, ButtonVariant, DeleteModalConfig,
    FieldDescriptor, FieldOption, FormConfigError, FormValues, Validation,
};
use resource_framework::ResourceClient;

fn required_text<'a>(values: &'a FormValues, name: &str, label: &str) -> Result<&'a str, ChargeError> {
    values
        .text(name)
        .ok_or_else(|| ChargeError::Validation(format!("{label} is required")))
}

fn required_id(values: &FormValues, name: &str, label: &str) -> Result<u64, ChargeError> {
    let text = required_text(values, name, label)?;
    text.parse()
        .map_err(|_| ChargeError::Validation(format!("{label} is not a valid id")))
}

fn required_amount(values: &FormValues, name: &str, label: &str) -> Result<Cents, ChargeError> {
    values
        .number(name)
        .and_then(Cents::from_amount)
        .ok_or_else(|| ChargeError::Validation(format!("{label} must be a valid number")))
}

impl ChargeCreate {
    pub fn from_form(values: &FormValues) -> Result<Self, ChargeError> {
        Ok(Self {
            appartement: required_id(values, "appartement", "Apartment")?,
            description: required_text(values, "description", "Description")?.to_string(),
            amount: required_amount(values, "amount", "Amount")?,
            due_date: required_text(values, "due_date", "Due date")?.to_string(),
        })
    }
}

impl ChargeUpdate {
    /// Only fields with a value are sent. A blank field is left as it is on the server:
    /// the edit form requires every field, so a blank only comes from a form that does not
    /// show it, and a charge has no field that may be emptied.
    pub fn from_form(values: &FormValues) -> Result<Self, ChargeError> {
        let amount = match values.get("amount") {
            Some(value) if !value.is_empty() => Some(required_amount(values, "amount", "Amount")?),
            _ => None,
        };
        Ok(Self {
            description: values.text("description").map(str::to_string),
            amount,
            due_date: values.text("due_date").map(str::to_string),
            status: None,
        })
    }
}

impl BulkChargeCreate {
    pub fn from_form(values: &FormValues) -> Result<Self, ChargeError> {
        Ok(Self {
            building_id: required_id(values, "building_id", "Building")?,
            description: required_text(values, "description", "Description")?.to_string(),
            due_date: required_text(values, "due_date", "Due date")?.to_string(),
        })
    }
}

fn detail_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::textarea("description", "Description")
            .required()
            .placeholder("Monthly charge - December 2024")
            .validation(Validation::new().max(255.0)),
        FieldDescriptor::currency("amount", "Amount")
            .required()
            .validation(Validation::new().min(0.01)),
        FieldDescriptor::date("due_date", "Due date").required(),
    ]
}

/// "New charge" modal. `apartments` are the choices for the apartment select.
pub fn create_charge_modal(
    client: ChargeClient,
    apartments: Vec<FieldOption>,
) -> Result<ActionModalConfig, FormConfigError> {
    let mut fields = vec![FieldDescriptor::select("appartement", "Apartment", apartments).required()];
    fields.extend(detail_fields());

    ActionModalConfig::new(
        "New charge",
        fields,
        "Create charge",
        action_fn(move |values: FormValues| {
            let client = client.clone();
            async move {
                let params = ChargeCreate::from_form(&values)?;
                client.create_charge(params).await?;
                Ok::<bool, ActionError>(true)
            }
        }),
    )
    .map(|config| config.description("Bill an apartment for a one-off or recurring expense."))
}

/// "Edit charge" modal prefilled from `charge`.
pub fn edit_charge_modal(client: ChargeClient, charge: &Charge) -> Result<ActionModalConfig, FormConfigError> {
    let id = charge.id;
    let initial = FormValues::new()
        .with("description", charge.description.as_str())
        .with("amount", charge.amount.as_amount())
        .with("due_date", charge.due_date.as_str());

    let config = ActionModalConfig::new(
        "Edit charge",
        detail_fields(),
        "Save changes",
        action_fn(move |values: FormValues| {
            let client = client.clone();
            async move {
                let patch = ChargeUpdate::from_form(&values)?;
                client.update_charge(id, patch).await?;
                Ok::<bool, ActionError>(true)
            }
        }),
    )?;
    Ok(config.initial_data(initial))
}

/// "Mark as paid" modal. The amount defaults to what is still owed.
pub fn mark_paid_modal(client: ChargeClient, charge: &Charge) -> Result<ActionModalConfig, FormConfigError> {
    let id = charge.id;
    let fields = vec![
        FieldDescriptor::currency("paid_amount", "Paid amount")
            .required()
            .default_value(charge.outstanding().as_amount())
            .validation(Validation::new().min(0.01)),
        FieldDescriptor::date("paid_date", "Payment date"),
    ];

    let config = ActionModalConfig::new(
        "Mark charge as paid",
        fields,
        "Mark as paid",
        action_fn(move |values: FormValues| {
            let client = client.clone();
            async move {
                let amount = required_amount(&values, "paid_amount", "Paid amount")?;
                let date = values.text("paid_date").map(str::to_string);
                client.mark_paid(id, amount, date).await?;
                Ok::<bool, ActionError>(true)
            }
        }),
    )?;
    Ok(config.description(format!(
        "{} - {} due on {}",
        charge.description, charge.amount, charge.due_date
    )))
}

/// "Bulk create" modal: one charge per apartment of the chosen building.
pub fn bulk_charge_modal(
    client: ChargeClient,
    buildings: Vec<FieldOption>,
) -> Result<ActionModalConfig, FormConfigError> {
    let fields = vec![
        FieldDescriptor::select("building_id", "Building", buildings).required(),
        FieldDescriptor::textarea("description", "Description").required(),
        FieldDescriptor::date("due_date", "Due date").required(),
    ];
    ActionModalConfig::new(
        "Create charges for a building",
        fields,
        "Create charges",
        action_fn(move |values: FormValues| {
            let client = client.clone();
            async move {
                client.bulk_create(BulkChargeCreate::from_form(&values)?).await?;
                Ok::<bool, ActionError>(true)
            }
        }),
    )
    .map(|config| config.variant(ButtonVariant::Secondary))
}

/// Delete confirmation for `charge`.
pub fn delete_charge_modal(client: ChargeClient, charge: &Charge) -> DeleteModalConfig {
    let id = charge.id;
    DeleteModalConfig::new(
        "Delete charge",
        "This charge and its payment history will be permanently removed.",
        charge.description.clone(),
        confirm_fn(move || {
            let client = client.clone();
            async move {
                client.remove(id).await?;
                Ok::<bool, ActionError>(true)
            }
        }),
    )
}
