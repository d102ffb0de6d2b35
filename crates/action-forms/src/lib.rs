//! # Action Forms
//!
//! A declarative engine for the dashboard's "create / edit / delete" modals. A modal is
//! described as data, an ordered list of [`FieldDescriptor`]s plus copy and an injected
//! async action, and the engine takes care of the rest:
//!
//! - seeding values from prefill data, defaults or empty values ([`FormState::initialize`])
//! - per-field updates that clear only that field's error ([`FormState::set_value`])
//! - validation with required, numeric bound, length, pattern and custom rules
//!   ([`validate_field`], [`validate_form`])
//! - submission that never calls the action for an invalid form, resets on success and
//!   keeps the operator's input on failure ([`FormState::submit`])
//! - typed-text confirmation for destructive actions ([`DeleteConfirmation`])
//! - a serializable render model ([`render`])
//!
//! ## Example
//!
//! ```rust,ignore
//! let config = ActionModalConfig::new(
//!     "New charge",
//!     vec![
//!         FieldDescriptor::text("title", "Title").required(),
//!         FieldDescriptor::currency("amount", "Amount")
//!             .required()
//!             .validation(Validation::new().min(0.01)),
//!     ],
//!     "Create",
//!     action_fn(move |values| {
//!         let charges = charges.clone();
//!         async move {
//!             let payload = ChargeCreate::from_form(&values)?;
//!             charges.create_charge(payload).await?;
//!             Ok::<bool, ActionError>(true)
//!         }
//!     }),
//! )?;
//!
//! let mut form = config.open();
//! form.set_value(&config.fields, "title", "Water")?;
//! form.set_value(&config.fields, "amount", "120.50")?;
//! match form.submit(&config).await {
//!     SubmitOutcome::Accepted => { /* close the modal */ }
//!     SubmitOutcome::Invalid => { /* errors are in form.errors */ }
//!     other => tracing::info!(?other, "Charge not created"),
//! }
//! ```
//!
//! ## Errors
//!
//! Configuration mistakes (a select without options, inverted bounds, duplicate names,
//! defaults of the wrong kind, unknown fields) are [`FormConfigError`]s and are reported
//! as soon as they can be detected. Failures from an action never panic and never close
//! the modal; they come back as [`SubmitOutcome::Failed`].

pub mod action;
pub mod delete;
pub mod error;
pub mod field;
pub mod form;
pub mod modal;
pub mod render;
pub mod validate;
pub mod value;

pub use action::{action_fn, confirm_fn, ConfirmAction, FormAction};
pub use delete::{DeleteConfirmation, DeleteModalConfig};
pub use error::{ActionError, FormConfigError};
pub use field::{check_fields, CustomValidator, FieldDescriptor, FieldOption, FieldType, Validation};
pub use form::{FormState, SubmitOutcome};
pub use modal::{ActionModalConfig, ButtonVariant};
pub use render::{render, render_delete, DeleteView, FieldView, InputKind, ModalView};
pub use validate::{validate_field, validate_form, FormValidation};
pub use value::{FieldValue, FormValues};
