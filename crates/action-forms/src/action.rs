//! # Action Callbacks
//!
//! A modal does not know what its form does. The submit action is injected as a
//! [`FormAction`] (receives the form values) and the delete confirmation as a
//! [`ConfirmAction`]. Both answer `Ok(true)` when the operation succeeded and the modal
//! should reset, `Ok(false)` when it did not and the modal should stay as it is.
//!
//! Closures are adapted with [`action_fn`] and [`confirm_fn`]:
//!
//! ```rust,ignore
//! let action = action_fn(move |values: FormValues| {
//!     let charges = charges.clone();
//!     async move {
//!         charges.create_charge(ChargeCreate::from_form(&values)?).await?;
//!         Ok::<bool, ActionError>(true)
//!     }
//! });
//! ```

use crate::error::ActionError;
use crate::value::FormValues;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

#[async_trait]
pub trait FormAction: Send + Sync {
    async fn run(&self, values: FormValues) -> Result<bool, ActionError>;
}

#[async_trait]
pub trait ConfirmAction: Send + Sync {
    async fn run(&self) -> Result<bool, ActionError>;
}

struct FormActionFn<F>(F);

#[async_trait]
impl<F, Fut> FormAction for FormActionFn<F>
where
    F: Fn(FormValues) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool, ActionError>> + Send + 'static,
{
    async fn run(&self, values: FormValues) -> Result<bool, ActionError> {
        (self.0)(values).await
    }
}

struct ConfirmActionFn<F>(F);

#[async_trait]
impl<F, Fut> ConfirmAction for ConfirmActionFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool, ActionError>> + Send + 'static,
{
    async fn run(&self) -> Result<bool, ActionError> {
        (self.0)().await
    }
}

/// Wraps an async closure as a submit action.
pub fn action_fn<F, Fut>(action: F) -> Arc<dyn FormAction>
where
    F: Fn(FormValues) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool, ActionError>> + Send + 'static,
{
    Arc::new(FormActionFn(action))
}

/// Wraps an async closure as a delete confirmation action.
pub fn confirm_fn<F, Fut>(action: F) -> Arc<dyn ConfirmAction>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool, ActionError>> + Send + 'static,
{
    Arc::new(ConfirmActionFn(action))
}
