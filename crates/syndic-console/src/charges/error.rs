//! Error types for charge operations.

use action_forms::ActionError;
use resource_framework::ControllerError;
use thiserror::Error;

/// Errors that can occur during charge operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChargeError {
    /// The server or the network refused the operation; the text is what the notice shows.
    #[error("{0}")]
    Request(String),

    /// A form value could not be turned into a charge payload.
    #[error("Invalid charge: {0}")]
    Validation(String),

    /// Another operation on the same charge is still running.
    #[error("Charge {0} is busy")]
    Busy(String),

    /// An error occurred while communicating with the charge controller.
    #[error("Controller communication error: {0}")]
    ControllerCommunicationError(String),
}

impl From<String> for ChargeError {
    fn from(msg: String) -> Self {
        ChargeError::ControllerCommunicationError(msg)
    }
}

impl From<ControllerError> for ChargeError {
    fn from(e: ControllerError) -> Self {
        match e {
            ControllerError::Failed { message } => ChargeError::Request(message),
            ControllerError::Busy(id) => ChargeError::Busy(id),
            other => ChargeError::ControllerCommunicationError(other.to_string()),
        }
    }
}

impl From<ChargeError> for ActionError {
    fn from(e: ChargeError) -> Self {
        ActionError::new(e.to_string())
    }
}
