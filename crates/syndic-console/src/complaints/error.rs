//! Error types for complaint operations.

use action_forms::ActionError;
use resource_framework::ControllerError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ComplaintError {
    #[error("{0}")]
    Request(String),

    #[error("Complaint {0} is busy")]
    Busy(String),

    /// A rejection needs a written response.
    #[error("A response is required to reject a complaint")]
    MissingResponse,

    #[error("Controller communication error: {0}")]
    ControllerCommunicationError(String),
}

impl From<String> for ComplaintError {
    fn from(msg: String) -> Self {
        ComplaintError::ControllerCommunicationError(msg)
    }
}

impl From<ControllerError> for ComplaintError {
    fn from(e: ControllerError) -> Self {
        match e {
            ControllerError::Failed { message } => ComplaintError::Request(message),
            ControllerError::Busy(id) => ComplaintError::Busy(id),
            other => ComplaintError::ControllerCommunicationError(other.to_string()),
        }
    }
}

impl From<ComplaintError> for ActionError {
    fn from(e: ComplaintError) -> Self {
        ActionError::new(e.to_string())
    }
}
