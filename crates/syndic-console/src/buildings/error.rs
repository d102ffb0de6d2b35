//! Error types for building operations.

use action_forms::ActionError;
use resource_framework::ControllerError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildingError {
    #[error("{0}")]
    Request(String),

    #[error("Invalid building: {0}")]
    Validation(String),

    #[error("Building {0} is busy")]
    Busy(String),

    #[error("Controller communication error: {0}")]
    ControllerCommunicationError(String),
}

impl From<String> for BuildingError {
    fn from(msg: String) -> Self {
        BuildingError::ControllerCommunicationError(msg)
    }
}

impl From<ControllerError> for BuildingError {
    fn from(e: ControllerError) -> Self {
        match e {
            ControllerError::Failed { message } => BuildingError::Request(message),
            ControllerError::Busy(id) => BuildingError::Busy(id),
            other => BuildingError::ControllerCommunicationError(other.to_string()),
        }
    }
}

impl From<BuildingError> for ActionError {
    fn from(e: BuildingError) -> Self {
        ActionError::new(e.to_string())
    }
}
