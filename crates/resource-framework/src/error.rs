//! # Framework Errors
//!
//! This module defines the common error types used throughout the resource framework.
//! By centralizing error definitions, every controller surfaces failures the same way:
//! transport problems and domain rejections become [`ApiError`], and everything a caller
//! of [`CollectionClient`](crate::CollectionClient) can observe is a [`ControllerError`].

use serde_json::Value;

/// Errors produced while talking to the backend API.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (connection refused, timeout, ...).
    #[error("Network error: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: Option<Value> },
    /// The server answered 2xx but reported `success: false`.
    #[error("Request rejected by server")]
    Rejected { body: Value },
    /// The response body could not be interpreted.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The JSON body attached to the failure, if the server sent one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Status { body, .. } => body.as_ref(),
            ApiError::Rejected { body } => Some(body),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// Picks the most specific human-readable message for this failure.
    ///
    /// Precedence: body `message`, then body `error`, then the transport error text,
    /// then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(body) = self.body() {
            for key in ["message", "error"] {
                if let Some(text) = body.get(key).and_then(Value::as_str) {
                    if !text.trim().is_empty() {
                        return text.to_string();
                    }
                }
            }
        }
        match self {
            ApiError::Transport(message) if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Errors returned to callers of a collection controller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControllerError {
    #[error("Controller closed")]
    ControllerClosed,
    #[error("Controller dropped response channel")]
    ControllerDropped,
    /// The operation reached the server and failed; `message` is what the notice shows.
    #[error("{message}")]
    Failed { message: String },
    /// Another mutation on the same record has not finished yet.
    #[error("Operation already pending for {0}")]
    Busy(String),
    /// The resource does not support the requested operation.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
    /// The request payload could not be serialized.
    #[error("Could not encode request: {0}")]
    Encode(String),
}
