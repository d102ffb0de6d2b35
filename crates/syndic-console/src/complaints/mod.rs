//! Complaint-specific resource logic and entity implementation.

pub mod entity;
pub mod error;
pub mod forms;

pub use error::*;
pub use forms::*;

use crate::clients::ComplaintClient;
use crate::model::Complaint;
use resource_framework::{CollectionController, ControllerConfig};

/// Creates a new complaint controller and its client.
pub fn new(config: ControllerConfig) -> (CollectionController<Complaint>, ComplaintClient) {
    let (controller, generic_client) = CollectionController::new(config);
    (controller, ComplaintClient::new(generic_client))
}
