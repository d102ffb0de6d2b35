//! Charge-specific resource logic: the entity implementation, its error type, the
//! modal configurations of the charges screen and the factory below.

pub mod entity;
pub mod error;
pub mod forms;

pub use error::*;
pub use forms::*;

use crate::clients::ChargeClient;
use crate::model::Charge;
use resource_framework::{CollectionController, ControllerConfig};

/// Creates a new charge controller and its client.
pub fn new(config: ControllerConfig) -> (CollectionController<Charge>, ChargeClient) {
    let (controller, generic_client) = CollectionController::new(config);
    (controller, ChargeClient::new(generic_client))
}
