//! Type-safe wrappers around the generic collection clients, one per resource.

pub mod building_client;
pub mod charge_client;
pub mod complaint_client;

pub use building_client::BuildingClient;
pub use charge_client::ChargeClient;
pub use complaint_client::ComplaintClient;
