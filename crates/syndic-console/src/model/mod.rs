//! Data structures for the dashboard resources: the records the API returns, the
//! payloads sent to it, typed list filters and aggregate statistics.

pub mod building;
pub mod charge;
pub mod complaint;
pub mod money;

pub use building::*;
pub use charge::*;
pub use complaint::*;
pub use money::Cents;
