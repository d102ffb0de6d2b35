//! # Syndic Console Library
//!
//! The charges, complaints and buildings screens of the syndic dashboard, wired on top of
//! [`resource_framework`] (collections) and [`action_forms`] (modals). Exposed as a
//! library for integration testing and the demo binary.

pub mod buildings;
pub mod charges;
pub mod clients;
pub mod complaints;
pub mod lifecycle;
pub mod model;
