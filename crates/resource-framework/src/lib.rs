//! # Resource Framework
//!
//! This crate provides the building blocks for the data layer of the syndic dashboard.
//! Every screen (charges, complaints, buildings, ...) shows one collection of records
//! fetched from a REST backend, lets the user filter it, mutate individual records and
//! read aggregate statistics, and shows a short-lived success or error notice after each
//! operation. The framework implements that lifecycle **once**, generically, on top of
//! the **Actor Model**.
//!
//! ## Why an Actor per Collection?
//!
//! A dashboard collection is shared mutable state touched by many asynchronous events:
//! list responses, mutation responses, timer expiries, user input. Owning it inside a
//! single task gives:
//!
//! - Isolated state (no shared memory, no locks)
//! - A single place where responses are reconciled, in a well-defined order
//! - Cheap, cloneable handles that any task can use
//!
//! Network requests run concurrently in their own tasks; only the *application* of their
//! results is serialized through the controller.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into four layers:
//!
//! 1. **Entity Layer** ([`ResourceEntity`]) - endpoints, DTOs, filters, statistics
//! 2. **Runtime Layer** ([`CollectionController`]) - request processing and reconciliation
//! 3. **Interface Layer** ([`CollectionClient`], [`ResourceClient`]) - type-safe access
//! 4. **Transport Layer** ([`Transport`]) - HTTP in production, [`mock::MockTransport`] in tests
//!
//! ## Core Abstractions
//!
//! ### [`ResourceEntity`] - The Resource Description
//!
//! ```rust,ignore
//! impl ResourceEntity for Charge {
//!     type Id = u64;
//!     type Create = ChargeCreate;
//!     type Update = ChargeUpdate;
//!     type Action = ChargeAction;
//!     type BulkCreate = BulkChargeCreate;
//!     type Filters = ChargeFilters;
//!     type Stats = ChargeStats;
//!
//!     const NAME: &'static str = "charge";
//!     const PATH: &'static str = "syndic/charges/";
//!
//!     fn id(&self) -> u64 { self.id }
//!     fn derive_stats(records: &[Self]) -> ChargeStats { /* ... */ }
//!     fn action_request(id: &u64, action: &ChargeAction) -> Result<ApiRequest, serde_json::Error> { /* ... */ }
//! }
//! ```
//!
//! ### [`CollectionController`] - The Runtime
//!
//! ```rust,ignore
//! let (controller, charges) = CollectionController::<Charge>::new(ControllerConfig::from_env()?);
//! tokio::spawn(controller.run(Arc::new(HttpTransport::new(&ApiConfig::from_env()?)?)));
//!
//! charges.fetch(Some(ChargeFilters::status(ChargeStatus::Unpaid))).await?;
//! let state = charges.current();
//! println!("{} unpaid, {} outstanding", state.records.len(), state.stats.unpaid_amount);
//! ```
//!
//! ## Transport Injection
//!
//! The transport is injected at **runtime** via `run()`, not at construction time, so
//! clients can be created and handed to their consumers before the backend is wired, and
//! tests can swap in [`mock::MockTransport`] without touching anything else.
//!
//! ## Concurrency Model
//!
//! - Each controller runs in its own Tokio task
//! - Requests and completions are processed **sequentially** within a controller
//! - The latest fetch wins: an older list response arriving late is discarded
//! - A second mutation on a record with one already in flight is refused with
//!   [`ControllerError::Busy`]
//! - Dropping every client stops the controller; pending timers and requests are aborted
//!
//! ## Testing
//!
//! The [`mock`] module provides `MockTransport`, an in-memory backend with per-request
//! expectations and optional delays. Run a real controller against it for fast,
//! deterministic tests.

pub mod client;
pub mod client_trait;
pub mod config;
pub mod controller;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod filters;
pub mod http;
pub mod message;
pub mod mock;
pub mod notice;
pub mod state;
pub mod tracing;
pub mod transport;

// Re-export core types for convenience
pub use client::CollectionClient;
pub use client_trait::ResourceClient;
pub use config::{ApiConfig, ConfigError, ControllerConfig};
pub use controller::CollectionController;
pub use entity::{Operation, ResourceEntity, StatsSource};
pub use error::{ApiError, ControllerError};
pub use filters::{merge_option, FilterSet, QueryParams, Scope};
pub use http::HttpTransport;
pub use message::{ControllerRequest, FetchOutcome, Response};
pub use notice::Notice;
pub use state::CollectionState;
pub use transport::{ApiRequest, Method, Transport};
