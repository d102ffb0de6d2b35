//! # Observability & Tracing
//!
//! Structured logging for every controller, filtered through `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Controller Lifecycle**: startup and shutdown, with the final list size
//! - **Requests**: fetch sequence numbers and filters, mutation payloads at `debug`
//! - **Reconciliation**: stale list responses that were dropped, records missing from
//!   the current list, unexpected response shapes
//! - **Errors**: the operation, resource and underlying API error
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Payloads, HTTP requests and notice expiry
//! RUST_LOG=debug cargo run
//!
//! # Only the framework
//! RUST_LOG=resource_framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a charge screen session reads like:
//!
//! ```text
//! INFO Controller started resource="charge"
//! INFO Fetched resource="charge" seq=1 size=12
//! INFO Applied resource="charge" op=MarkStatus size=12
//! WARN Dropping stale list response resource="charge" seq=2 latest=3
//! ```

/// Initializes the tracing subscriber: `RUST_LOG` filtering, compact output, no module
/// paths (every event carries a `resource` field instead).
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
