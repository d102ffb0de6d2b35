//! # ResourceEntity Trait
//!
//! The `ResourceEntity` trait defines the contract every dashboard resource (charge,
//! complaint, building, ...) implements to be managed by the generic
//! [`CollectionController`](crate::CollectionController). It names the DTOs sent to the
//! server, the typed filters and statistics, where the resource lives in the API, and how
//! statistics are derived from a record list.
//!
//! # Provided Items
//! Everything with a default (update verb, statistics source, bulk endpoint, item path,
//! default messages) only needs overriding when a resource deviates from the common
//! REST layout.

use crate::filters::FilterSet;
use crate::transport::{ApiRequest, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Where a resource's aggregate statistics come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSource {
    /// Computed client-side with [`ResourceEntity::derive_stats`].
    Derived,
    /// Fetched from a dedicated endpoint after every list load and mutation.
    Endpoint(&'static str),
}

/// The operations a controller performs, used for logging and default messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Remove,
    MarkStatus,
    BulkCreate,
    Refresh,
    Stats,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::Fetch | Operation::Refresh => "fetch",
            Operation::Create => "create",
            Operation::Update | Operation::MarkStatus => "update",
            Operation::Remove => "delete",
            Operation::BulkCreate => "bulk create",
            Operation::Stats => "load statistics for",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Operation::Create | Operation::BulkCreate => "created",
            Operation::Update | Operation::MarkStatus => "updated",
            Operation::Remove => "deleted",
            Operation::Fetch | Operation::Refresh | Operation::Stats => "loaded",
        }
    }

    /// Whether a successful run of this operation posts a success notice.
    pub fn announces_success(self) -> bool {
        !matches!(
            self,
            Operation::Fetch | Operation::Refresh | Operation::Stats
        )
    }
}

/// Trait that any resource record must implement to be managed by a collection controller.
///
/// The associated types keep every payload typed: a charge controller only accepts a
/// `ChargeCreate`, and its list filters are a `ChargeFilters`, never a loose map.
pub trait ResourceEntity: Clone + Debug + Send + Sync + DeserializeOwned + 'static {
    /// Server-assigned identifier; its `Display` form is used in URLs.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// Payload for the create endpoint.
    type Create: Serialize + Send + Sync + Debug + 'static;

    /// Payload for the update endpoint.
    type Update: Serialize + Send + Sync + Debug + 'static;

    /// Status transitions with their own endpoints (mark paid, mark resolved, ...).
    type Action: Send + Sync + Debug + 'static;

    /// Payload for the bulk-create endpoint. Use `()` when there is none.
    type BulkCreate: Serialize + Send + Sync + Debug + 'static;

    type Filters: FilterSet;

    /// Aggregate statistics. Must deserialize from the statistics endpoint when
    /// [`ResourceEntity::STATS`] is [`StatsSource::Endpoint`].
    type Stats: Clone + Default + PartialEq + Debug + Send + Sync + DeserializeOwned + 'static;

    /// Singular, lowercase name ("charge").
    const NAME: &'static str;

    /// Collection path relative to the API root, with a trailing slash.
    const PATH: &'static str;

    /// Resource-named envelope key used by some list endpoints instead of `data`.
    const COLLECTION_KEY: Option<&'static str> = None;

    const UPDATE_METHOD: Method = Method::Put;

    const STATS: StatsSource = StatsSource::Derived;

    const BULK_CREATE_PATH: Option<&'static str> = None;

    fn id(&self) -> Self::Id;

    /// Pure, order-independent aggregation over `records`.
    fn derive_stats(records: &[Self]) -> Self::Stats;

    /// Builds the request for a status transition.
    fn action_request(id: &Self::Id, action: &Self::Action) -> Result<ApiRequest, serde_json::Error>;

    fn item_path(id: &Self::Id) -> String {
        format!("{}{}/", Self::PATH, id)
    }

    fn plural() -> String {
        format!("{}s", Self::NAME)
    }

    /// Message shown when a mutation succeeds and the server sent none.
    fn success_message(op: Operation) -> String {
        format!("{} {} successfully", capitalize(Self::NAME), op.past())
    }

    /// Message shown when an operation fails and neither the server nor the transport
    /// supplied one.
    fn failure_message(op: Operation) -> String {
        match op {
            Operation::Fetch | Operation::Stats => {
                format!("Failed to {} {}", op.verb(), Self::plural())
            }
            Operation::BulkCreate => format!("Failed to bulk create {}", Self::plural()),
            _ => format!("Failed to {} {}", op.verb(), Self::NAME),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_handles_empty_and_words() {
        assert_eq!(capitalize("charge"), "Charge");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn only_mutations_announce_success() {
        assert!(Operation::Create.announces_success());
        assert!(Operation::MarkStatus.announces_success());
        assert!(!Operation::Fetch.announces_success());
        assert!(!Operation::Refresh.announces_success());
    }
}
