//! # Generic Messages
//!
//! This module defines the messages exchanged between a
//! [`CollectionClient`](crate::CollectionClient) and its
//! [`CollectionController`](crate::CollectionController).

use crate::entity::ResourceEntity;
use crate::error::ControllerError;
use crate::state::CollectionState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by controllers.
pub type Response<T> = oneshot::Sender<Result<T, ControllerError>>;

/// What happened to a fetch once its response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was the latest one issued and replaced the records.
    Applied,
    /// A newer fetch was issued before this one answered; its response was dropped.
    Superseded,
}

/// Requests a controller accepts.
///
/// # The CRUD Pattern
/// The variants map to the list/create/update/delete lifecycle of a REST resource, plus
/// `MarkStatus` for resource-specific transitions that do not fit plain CRUD, and a few
/// housekeeping requests that only touch local state.
///
/// Every payload type comes from the [`ResourceEntity`] associated types, so a charge
/// controller cannot be handed a complaint payload.
#[derive(Debug)]
pub enum ControllerRequest<T: ResourceEntity> {
    Fetch {
        filters: Option<T::Filters>,
        respond_to: Response<FetchOutcome>,
    },
    Create {
        input: T::Create,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Update,
        respond_to: Response<Option<T>>,
    },
    Remove {
        id: T::Id,
        respond_to: Response<()>,
    },
    MarkStatus {
        id: T::Id,
        action: T::Action,
        respond_to: Response<Option<T>>,
    },
    BulkCreate {
        input: T::BulkCreate,
        respond_to: Response<()>,
    },
    Refresh {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    RefreshStats {
        respond_to: Response<T::Stats>,
    },
    Snapshot {
        respond_to: Response<CollectionState<T>>,
    },
    ClearError {
        respond_to: Response<()>,
    },
    DismissNotice {
        respond_to: Response<()>,
    },
    Shutdown,
}
