//! # Generic Client
//!
//! This module defines the generic client for talking to a collection controller.

use crate::entity::ResourceEntity;
use crate::error::ControllerError;
use crate::message::{ControllerRequest, FetchOutcome, Response};
use crate::state::CollectionState;
use tokio::sync::{mpsc, oneshot, watch};

/// ## CollectionClient
///
/// The `CollectionClient<T>` provides a type-safe, async API for interacting with a
/// `CollectionController<T>`. Requests travel over a Tokio mpsc channel and results come
/// back over oneshot channels. Every published state change is also available through
/// [`subscribe`](CollectionClient::subscribe).
///
/// * **Cloneable**: holds a sender and a watch receiver, so cloning is inexpensive.
/// * **Async API**: all request methods resolve to `Result<…, ControllerError>`.
/// * **Generic**: works with any entity that implements `ResourceEntity`.
#[derive(Clone)]
pub struct CollectionClient<T: ResourceEntity> {
    sender: mpsc::Sender<ControllerRequest<T>>,
    snapshots: watch::Receiver<CollectionState<T>>,
}

impl<T: ResourceEntity> CollectionClient<T> {
    pub fn new(
        sender: mpsc::Sender<ControllerRequest<T>>,
        snapshots: watch::Receiver<CollectionState<T>>,
    ) -> Self {
        Self { sender, snapshots }
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ControllerRequest<T>,
    ) -> Result<R, ControllerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ControllerError::ControllerClosed)?;
        response.await.map_err(|_| ControllerError::ControllerDropped)?
    }

    /// Merges `filters` into the current filters (if given) and reloads the list.
    pub async fn fetch(&self, filters: Option<T::Filters>) -> Result<FetchOutcome, ControllerError> {
        self.call(|respond_to| ControllerRequest::Fetch {
            filters,
            respond_to,
        })
        .await
    }

    pub async fn create(&self, input: T::Create) -> Result<Option<T>, ControllerError> {
        self.call(|respond_to| ControllerRequest::Create { input, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Update) -> Result<Option<T>, ControllerError> {
        self.call(|respond_to| ControllerRequest::Update {
            id,
            patch,
            respond_to,
        })
        .await
    }

    pub async fn remove(&self, id: T::Id) -> Result<(), ControllerError> {
        self.call(|respond_to| ControllerRequest::Remove { id, respond_to })
            .await
    }

    pub async fn mark_status(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<Option<T>, ControllerError> {
        self.call(|respond_to| ControllerRequest::MarkStatus {
            id,
            action,
            respond_to,
        })
        .await
    }

    pub async fn bulk_create(&self, input: T::BulkCreate) -> Result<(), ControllerError> {
        self.call(|respond_to| ControllerRequest::BulkCreate { input, respond_to })
            .await
    }

    /// Reloads a single record and merges it into the list.
    pub async fn refresh(&self, id: T::Id) -> Result<Option<T>, ControllerError> {
        self.call(|respond_to| ControllerRequest::Refresh { id, respond_to })
            .await
    }

    pub async fn refresh_stats(&self) -> Result<T::Stats, ControllerError> {
        self.call(|respond_to| ControllerRequest::RefreshStats { respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<CollectionState<T>, ControllerError> {
        self.call(|respond_to| ControllerRequest::Snapshot { respond_to })
            .await
    }

    /// Clears the notice if it is an error; a success notice is left alone.
    pub async fn clear_error(&self) -> Result<(), ControllerError> {
        self.call(|respond_to| ControllerRequest::ClearError { respond_to })
            .await
    }

    pub async fn dismiss_notice(&self) -> Result<(), ControllerError> {
        self.call(|respond_to| ControllerRequest::DismissNotice { respond_to })
            .await
    }

    /// Asks the controller to stop. In-flight requests are abandoned.
    pub async fn shutdown(&self) -> Result<(), ControllerError> {
        self.sender
            .send(ControllerRequest::Shutdown)
            .await
            .map_err(|_| ControllerError::ControllerClosed)
    }

    /// A receiver that observes every state the controller publishes.
    pub fn subscribe(&self) -> watch::Receiver<CollectionState<T>> {
        self.snapshots.clone()
    }

    /// The most recently published state, without a round trip to the controller.
    pub fn current(&self) -> CollectionState<T> {
        self.snapshots.borrow().clone()
    }
}
