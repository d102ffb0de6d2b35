//! # Complaint Client
//!
//! High‑level API for the complaints screen, wrapping a `CollectionClient<Complaint>`.
use crate::complaints::ComplaintError;
use crate::model::{Complaint, ComplaintAction, ComplaintStats, ComplaintStatus, ComplaintUpdate};
use async_trait::async_trait;
use resource_framework::{CollectionClient, CollectionState, ControllerError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ComplaintClient {
    inner: CollectionClient<Complaint>,
}

#[async_trait]
impl ResourceClient<Complaint> for ComplaintClient {
    type Error = ComplaintError;

    fn inner(&self) -> &CollectionClient<Complaint> {
        &self.inner
    }

    fn map_error(e: ControllerError) -> Self::Error {
        ComplaintError::from(e)
    }
}

impl ComplaintClient {
    pub fn new(inner: CollectionClient<Complaint>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, patch))]
    pub async fn update_complaint(
        &self,
        id: u64,
        patch: ComplaintUpdate,
    ) -> Result<Option<Complaint>, ComplaintError> {
        debug!(?patch, "Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// Answers the resident. Without `status` the complaint moves to in progress.
    #[instrument(skip(self, response))]
    pub async fn respond(
        &self,
        id: u64,
        response: String,
        status: Option<ComplaintStatus>,
    ) -> Result<Option<Complaint>, ComplaintError> {
        self.transition(id, ComplaintAction::Respond { response, status })
            .await
    }

    pub async fn mark_resolved(&self, id: u64) -> Result<Option<Complaint>, ComplaintError> {
        self.transition(id, ComplaintAction::MarkResolved).await
    }

    pub async fn mark_in_progress(&self, id: u64) -> Result<Option<Complaint>, ComplaintError> {
        self.transition(id, ComplaintAction::MarkInProgress).await
    }

    /// Rejects a complaint; the response explaining why must not be blank.
    #[instrument(skip(self, response))]
    pub async fn reject(&self, id: u64, response: String) -> Result<Option<Complaint>, ComplaintError> {
        if response.trim().is_empty() {
            return Err(ComplaintError::MissingResponse);
        }
        self.transition(id, ComplaintAction::Reject { response }).await
    }

    async fn transition(
        &self,
        id: u64,
        action: ComplaintAction,
    ) -> Result<Option<Complaint>, ComplaintError> {
        debug!(id, ?action, "Sending request");
        self.inner
            .mark_status(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Reloads the statistics from the server without touching the list.
    pub async fn refresh_stats(&self) -> Result<ComplaintStats, ComplaintError> {
        self.inner.refresh_stats().await.map_err(Self::map_error)
    }

    pub fn state(&self) -> CollectionState<Complaint> {
        self.inner.current()
    }
}
