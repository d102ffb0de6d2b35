//! # Charge Client
//!
//! Provides a high‑level API for the charges screen. It wraps a
//! `CollectionClient<Charge>` and exposes domain‑specific methods.
use crate::charges::ChargeError;
use crate::model::{BulkChargeCreate, Cents, Charge, ChargeAction, ChargeCreate, ChargeFilters, ChargeStats, ChargeUpdate};
use async_trait::async_trait;
use resource_framework::{CollectionClient, CollectionState, ControllerError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the charge controller.
#[derive(Clone)]
pub struct ChargeClient {
    inner: CollectionClient<Charge>,
}

impl ChargeClient {
    pub fn new(inner: CollectionClient<Charge>) -> Self {
        Self { inner }
    }

    /// Creates a charge. Returns `None` when the server confirmed without sending the
    /// record back; the list has been reloaded in that case.
    #[instrument(skip(self, params), fields(appartement = params.appartement))]
    pub async fn create_charge(&self, params: ChargeCreate) -> Result<Option<Charge>, ChargeError> {
        debug!(?params, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_charge(
        &self,
        id: u64,
        patch: ChargeUpdate,
    ) -> Result<Option<Charge>, ChargeError> {
        debug!(?patch, "Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// Records a payment on a charge.
    #[instrument(skip(self))]
    pub async fn mark_paid(
        &self,
        id: u64,
        paid_amount: Cents,
        paid_date: Option<String>,
    ) -> Result<Option<Charge>, ChargeError> {
        debug!("Sending request");
        self.inner
            .mark_status(
                id,
                ChargeAction::MarkPaid {
                    paid_amount,
                    paid_date,
                },
            )
            .await
            .map_err(Self::map_error)
    }

    /// Bills every apartment of a building. The list is reloaded before this returns.
    #[instrument(skip(self, params), fields(building_id = params.building_id))]
    pub async fn bulk_create(&self, params: BulkChargeCreate) -> Result<(), ChargeError> {
        debug!(?params, "Sending request");
        self.inner.bulk_create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn refresh_charge(&self, id: u64) -> Result<Option<Charge>, ChargeError> {
        self.inner.refresh(id).await.map_err(Self::map_error)
    }

    /// Current statistics without a round trip.
    pub fn stats(&self) -> ChargeStats {
        self.inner.current().stats
    }

    pub fn state(&self) -> CollectionState<Charge> {
        self.inner.current()
    }

    pub async fn clear_error(&self) -> Result<(), ChargeError> {
        self.inner.clear_error().await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ResourceClient<Charge> for ChargeClient {
    type Error = ChargeError;

    fn inner(&self) -> &CollectionClient<Charge> {
        &self.inner
    }

    fn map_error(e: ControllerError) -> Self::Error {
        ChargeError::from(e)
    }
}

impl ChargeClient {
    /// Reloads the list with only `status` changed.
    pub async fn filter_by_status(&self, status: &str) -> Result<(), ChargeError> {
        let filters = ChargeFilters {
            status: Some(status.to_string()),
            ..Default::default()
        };
        self.fetch(Some(filters)).await.map(|_| ())
    }
}
