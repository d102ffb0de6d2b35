//! # Building Client
use crate::buildings::BuildingError;
use crate::model::{Building, BuildingAction, BuildingCreate, BuildingStatus, BuildingUpdate};
use async_trait::async_trait;
use resource_framework::{CollectionClient, CollectionState, ControllerError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct BuildingClient {
    inner: CollectionClient<Building>,
}

impl BuildingClient {
    pub fn new(inner: CollectionClient<Building>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_building(&self, params: BuildingCreate) -> Result<Option<Building>, BuildingError> {
        debug!(?params, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_building(
        &self,
        id: u64,
        patch: BuildingUpdate,
    ) -> Result<Option<Building>, BuildingError> {
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: u64, status: BuildingStatus) -> Result<Option<Building>, BuildingError> {
        self.inner
            .mark_status(id, BuildingAction::SetStatus(status))
            .await
            .map_err(Self::map_error)
    }

    pub fn state(&self) -> CollectionState<Building> {
        self.inner.current()
    }
}

#[async_trait]
impl ResourceClient<Building> for BuildingClient {
    type Error = BuildingError;

    fn inner(&self) -> &CollectionClient<Building> {
        &self.inner
    }

    fn map_error(e: ControllerError) -> Self::Error {
        BuildingError::from(e)
    }
}
