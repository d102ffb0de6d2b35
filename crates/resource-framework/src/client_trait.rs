//! # ResourceClient Trait
//!
//! Provides a common interface for resource-specific clients, adding default `fetch`,
//! `remove` and `snapshot` methods built on top of a generic `CollectionClient`.
use crate::{CollectionClient, CollectionState, ControllerError, FetchOutcome, ResourceEntity};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard collection operations.
///
/// A domain client wraps a [`CollectionClient`] and converts [`ControllerError`] into its
/// own error type, so screens only ever see one error enum per resource.
///
/// # Example
///
/// ```rust,ignore
/// struct ChargeClient {
///     inner: CollectionClient<Charge>,
/// }
///
/// #[async_trait]
/// impl ResourceClient<Charge> for ChargeClient {
///     type Error = ChargeError;
///
///     fn inner(&self) -> &CollectionClient<Charge> {
///         &self.inner
///     }
///
///     fn map_error(e: ControllerError) -> Self::Error {
///         ChargeError::from(e)
///     }
/// }
///
/// // fetch(), remove() and snapshot() are provided automatically.
/// charges.fetch(None).await?;
/// ```
#[async_trait]
pub trait ResourceClient<T: ResourceEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic CollectionClient.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map controller errors to the specific resource error type.
    fn map_error(e: ControllerError) -> Self::Error;

    /// Reload the list, optionally merging new filters first.
    #[tracing::instrument(skip(self, filters), fields(resource = T::NAME))]
    async fn fetch(&self, filters: Option<T::Filters>) -> Result<FetchOutcome, Self::Error> {
        tracing::debug!(?filters, "Sending request");
        self.inner().fetch(filters).await.map_err(Self::map_error)
    }

    /// Delete a record by id.
    #[tracing::instrument(skip(self), fields(resource = T::NAME))]
    async fn remove(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().remove(id).await.map_err(Self::map_error)
    }

    async fn snapshot(&self) -> Result<CollectionState<T>, Self::Error> {
        self.inner().snapshot().await.map_err(Self::map_error)
    }
}
