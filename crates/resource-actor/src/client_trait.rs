//! # ActorClient Trait
//!
//! Common interface for resource-specific clients: default `get`, `list` and `delete`
//! built on top of the wrapped [`ResourceClient`], with framework errors translated
//! into the resource's own error type.

use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read/delete operations.
///
/// # Example
///
/// ```rust
/// use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Dish { id: u32 }
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct DishError(String);
///
/// #[async_trait]
/// impl ActorEntity for Dish {
///     type Id = u32;
///     type Create = ();
///     type Update = ();
///     type Action = ();
///     type ActionResult = ();
///     type Context = ();
///     type Error = DishError;
///
///     fn id(&self) -> u32 { self.id }
///     fn from_create_params(id: u32, _: ()) -> Result<Self, DishError> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), DishError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), DishError> { Ok(()) }
/// }
///
/// struct DishClient { inner: ResourceClient<Dish> }
///
/// #[async_trait]
/// impl ActorClient<Dish> for DishClient {
///     type Error = DishError;
///
///     fn inner(&self) -> &ResourceClient<Dish> { &self.inner }
///
///     fn map_error(e: FrameworkError) -> DishError { DishError(e.to_string()) }
/// }
///
/// async fn usage(client: DishClient) {
///     // get(), list() and delete() are provided automatically
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Snapshot of every entity, in insertion order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Replace the whole collection.
    #[tracing::instrument(skip(self, items), fields(count = items.len()))]
    async fn replace_all(&self, items: Vec<T>) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().replace_all(items).await.map_err(Self::map_error)
    }
}
