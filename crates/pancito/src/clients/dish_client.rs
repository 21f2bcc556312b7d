//! # Dish Client
//!
//! High-level API for the menu.
use crate::clients::entity_error;
use crate::dish_actor::DishError;
use crate::model::{Dish, DishCreate, DishId, DishUpdate};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Dish actor.
#[derive(Clone)]
pub struct DishClient {
    inner: ResourceClient<Dish>,
}

impl DishClient {
    pub fn new(inner: ResourceClient<Dish>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn add_dish(&self, params: DishCreate) -> Result<DishId, DishError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_dish(&self, id: DishId, update: DishUpdate) -> Result<Dish, DishError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Dish> for DishClient {
    type Error = DishError;

    fn inner(&self) -> &ResourceClient<Dish> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => DishError::NotFound(id),
            FrameworkError::Storage(e) => DishError::StorageError(e.to_string()),
            FrameworkError::EntityError(e) => entity_error(e),
            other => DishError::ActorCommunicationError(other.to_string()),
        }
    }
}
