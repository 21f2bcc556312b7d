//! # Order Client
//!
//! High-level API for the Order actor. Table bookkeeping happens inside the actor's
//! hooks, so every method here is a single request.
use crate::clients::entity_error;
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(table = ?params.table_id, items = params.items.len()))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        info!("Sending create_order to actor");
        // Table occupancy is handled in Order::on_create
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn complete_order(&self, id: OrderId) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Complete)
            .await
            .map_err(Self::map_error)
    }

    /// Removes an active order. Completed orders are kept.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<(), OrderError> {
        debug!("Sending request");
        self.inner.delete(id).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_paid(&self, id: OrderId, paid: bool) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::SetPaid(paid))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Storage(e) => OrderError::StorageError(e.to_string()),
            FrameworkError::EntityError(e) => entity_error(e),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
