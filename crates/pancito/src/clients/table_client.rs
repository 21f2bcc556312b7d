//! # Table Client
//!
//! High-level API for the Table actor. Besides the manual status override it exposes
//! the occupancy actions the order actor uses while handling an order's lifecycle.
use crate::clients::entity_error;
use crate::model::{OrderId, Table, TableCreate, TableId, TableStatus, TableUpdate};
use crate::table_actor::{TableAction, TableError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Table actor.
#[derive(Clone)]
pub struct TableClient {
    inner: ResourceClient<Table>,
}

impl TableClient {
    pub fn new(inner: ResourceClient<Table>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_table(&self, params: TableCreate) -> Result<TableId, TableError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Seats `order` at `table`.
    #[instrument(skip(self))]
    pub async fn occupy(&self, table: TableId, order: OrderId) -> Result<TableStatus, TableError> {
        debug!("Sending request");
        self.inner
            .perform_action(table, TableAction::Occupy(order))
            .await
            .map_err(Self::map_error)
    }

    /// Detaches `order` from `table`, freeing it when no active order remains.
    #[instrument(skip(self))]
    pub async fn release(&self, table: TableId, order: OrderId) -> Result<TableStatus, TableError> {
        debug!("Sending request");
        self.inner
            .perform_action(table, TableAction::Release(order))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, table: TableId, status: TableStatus) -> Result<Table, TableError> {
        debug!("Sending request");
        self.inner
            .update(table, TableUpdate { status })
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Table> for TableClient {
    type Error = TableError;

    fn inner(&self) -> &ResourceClient<Table> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => TableError::NotFound(id),
            FrameworkError::Storage(e) => TableError::StorageError(e.to_string()),
            FrameworkError::EntityError(e) => entity_error(e),
            other => TableError::ActorCommunicationError(other.to_string()),
        }
    }
}
