//! # Customer Client
use crate::clients::entity_error;
use crate::customer_actor::CustomerError;
use crate::model::{CustomerCreate, CustomerId, CustomerUpdate, FrequentCustomer};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the frequent-customer registry.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<FrequentCustomer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<FrequentCustomer>) -> Self {
        Self { inner }
    }

    /// Registers a customer. A name already in use is reported as
    /// [`CustomerError::AlreadyExists`] with that name.
    #[instrument(skip(self))]
    pub async fn add_customer(&self, params: CustomerCreate) -> Result<CustomerId, CustomerError> {
        debug!("Sending request");
        let name = params.name.trim().to_string();
        self.inner.create(params).await.map_err(|e| match e {
            FrameworkError::Conflict(_) => CustomerError::AlreadyExists(name),
            other => Self::map_error(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn update_local(
        &self,
        id: CustomerId,
        local: String,
    ) -> Result<FrequentCustomer, CustomerError> {
        debug!("Sending request");
        self.inner
            .update(id, CustomerUpdate { local })
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<FrequentCustomer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<FrequentCustomer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => CustomerError::NotFound(id),
            FrameworkError::Conflict(id) => CustomerError::AlreadyExists(id),
            FrameworkError::Storage(e) => CustomerError::StorageError(e.to_string()),
            FrameworkError::EntityError(e) => entity_error(e),
            other => CustomerError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use resource_actor::mock::MockClient;

    #[tokio::test]
    async fn test_conflict_reports_the_requested_name() {
        let mut mock = MockClient::<FrequentCustomer>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict(CustomerId::from(1).to_string()));
        let client = CustomerClient::new(mock.client());

        let result = client
            .add_customer(CustomerCreate {
                name: " Ana ".to_string(),
                local: "Botillería".to_string(),
                created_at: Utc::now(),
            })
            .await;

        assert_eq!(result, Err(CustomerError::AlreadyExists("Ana".to_string())));
        mock.verify();
    }
}
