//! [`ActorEntity`] implementation for [`FrequentCustomer`].

use crate::customer_actor::CustomerError;
use crate::model::{CustomerCreate, CustomerId, CustomerUpdate, FrequentCustomer};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for FrequentCustomer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    fn id(&self) -> CustomerId {
        self.id
    }

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, CustomerError> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(CustomerError::ValidationError("name must not be empty".to_string()));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            local: params.local.trim().to_string(),
            created_at: params.created_at,
        })
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        other.matches_name(&self.name)
    }

    async fn on_update(&mut self, update: CustomerUpdate, _ctx: &()) -> Result<(), CustomerError> {
        self.local = update.local.trim().to_string();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), CustomerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn customer(id: u32, name: &str) -> FrequentCustomer {
        FrequentCustomer::from_create_params(
            CustomerId::from(id),
            CustomerCreate {
                name: name.to_string(),
                local: "Ferretería".to_string(),
                created_at: Utc::now(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_names_conflict_ignoring_case_and_spaces() {
        let ana = customer(1, "Ana");
        assert!(customer(2, "  ana ").conflicts_with(&ana));
        assert!(!customer(3, "Anabel").conflicts_with(&ana));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let result = FrequentCustomer::from_create_params(
            CustomerId::from(1),
            CustomerCreate {
                name: " ".to_string(),
                local: String::new(),
                created_at: Utc::now(),
            },
        );
        assert!(matches!(result, Err(CustomerError::ValidationError(_))));
    }
}
