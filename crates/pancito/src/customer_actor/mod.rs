//! # Customer Actor
//!
//! Registry of frequent customers. Orders name their customer instead of holding an
//! id, so the actor refuses a second customer with the same name through
//! [`ActorEntity::conflicts_with`](resource_actor::ActorEntity::conflicts_with).

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CustomerClient;
use crate::config::keys;
use crate::model::FrequentCustomer;
use resource_actor::{ResourceActor, SharedStore};

/// Creates a new Customer actor and its client, persisting to `@pancito_frequent_customers`.
pub fn new(
    storage: SharedStore,
    channel_size: usize,
) -> (ResourceActor<FrequentCustomer>, CustomerClient) {
    let (actor, generic_client) = ResourceActor::new(channel_size, storage, keys::CUSTOMERS);
    (actor, CustomerClient::new(generic_client))
}
