//! # Dish Actor
//!
//! Owns the menu. The simplest actor in the ledger: plain CRUD, no dependencies
//! (`Context = ()`) and no custom actions.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Dish`]
//! - [`error`] - [`DishError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use pancito::dish_actor;
//! use pancito::model::{DishCategory, DishCreate};
//! use resource_actor::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = dish_actor::new(Arc::new(MemoryStore::new()), 8);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .add_dish(DishCreate {
//!             name: "Café".to_string(),
//!             description: "Café de grano".to_string(),
//!             price: 1500.0,
//!             category: DishCategory::Bebestibles,
//!         })
//!         .await?;
//!     assert_eq!(id.0, 1);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::DishClient;
use crate::config::keys;
use crate::model::Dish;
use resource_actor::{ResourceActor, SharedStore};

/// Creates a new Dish actor and its client, persisting to `@pancito_dishes`.
pub fn new(storage: SharedStore, channel_size: usize) -> (ResourceActor<Dish>, DishClient) {
    let (actor, generic_client) = ResourceActor::new(channel_size, storage, keys::DISHES);
    (actor, DishClient::new(generic_client))
}
