//! # Order Actor
//!
//! Owns the order history and enforces the order lifecycle:
//!
//! ```text
//! create ──► active ──Complete──► completed
//!               │
//!               └────delete─────► removed (cancelled)
//! ```
//!
//! ## Dependency on the Table Actor
//!
//! `Context = TableClient`. The lifecycle hooks keep table occupancy in step with the
//! orders:
//!
//! - `on_create` seats the order at its table ([`TableAction::Occupy`](crate::table_actor::TableAction::Occupy)).
//! - `Complete` and `on_delete` release it ([`TableAction::Release`](crate::table_actor::TableAction::Release)).
//!
//! Free-zone orders (`table_id = None`) never talk to the table actor.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`OrderAction`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::config::keys;
use crate::model::Order;
use resource_actor::{ResourceActor, SharedStore};

/// Creates a new Order actor and its client, persisting to `@pancito_orders`.
///
/// The actor must be started with a [`TableClient`](crate::clients::TableClient) as context.
pub fn new(storage: SharedStore, channel_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(channel_size, storage, keys::ORDERS);
    (actor, OrderClient::new(generic_client))
}
