//! # Table Actor
//!
//! Owns the dining room tables and their status.
//!
//! ## Overview
//!
//! Tables are not occupied by hand: the order actor seats every active order through
//! the [`TableAction::Occupy`] and [`TableAction::Release`] actions, and the table
//! derives its status from the set of orders it holds. Staff can still override the
//! status with an update, typically to mark a table as reserved.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Table`]
//! - [`error`] - [`TableError`]
//! - [`actions`] - [`TableAction`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! // An order was placed at table 2
//! table_client.occupy(TableId(2), order_id).await?;   // -> Ocupada
//!
//! // It was completed or cancelled
//! table_client.release(TableId(2), order_id).await?;  // -> Disponible when it was the last one
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::TableClient;
use crate::config::keys;
use crate::model::Table;
use resource_actor::{ResourceActor, SharedStore};

/// Creates a new Table actor and its client, persisting to `@pancito_tables`.
pub fn new(storage: SharedStore, channel_size: usize) -> (ResourceActor<Table>, TableClient) {
    let (actor, generic_client) = ResourceActor::new(channel_size, storage, keys::TABLES);
    (actor, TableClient::new(generic_client))
}
