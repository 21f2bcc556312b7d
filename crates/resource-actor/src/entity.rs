//! # ActorEntity Trait
//!
//! The contract every persisted resource (dish, table, order, customer, …) implements to
//! be managed by the generic [`ResourceActor`](crate::ResourceActor).
//!
//! # Associated Types
//! Each entity names its id, its creation and update payloads, its custom actions and
//! their result, the context injected into hooks, and its own error type. A `Table`
//! actor only ever accepts `TableCreate` payloads; the compiler rejects anything else.
//!
//! # Persistence
//! Entities are `Serialize + DeserializeOwned` because the actor writes its whole
//! collection to a [`KeyValueStore`](crate::KeyValueStore) after each mutation.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::conflicts_with`]
//!
//! The defaults accept everything.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are async so they can call other actors. The `Context` associated type is
/// injected into every hook when the actor is started, which lets an order reach the
/// table actor without the two being wired at construction time.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Converts to and from `u32` so the actor can assign ids from a counter and resume
    /// that counter after loading a persisted collection.
    type Id: Eq + Hash + Copy + Send + Sync + Display + Debug + From<u32> + Into<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `Complete`, `Occupy`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum per actor, not per message: a `Complete` action and an item edit
    /// on an order both fail with `OrderError`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The entity's own id.
    fn id(&self) -> Self::Id;

    /// Construct the full entity from the assigned id and the payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether `self` may not coexist with `other` in the same collection
    /// (e.g. two customers with the same name). Checked on create and update.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the entity is removed. Returning an error keeps it in place.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
