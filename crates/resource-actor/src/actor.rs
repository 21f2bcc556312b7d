//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns one persisted
//! collection. It implements the "Server" side of the Actor Model: requests are
//! processed sequentially, and after every successful mutation the whole collection is
//! written back to its [`KeyValueStore`](crate::KeyValueStore) key.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::storage::{save_json, SharedStore};
use indexmap::IndexMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a persisted collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`), the
/// receiver end of the channel and the storage key its collection is written to.
///
/// **Concurrency Model**:
/// Each actor processes its own messages *sequentially* in a loop, so the `store`
/// needs no `Mutex`. Two clients completing orders at the same time are simply
/// queued.
///
/// **Ordering**: entities are kept in insertion order (`IndexMap`), so the persisted
/// JSON array, `List` responses and backups all preserve the order in which entities
/// were added.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the `actor` and its `client`.
/// 2.  **Load**: optionally preload a persisted collection with [`with_items`](Self::with_items).
/// 3.  **Wire & Run**: spawn `actor.run(context)`.
///
/// ```rust
/// use resource_actor::{ActorEntity, MemoryStore, ResourceActor};
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
///
/// #[derive(Clone, Debug, Serialize, Deserialize)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = String;
///     type Action = ();
///     type ActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn id(&self) -> u32 { self.id }
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, NoteError> {
///         Ok(Self { id, text: p.0 })
///     }
///     async fn on_update(&mut self, text: String, _: &()) -> Result<(), NoteError> {
///         self.text = text;
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let store = MemoryStore::new();
///     let (actor, client) = ResourceActor::<Note>::new(10, Arc::new(store.clone()), "@notes");
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(NoteCreate("hola".into())).await.unwrap();
///     assert_eq!(id, 1);
///     assert!(store.raw("@notes").unwrap().contains("hola"));
/// }
/// ```
///
/// # Operations
///
/// * **Create**: assign the next id, build via `from_create_params`, reject conflicts,
///   run `on_create`, insert, persist.
/// * **Get / List**: clone from the store; never persists.
/// * **Update**: apply `on_update` to a copy, reject conflicts, commit, persist.
/// * **Delete**: run `on_delete`, remove, persist.
/// * **Action**: apply `handle_action` to a copy, commit on success, persist.
/// * **ReplaceAll**: swap the whole collection, reset the id counter, persist.
///
/// A failed write leaves the in-memory change in place and returns
/// [`FrameworkError::Storage`] to the caller.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: IndexMap<T::Id, T>,
    next_id: u32,
    storage: SharedStore,
    key: String,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the MPSC channel. Clients wait when it is full.
    /// * `storage` - Store the collection is persisted to.
    /// * `key` - Storage key holding this collection's JSON array.
    pub fn new(
        buffer_size: usize,
        storage: SharedStore,
        key: impl Into<String>,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: IndexMap::new(),
            next_id: 1,
            storage,
            key: key.into(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Preloads entities (typically read back from storage) without persisting them.
    /// The id counter resumes after the highest loaded id.
    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.replace_items(items);
        self
    }

    fn replace_items(&mut self, items: Vec<T>) {
        self.store = items.into_iter().map(|item| (item.id(), item)).collect();
        self.next_id = self
            .store
            .keys()
            .map(|id| Into::<u32>::into(*id))
            .max()
            .map_or(1, |max| max + 1);
    }

    async fn persist(&self) -> Result<(), FrameworkError> {
        let items: Vec<&T> = self.store.values().collect();
        save_json(self.storage.as_ref(), &self.key, &items).await?;
        Ok(())
    }

    fn find_conflict(&self, candidate: &T) -> Option<T::Id> {
        self.store
            .values()
            .find(|other| other.id() != candidate.id() && candidate.conflicts_with(other))
            .map(|other| other.id())
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to reach other actors' clients that were created *after* this actor but
    /// *before* its loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Order" instead of "pancito::model::order::Order")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, key = %self.key, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let mut item = match T::from_create_params(id, params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Some(existing) = self.find_conflict(&item) {
                        warn!(entity_type, %existing, "Create conflicts");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(existing.to_string())));
                        continue;
                    }
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }

                    self.next_id += 1;
                    self.store.insert(id, item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(self.persist().await.map(|_| id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    let mut updated = current.clone();
                    if let Err(e) = updated.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(existing) = self.find_conflict(&updated) {
                        warn!(entity_type, %id, %existing, "Update conflicts");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(existing.to_string())));
                        continue;
                    }

                    self.store.insert(id, updated.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(self.persist().await.map(|_| updated));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.shift_remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(self.persist().await);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    let mut updated = current.clone();
                    match updated.handle_action(action, &context).await {
                        Ok(result) => {
                            self.store.insert(id, updated);
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(self.persist().await.map(|_| result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::ReplaceAll { items, respond_to } => {
                    debug!(entity_type, count = items.len(), "ReplaceAll");
                    self.replace_items(items);
                    info!(entity_type, size = self.store.len(), next_id = self.next_id, "Replaced");
                    let _ = respond_to.send(self.persist().await);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
