//! # Resource Actor
//!
//! Building blocks for keeping small collections of entities in Tokio actors and
//! persisting them to a key-value store.
//!
//! ## Why actors for a handful of collections?
//!
//! Each collection (dishes, tables, orders, …) is owned by exactly one task. Requests
//! queue on a channel and are applied one at a time, so read-modify-write sequences
//! such as "complete this order, then free the table if nothing else is active" can
//! never interleave with another request on the same collection. No locks are needed.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the domain type, its payloads, hooks and actions
//! 2. **Runtime Layer** ([`ResourceActor`]) - message loop, id assignment, persistence
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed async handles
//! 4. **Storage Layer** ([`KeyValueStore`]) - where each collection's JSON array lives
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor is started, not when it is built:
//!
//! ```rust,ignore
//! let (table_actor, table_client) = ResourceActor::<Table>::new(32, store.clone(), TABLES);
//! let (order_actor, order_client) = ResourceActor::<Order>::new(32, store.clone(), ORDERS);
//!
//! tokio::spawn(table_actor.run(()));
//! // Order hooks occupy and release tables through the injected client
//! tokio::spawn(order_actor.run(TableClient::new(table_client)));
//! ```
//!
//! ## Persistence
//!
//! After every successful mutation the actor writes its whole collection, in insertion
//! order, as one JSON array under its key. Reads never write. A failed write is
//! reported as [`FrameworkError::Storage`]; the in-memory change is kept.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from scripted expectations, and
//! [`MemoryStore`] can be told to reject writes.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod storage;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::{FrameworkError, StorageError};
pub use message::{ResourceRequest, Response};
pub use storage::{load_collection, save_json, FileStore, KeyValueStore, MemoryStore, SharedStore};
