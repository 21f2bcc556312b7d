//! # Ledger Lifecycle & Orchestration
//!
//! Actors are simple on their own; wiring them together is where the complexity
//! lives. [`Ledger`] is the conductor:
//!
//! 1. **Load** every collection from the [`KeyValueStore`](resource_actor::KeyValueStore)
//!    and rebuild table occupancy from the active orders.
//! 2. **Create** the four actors, preloaded with their collections.
//! 3. **Wire** them: the order actor is started with a `TableClient` as its context.
//! 4. **Serve** the ledger operations on top of the clients.
//! 5. **Shut down** by dropping every client and awaiting the actor tasks.
//!
//! ## Dependency Graph
//!
//! ```text
//! Order ──► Table        Dish        FrequentCustomer
//! ```
//!
//! The graph is acyclic, so dropping the ledger's clients is enough to stop every
//! actor: the order actor's `TableClient` clone goes away when the order actor exits,
//! which then lets the table actor exit too.

pub mod ledger;

pub use ledger::*;
