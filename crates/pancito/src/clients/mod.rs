//! Domain clients: typed wrappers around each actor's `ResourceClient`.
//!
//! Each client implements [`ActorClient`](resource_actor::ActorClient) for the shared
//! `get`/`list`/`delete`/`replace_all` calls and adds the domain operations of its
//! actor. Framework errors are translated into the actor's own error enum; an error
//! raised by an entity hook comes back as that same enum.

pub mod customer_client;
pub mod dish_client;
pub mod order_client;
pub mod table_client;

pub use customer_client::CustomerClient;
pub use dish_client::DishClient;
pub use order_client::OrderClient;
pub use table_client::TableClient;

/// Recovers the actor's own error from a boxed entity error.
pub(crate) fn entity_error<E>(e: Box<dyn std::error::Error + Send + Sync>) -> E
where
    E: std::error::Error + From<String> + 'static,
{
    match e.downcast::<E>() {
        Ok(e) => *e,
        Err(other) => E::from(other.to_string()),
    }
}
