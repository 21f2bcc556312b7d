//! # Pancito Ledger
//!
//! Order and table ledger of a small restaurant: the menu, the orders, the dining room
//! tables and a registry of frequent customers, kept in a key-value store.
//!
//! - **[model]**: the persisted data ([`Dish`](model::Dish), [`Order`](model::Order),
//!   [`Table`](model::Table), [`FrequentCustomer`](model::FrequentCustomer)).
//! - **Actors**: one per collection ([`dish_actor`], [`table_actor`], [`order_actor`],
//!   [`customer_actor`]), built on [`resource_actor::ResourceActor`].
//! - **[clients]**: typed handles to the actors.
//! - **[lifecycle]**: the [`Ledger`](lifecycle::Ledger) that loads, wires and serves
//!   everything.
//! - **[stats]** and **[backup]**: pure derivations over the collections.

pub mod backup;
pub mod clients;
pub mod config;
pub mod customer_actor;
pub mod dish_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod sample_menu;
pub mod stats;
pub mod table_actor;
