//! Data structures persisted by the ledger.
//!
//! Every type here serializes to the same JSON shape the restaurant's storage and
//! backups use: camelCase field names and Spanish enum labels.

pub mod customer;
pub mod dish;
pub mod id;
pub mod order;
pub mod table;

pub use customer::*;
pub use dish::*;
pub use id::*;
pub use order::*;
pub use table::*;
