//! Custom actions for the Table actor.

use crate::model::OrderId;

/// Order-driven occupancy changes. Both return the table's resulting status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    /// An active order is now seated at the table.
    Occupy(OrderId),
    /// The order was completed or cancelled and no longer holds the table.
    Release(OrderId),
}
