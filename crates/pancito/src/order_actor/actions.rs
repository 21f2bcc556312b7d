//! Custom actions for the Order actor. Both return the order as stored afterwards.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Marks an active order as completed and releases its table.
    Complete,
    /// Records whether the order has been paid. Allowed in any state.
    SetPaid(bool),
}
