//! A physical table in the dining room.
//!
//! # Actor Framework
//! Managed by [`table_actor`](crate::table_actor). Occupancy is driven by orders: the
//! order actor attaches each active order to its table (`Occupy`) and detaches it on
//! completion or cancellation (`Release`). Only `id` and `status` are persisted; the
//! attached order ids are rebuilt from the orders collection on load.

use crate::model::{OrderId, TableId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableStatus {
    #[serde(rename = "Disponible")]
    Available,
    #[serde(rename = "Ocupada")]
    Occupied,
    #[serde(rename = "Reservada")]
    Reserved,
}

impl TableStatus {
    pub fn label(self) -> &'static str {
        match self {
            TableStatus::Available => "Disponible",
            TableStatus::Occupied => "Ocupada",
            TableStatus::Reserved => "Reservada",
        }
    }
}

impl Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disponible" | "available" => Ok(TableStatus::Available),
            "ocupada" | "occupied" => Ok(TableStatus::Occupied),
            "reservada" | "reserved" => Ok(TableStatus::Reserved),
            other => Err(format!("unknown table status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub status: TableStatus,
    #[serde(skip)]
    active_orders: BTreeSet<OrderId>,
}

impl Table {
    pub fn new(id: TableId, status: TableStatus) -> Self {
        Self {
            id,
            status,
            active_orders: BTreeSet::new(),
        }
    }

    /// Active orders currently seated at this table.
    pub fn active_orders(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.active_orders.iter().copied()
    }

    pub fn is_occupied(&self) -> bool {
        !self.active_orders.is_empty()
    }

    /// Records an active order without touching the stored status. Used when occupancy
    /// is rebuilt from persisted orders.
    pub fn attach(&mut self, order: OrderId) {
        self.active_orders.insert(order);
    }

    /// Seats an active order. The table becomes occupied whatever its previous status.
    pub fn occupy(&mut self, order: OrderId) {
        self.active_orders.insert(order);
        self.status = TableStatus::Occupied;
    }

    /// Detaches an order. When no active order remains the table is freed, unless it
    /// was manually reserved in the meantime.
    pub fn release(&mut self, order: OrderId) {
        self.active_orders.remove(&order);
        if self.active_orders.is_empty() && self.status != TableStatus::Reserved {
            self.status = TableStatus::Available;
        }
    }
}

/// Payload for adding a table.
#[derive(Debug, Clone)]
pub struct TableCreate {
    pub status: TableStatus,
}

/// Manual status override (e.g. marking a table as reserved).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableUpdate {
    pub status: TableStatus,
}
