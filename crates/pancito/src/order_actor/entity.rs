//! [`ActorEntity`] implementation for [`Order`].
//!
//! The order owns the rules of its lifecycle; table occupancy is delegated to the
//! table actor through the injected [`TableClient`].

use super::actions::OrderAction;
use crate::clients::TableClient;
use crate::model::{order_total, validate_items, Order, OrderCreate, OrderId, OrderUpdate};
use crate::order_actor::OrderError;
use crate::table_actor::TableError;
use async_trait::async_trait;
use resource_actor::ActorEntity;
use tracing::{debug, info, warn};

/// Detaches `order` from its table. A table that no longer exists (dropped by a
/// restore) has nothing to free, so the order goes ahead without it.
async fn release_table(order: &Order, tables: &TableClient, reason: &str) -> Result<(), OrderError> {
    let Some(table) = order.table_id else {
        return Ok(());
    };
    match tables.release(table, order.id).await {
        Ok(status) => {
            info!(order = %order.id, %table, %status, reason, "Table released");
            Ok(())
        }
        Err(TableError::NotFound(_)) => {
            warn!(order = %order.id, %table, reason, "Order table no longer exists, nothing to release");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = TableClient;
    type Error = OrderError;

    fn id(&self) -> OrderId {
        self.id
    }

    /// Builds an active, unpaid order. The total is always computed from the items.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        validate_items(&params.items).map_err(OrderError::ValidationError)?;
        Ok(Self {
            id,
            table_id: params.table_id,
            customer_name: params.customer_name.filter(|name| !name.trim().is_empty()),
            total: order_total(&params.items),
            items: params.items,
            created_at: params.created_at,
            completed: false,
            paid: None,
        })
    }

    /// Seats the order at its table. An unknown table rejects the order.
    async fn on_create(&mut self, tables: &TableClient) -> Result<(), OrderError> {
        if let Some(table) = self.table_id {
            let status = tables.occupy(table, self.id).await?;
            info!(order = %self.id, %table, %status, "Table occupied");
        }
        Ok(())
    }

    /// Replaces the content of the order. Table assignment and lifecycle flags are
    /// left alone.
    async fn on_update(&mut self, update: OrderUpdate, _tables: &TableClient) -> Result<(), OrderError> {
        if let Some(items) = update.items {
            validate_items(&items).map_err(OrderError::ValidationError)?;
            self.total = order_total(&items);
            self.items = items;
        }
        if let Some(customer_name) = update.customer_name {
            self.customer_name = customer_name.filter(|name| !name.trim().is_empty());
        }
        debug!(order = %self.id, total = self.total, "Order edited");
        Ok(())
    }

    /// Cancellation. Only active orders can be cancelled; the table is released first.
    async fn on_delete(&self, tables: &TableClient) -> Result<(), OrderError> {
        if self.completed {
            return Err(OrderError::InvalidTransition(format!(
                "{} is completed and cannot be cancelled",
                self.id
            )));
        }
        release_table(self, tables, "cancel").await
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        tables: &TableClient,
    ) -> Result<Order, OrderError> {
        match action {
            OrderAction::Complete => {
                if self.completed {
                    return Err(OrderError::InvalidTransition(format!(
                        "{} is already completed",
                        self.id
                    )));
                }
                release_table(self, tables, "completion").await?;
                self.completed = true;
            }
            OrderAction::SetPaid(paid) => {
                self.paid = Some(paid);
            }
        }
        Ok(self.clone())
    }
}
