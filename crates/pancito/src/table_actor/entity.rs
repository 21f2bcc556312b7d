//! [`ActorEntity`] implementation for [`Table`].
//!
//! Occupancy bookkeeping lives on [`Table`] itself ([`Table::occupy`],
//! [`Table::release`]); this module only routes actions to it.

use super::actions::TableAction;
use crate::model::{Table, TableCreate, TableId, TableStatus, TableUpdate};
use crate::table_actor::TableError;
use async_trait::async_trait;
use resource_actor::ActorEntity;
use tracing::debug;

#[async_trait]
impl ActorEntity for Table {
    type Id = TableId;
    type Create = TableCreate;
    type Update = TableUpdate;
    type Action = TableAction;
    type ActionResult = TableStatus;
    type Context = ();
    type Error = TableError;

    fn id(&self) -> TableId {
        self.id
    }

    fn from_create_params(id: TableId, params: TableCreate) -> Result<Self, TableError> {
        Ok(Self::new(id, params.status))
    }

    /// Manual status override. Attached orders are kept, so the next release still
    /// frees the table once the last of them is gone.
    async fn on_update(&mut self, update: TableUpdate, _ctx: &()) -> Result<(), TableError> {
        self.status = update.status;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: TableAction,
        _ctx: &(),
    ) -> Result<TableStatus, TableError> {
        match action {
            TableAction::Occupy(order) => self.occupy(order),
            TableAction::Release(order) => self.release(order),
        }
        debug!(table = %self.id, status = %self.status, active = self.active_orders().count(), "Occupancy changed");
        Ok(self.status)
    }
}
