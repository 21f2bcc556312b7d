use crate::backup::{self, Backup, BackupError};
use crate::clients::{CustomerClient, DishClient, OrderClient, TableClient};
use crate::config::{keys, LedgerConfig};
use crate::customer_actor::CustomerError;
use crate::dish_actor::DishError;
use crate::model::{
    CustomerCreate, CustomerId, Dish, DishCategory, DishCreate, DishId, DishUpdate,
    FrequentCustomer, NewOrder, Order, OrderId, OrderUpdate, Table, TableCreate, TableId,
    TableStatus,
};
use crate::order_actor::OrderError;
use crate::sample_menu::sample_menu;
use crate::stats::{customer_account, period_stats, CustomerAccount, PeriodStats, StatsPeriod};
use crate::table_actor::TableError;
use crate::{customer_actor, dish_actor, order_actor, table_actor};
use chrono::{DateTime, FixedOffset, Utc};
use resource_actor::{load_collection, save_json, ActorClient, SharedStore, StorageError};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// Errors surfaced by [`Ledger`] operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Dish(#[from] DishError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Customer(#[from] CustomerError),
    #[error(transparent)]
    Backup(#[from] BackupError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Backup serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Actor task failed: {0}")]
    Shutdown(String),
}

/// The four collections as read from storage.
struct Collections {
    dishes: Vec<Dish>,
    orders: Vec<Order>,
    tables: Vec<Table>,
    customers: Vec<FrequentCustomer>,
}

impl Collections {
    async fn load(storage: &SharedStore) -> Result<Self, StorageError> {
        let store = storage.as_ref();
        let mut collections = Self {
            dishes: load_collection(store, keys::DISHES).await?,
            orders: load_collection(store, keys::ORDERS).await?,
            tables: load_collection(store, keys::TABLES).await?,
            customers: load_collection(store, keys::CUSTOMERS).await?,
        };
        attach_active_orders(&mut collections.tables, &collections.orders);
        Ok(collections)
    }
}

/// Attaches every active, seated order to its table. Orders pointing at a table
/// that does not exist are left unattached.
pub fn attach_active_orders(tables: &mut [Table], orders: &[Order]) {
    for order in orders.iter().filter(|o| o.is_active()) {
        let Some(table_id) = order.table_id else {
            continue;
        };
        match tables.iter_mut().find(|t| t.id == table_id) {
            Some(table) => table.attach(order.id),
            None => warn!(order = %order.id, table = %table_id, "Active order refers to a missing table"),
        }
    }
}

/// The restaurant ledger: menu, orders, tables and frequent customers, each owned by
/// its own actor and persisted to a shared store.
///
/// # Example
///
/// ```rust
/// use pancito::config::LedgerConfig;
/// use pancito::lifecycle::Ledger;
/// use pancito::model::{NewOrder, OrderItem, TableId, TableStatus};
/// use resource_actor::MemoryStore;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let ledger = Ledger::open(Arc::new(MemoryStore::new()), &LedgerConfig::default()).await?;
///     ledger.seed_sample_menu().await?;
///
///     let cafe = ledger.dishes().await?.remove(0);
///     let id = ledger
///         .add_order(NewOrder::at_table(TableId(1), vec![OrderItem::new(cafe, 2)]))
///         .await?;
///     assert_eq!(ledger.table(TableId(1)).await?.status, TableStatus::Occupied);
///
///     ledger.complete_order(id).await?;
///     assert_eq!(ledger.table(TableId(1)).await?.status, TableStatus::Available);
///
///     ledger.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct Ledger {
    pub dish_client: DishClient,
    pub table_client: TableClient,
    pub order_client: OrderClient,
    pub customer_client: CustomerClient,
    storage: SharedStore,
    table_count: u32,
    offset: FixedOffset,
    handles: Vec<JoinHandle<()>>,
}

impl Ledger {
    /// Loads the persisted collections, starts the actors and creates the default
    /// tables when none are stored.
    #[instrument(skip_all, fields(table_count = config.table_count))]
    pub async fn open(storage: SharedStore, config: &LedgerConfig) -> Result<Self, LedgerError> {
        let collections = Collections::load(&storage).await?;
        info!(
            dishes = collections.dishes.len(),
            orders = collections.orders.len(),
            tables = collections.tables.len(),
            customers = collections.customers.len(),
            "Loaded ledger"
        );
        let has_tables = !collections.tables.is_empty();

        // 1. Create actors, preloaded with their collections
        let (dish_actor, dish_client) = dish_actor::new(storage.clone(), config.channel_size);
        let (table_actor, table_client) = table_actor::new(storage.clone(), config.channel_size);
        let (order_actor, order_client) = order_actor::new(storage.clone(), config.channel_size);
        let (customer_actor, customer_client) =
            customer_actor::new(storage.clone(), config.channel_size);

        // 2. Start actors with injected context
        let handles = vec![
            tokio::spawn(dish_actor.with_items(collections.dishes).run(())),
            tokio::spawn(table_actor.with_items(collections.tables).run(())),
            tokio::spawn(order_actor.with_items(collections.orders).run(table_client.clone())),
            tokio::spawn(customer_actor.with_items(collections.customers).run(())),
        ];

        let ledger = Self {
            dish_client,
            table_client,
            order_client,
            customer_client,
            storage,
            table_count: config.table_count,
            offset: config.offset(),
            handles,
        };
        if !has_tables {
            ledger.create_default_tables().await?;
        }
        Ok(ledger)
    }

    async fn create_default_tables(&self) -> Result<(), LedgerError> {
        for _ in 0..self.table_count {
            self.table_client
                .create_table(TableCreate {
                    status: TableStatus::Available,
                })
                .await?;
        }
        info!(count = self.table_count, "Created default tables");
        Ok(())
    }

    /// Swaps every collection for `collections`.
    async fn restore(&self, collections: Collections) -> Result<(), LedgerError> {
        let has_tables = !collections.tables.is_empty();
        self.dish_client.replace_all(collections.dishes).await?;
        self.table_client.replace_all(collections.tables).await?;
        self.order_client.replace_all(collections.orders).await?;
        self.customer_client.replace_all(collections.customers).await?;
        if !has_tables {
            self.create_default_tables().await?;
        }
        Ok(())
    }

    /// Re-reads every collection from storage, discarding in-memory state.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<(), LedgerError> {
        let collections = Collections::load(&self.storage).await?;
        self.restore(collections).await?;
        info!("Reloaded ledger from storage");
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Places an order now. A seated order occupies its table.
    pub async fn add_order(&self, order: NewOrder) -> Result<OrderId, LedgerError> {
        self.add_order_at(order, Utc::now()).await
    }

    /// Places an order with an explicit creation time.
    #[instrument(skip(self, order), fields(table = ?order.table_id))]
    pub async fn add_order_at(
        &self,
        order: NewOrder,
        created_at: DateTime<Utc>,
    ) -> Result<OrderId, LedgerError> {
        let id = self.order_client.create_order(order.placed_at(created_at)).await?;
        info!(order = %id, "Order placed");
        Ok(id)
    }

    /// Marks an order completed, freeing its table when it was the last active one.
    pub async fn complete_order(&self, id: OrderId) -> Result<Order, LedgerError> {
        Ok(self.order_client.complete_order(id).await?)
    }

    /// Removes an active order, freeing its table when it was the last active one.
    pub async fn cancel_order(&self, id: OrderId) -> Result<(), LedgerError> {
        Ok(self.order_client.cancel_order(id).await?)
    }

    /// Edits items and/or customer name. Tables are not touched.
    pub async fn update_order(&self, id: OrderId, update: OrderUpdate) -> Result<Order, LedgerError> {
        Ok(self.order_client.update_order(id, update).await?)
    }

    pub async fn update_order_payment_status(
        &self,
        id: OrderId,
        paid: bool,
    ) -> Result<Order, LedgerError> {
        Ok(self.order_client.set_paid(id, paid).await?)
    }

    pub async fn order(&self, id: OrderId) -> Result<Order, LedgerError> {
        self.order_client
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()).into())
    }

    pub async fn orders(&self) -> Result<Vec<Order>, LedgerError> {
        Ok(self.order_client.list().await?)
    }

    /// Active orders at `table`; `None` is the free zone.
    pub async fn orders_by_table(&self, table: Option<TableId>) -> Result<Vec<Order>, LedgerError> {
        let orders = self.orders().await?;
        Ok(orders
            .into_iter()
            .filter(|o| o.is_active() && o.table_id == table)
            .collect())
    }

    /// Active orders placed under `name`.
    pub async fn orders_by_customer(&self, name: &str) -> Result<Vec<Order>, LedgerError> {
        let orders = self.orders().await?;
        Ok(orders
            .into_iter()
            .filter(|o| o.is_active() && o.is_for_customer(name))
            .collect())
    }

    // =========================================================================
    // Tables
    // =========================================================================

    pub async fn tables(&self) -> Result<Vec<Table>, LedgerError> {
        Ok(self.table_client.list().await?)
    }

    pub async fn table(&self, id: TableId) -> Result<Table, LedgerError> {
        self.table_client
            .get(id)
            .await?
            .ok_or_else(|| TableError::NotFound(id.to_string()).into())
    }

    /// Manual status override, e.g. marking a table as reserved.
    pub async fn update_table_status(
        &self,
        id: TableId,
        status: TableStatus,
    ) -> Result<Table, LedgerError> {
        Ok(self.table_client.set_status(id, status).await?)
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    pub async fn stats(&self, period: StatsPeriod) -> Result<PeriodStats, LedgerError> {
        self.stats_at(period, Utc::now()).await
    }

    /// Statistics of `period` as seen at `now`.
    pub async fn stats_at(
        &self,
        period: StatsPeriod,
        now: DateTime<Utc>,
    ) -> Result<PeriodStats, LedgerError> {
        let orders = self.orders().await?;
        Ok(period_stats(&orders, period, now, self.offset))
    }

    pub async fn today_stats(&self) -> Result<PeriodStats, LedgerError> {
        self.stats(StatsPeriod::Today).await
    }

    pub async fn weekly_stats(&self) -> Result<PeriodStats, LedgerError> {
        self.stats(StatsPeriod::Week).await
    }

    pub async fn monthly_stats(&self) -> Result<PeriodStats, LedgerError> {
        self.stats(StatsPeriod::Month).await
    }

    pub async fn annual_stats(&self) -> Result<PeriodStats, LedgerError> {
        self.stats(StatsPeriod::Year).await
    }

    // =========================================================================
    // Menu
    // =========================================================================

    pub async fn add_dish(&self, dish: DishCreate) -> Result<DishId, LedgerError> {
        Ok(self.dish_client.add_dish(dish).await?)
    }

    /// Edits a menu entry. Orders already placed keep the old data.
    pub async fn update_dish(&self, id: DishId, update: DishUpdate) -> Result<Dish, LedgerError> {
        Ok(self.dish_client.update_dish(id, update).await?)
    }

    pub async fn delete_dish(&self, id: DishId) -> Result<(), LedgerError> {
        Ok(self.dish_client.delete(id).await?)
    }

    pub async fn dishes(&self) -> Result<Vec<Dish>, LedgerError> {
        Ok(self.dish_client.list().await?)
    }

    pub async fn dishes_by_category(&self, category: DishCategory) -> Result<Vec<Dish>, LedgerError> {
        let dishes = self.dishes().await?;
        Ok(dishes.into_iter().filter(|d| d.category == category).collect())
    }

    /// Adds the house menu when the menu is empty. Returns how many dishes were added.
    #[instrument(skip(self))]
    pub async fn seed_sample_menu(&self) -> Result<usize, LedgerError> {
        if !self.dishes().await?.is_empty() {
            info!("Menu already has dishes, not seeding");
            return Ok(0);
        }
        let menu = sample_menu();
        let count = menu.len();
        for dish in menu {
            self.dish_client.add_dish(dish).await?;
        }
        info!(count, "Seeded sample menu");
        Ok(count)
    }

    // =========================================================================
    // Frequent customers
    // =========================================================================

    pub async fn add_frequent_customer(
        &self,
        name: &str,
        local: &str,
    ) -> Result<CustomerId, LedgerError> {
        let params = CustomerCreate {
            name: name.to_string(),
            local: local.to_string(),
            created_at: Utc::now(),
        };
        Ok(self.customer_client.add_customer(params).await?)
    }

    pub async fn update_frequent_customer(
        &self,
        id: CustomerId,
        local: &str,
    ) -> Result<FrequentCustomer, LedgerError> {
        Ok(self.customer_client.update_local(id, local.to_string()).await?)
    }

    pub async fn delete_frequent_customer(&self, id: CustomerId) -> Result<(), LedgerError> {
        Ok(self.customer_client.delete(id).await?)
    }

    pub async fn frequent_customers(&self) -> Result<Vec<FrequentCustomer>, LedgerError> {
        Ok(self.customer_client.list().await?)
    }

    /// Balance of the customer registered as `name`: pending orders and what is owed.
    pub async fn customer_account(&self, name: &str) -> Result<CustomerAccount, LedgerError> {
        let known = self
            .frequent_customers()
            .await?
            .into_iter()
            .find(|c| c.matches_name(name))
            .ok_or_else(|| CustomerError::NotFound(name.trim().to_string()))?;
        let orders = self.orders().await?;
        Ok(customer_account(&known.name, &orders))
    }

    // =========================================================================
    // Backup
    // =========================================================================

    pub async fn export_backup(&self) -> Result<Backup, LedgerError> {
        self.export_backup_at(Utc::now()).await
    }

    /// Snapshot of every collection plus statistics, dated `now`.
    #[instrument(skip(self))]
    pub async fn export_backup_at(&self, now: DateTime<Utc>) -> Result<Backup, LedgerError> {
        let backup = Backup::new(
            self.dishes().await?,
            self.orders().await?,
            self.tables().await?,
            self.frequent_customers().await?,
            now,
        );
        info!(file = %backup.file_name(), orders = backup.orders.len(), "Backup exported");
        Ok(backup)
    }

    /// Replaces every collection with the content of a pasted backup and stores its
    /// statistics. Nothing is changed when the text does not parse.
    #[instrument(skip_all, fields(len = text.len()))]
    pub async fn import_backup(&self, text: &str) -> Result<Backup, LedgerError> {
        let backup = backup::parse(text)?;
        let mut tables = backup.tables.clone();
        attach_active_orders(&mut tables, &backup.orders);

        self.restore(Collections {
            dishes: backup.dishes.clone(),
            orders: backup.orders.clone(),
            tables,
            customers: backup.frequent_customers.clone(),
        })
        .await?;
        save_json(self.storage.as_ref(), keys::STATISTICS, &backup.statistics).await?;

        info!(
            dishes = backup.dishes.len(),
            orders = backup.orders.len(),
            "Backup imported"
        );
        Ok(backup)
    }

    /// Stops every actor and waits for them to finish.
    pub async fn shutdown(self) -> Result<(), LedgerError> {
        info!("Shutting down ledger...");

        // Dropping the clients closes the channels; each actor leaves its loop
        drop(self.dish_client);
        drop(self.order_client);
        drop(self.table_client);
        drop(self.customer_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(LedgerError::Shutdown(e.to_string()));
            }
        }

        info!("Ledger shutdown complete.");
        Ok(())
    }
}
