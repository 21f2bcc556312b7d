use chrono::{DateTime, Duration, TimeZone, Utc};
use pancito::backup::BackupError;
use pancito::config::{keys, LedgerConfig};
use pancito::customer_actor::CustomerError;
use pancito::dish_actor::DishError;
use pancito::lifecycle::{Ledger, LedgerError};
use pancito::model::{
    Dish, DishCategory, DishCreate, NewOrder, OrderItem, OrderUpdate, TableId, TableStatus,
};
use pancito::order_actor::OrderError;
use pancito::stats::StatsPeriod;
use resource_actor::{FileStore, MemoryStore};
use std::sync::Arc;

async fn open(store: &MemoryStore) -> Ledger {
    Ledger::open(Arc::new(store.clone()), &LedgerConfig::default())
        .await
        .expect("Failed to open ledger")
}

async fn add_dish(ledger: &Ledger, name: &str, price: f64, category: DishCategory) -> Dish {
    let id = ledger
        .add_dish(DishCreate {
            name: name.to_string(),
            description: String::new(),
            price,
            category,
        })
        .await
        .expect("Failed to add dish");
    ledger
        .dishes()
        .await
        .unwrap()
        .into_iter()
        .find(|d| d.id == id)
        .expect("Dish not found")
}

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 15, 0, 0).unwrap()
}

/// Full flow: an order with a 2500 x2 and a 1500 x1 line totals 6500, occupies its
/// table, and completing it frees the table again.
#[tokio::test]
async fn test_order_completion_frees_its_table() {
    let store = MemoryStore::new();
    let ledger = open(&store).await;

    let tables = ledger.tables().await.unwrap();
    assert_eq!(tables.len(), 4);
    assert!(tables.iter().all(|t| t.status == TableStatus::Available));

    let cafe = add_dish(&ledger, "Café con Leche", 2500.0, DishCategory::Desayuno).await;
    let coca = add_dish(&ledger, "Coca Cola", 1500.0, DishCategory::Bebestibles).await;

    let id = ledger
        .add_order(NewOrder::at_table(
            TableId(1),
            vec![OrderItem::new(cafe, 2), OrderItem::new(coca, 1)],
        ))
        .await
        .unwrap();

    let order = ledger.order(id).await.unwrap();
    assert_eq!(order.total, 6500.0);
    assert_eq!(ledger.table(TableId(1)).await.unwrap().status, TableStatus::Occupied);

    let completed = ledger.complete_order(id).await.unwrap();
    assert!(completed.completed);
    assert_eq!(ledger.table(TableId(1)).await.unwrap().status, TableStatus::Available);

    // Persisted as camelCase JSON under the orders key
    let raw = store.raw(keys::ORDERS).unwrap();
    assert!(raw.contains("\"tableId\":1"));
    assert!(raw.contains("\"completed\":true"));

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_table_stays_occupied_until_last_order_leaves() {
    let ledger = open(&MemoryStore::new()).await;
    let pan = add_dish(&ledger, "Pan", 1000.0, DishCategory::Otros).await;

    let first = ledger
        .add_order(NewOrder::at_table(TableId(2), vec![OrderItem::new(pan.clone(), 1)]))
        .await
        .unwrap();
    let second = ledger
        .add_order(NewOrder::at_table(TableId(2), vec![OrderItem::new(pan, 1)]))
        .await
        .unwrap();

    ledger.cancel_order(first).await.unwrap();
    assert_eq!(ledger.table(TableId(2)).await.unwrap().status, TableStatus::Occupied);
    assert!(matches!(
        ledger.order(first).await,
        Err(LedgerError::Order(OrderError::NotFound(_)))
    ));

    ledger.cancel_order(second).await.unwrap();
    assert_eq!(ledger.table(TableId(2)).await.unwrap().status, TableStatus::Available);

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_edits_and_payment_do_not_touch_tables() {
    let ledger = open(&MemoryStore::new()).await;
    let cazuela = add_dish(&ledger, "Cazuela", 6500.0, DishCategory::Almuerzo).await;
    let jugo = add_dish(&ledger, "Jugo", 2000.0, DishCategory::Bebestibles).await;

    let id = ledger
        .add_order(NewOrder::at_table(TableId(3), vec![OrderItem::new(cazuela.clone(), 1)]))
        .await
        .unwrap();

    let edited = ledger
        .update_order(
            id,
            OrderUpdate {
                items: Some(vec![OrderItem::new(cazuela, 1), OrderItem::new(jugo, 2)]),
                customer_name: Some(Some("Ana".to_string())),
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.total, 10500.0);
    assert_eq!(edited.table_id, Some(TableId(3)));

    let empty = ledger
        .update_order(
            id,
            OrderUpdate {
                items: Some(vec![]),
                customer_name: None,
            },
        )
        .await;
    assert!(matches!(empty, Err(LedgerError::Order(OrderError::ValidationError(_)))));
    assert_eq!(ledger.order(id).await.unwrap().total, 10500.0);

    let paid = ledger.update_order_payment_status(id, true).await.unwrap();
    assert_eq!(paid.paid, Some(true));
    assert!(!paid.completed);
    assert_eq!(ledger.table(TableId(3)).await.unwrap().status, TableStatus::Occupied);

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reserved_table_and_unknown_table() {
    let ledger = open(&MemoryStore::new()).await;
    let pan = add_dish(&ledger, "Pan", 1000.0, DishCategory::Otros).await;

    let reserved = ledger
        .update_table_status(TableId(4), TableStatus::Reserved)
        .await
        .unwrap();
    assert_eq!(reserved.status, TableStatus::Reserved);

    let id = ledger
        .add_order(NewOrder::at_table(TableId(4), vec![OrderItem::new(pan.clone(), 1)]))
        .await
        .unwrap();
    assert_eq!(ledger.table(TableId(4)).await.unwrap().status, TableStatus::Occupied);
    ledger.complete_order(id).await.unwrap();
    assert_eq!(ledger.table(TableId(4)).await.unwrap().status, TableStatus::Available);

    let unknown = ledger
        .add_order(NewOrder::at_table(TableId(42), vec![OrderItem::new(pan, 1)]))
        .await;
    assert!(matches!(unknown, Err(LedgerError::Order(OrderError::UnknownTable(_)))));
    assert_eq!(ledger.orders().await.unwrap().len(), 1);

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_orders_by_table_and_customer() {
    let ledger = open(&MemoryStore::new()).await;
    let pan = add_dish(&ledger, "Pan", 1000.0, DishCategory::Otros).await;
    let items = || vec![OrderItem::new(pan.clone(), 1)];

    let at_one = ledger.add_order(NewOrder::at_table(TableId(1), items())).await.unwrap();
    let free = ledger
        .add_order(NewOrder::free_zone(items()).for_customer("Ana"))
        .await
        .unwrap();
    let done = ledger
        .add_order(NewOrder::free_zone(items()).for_customer("ana"))
        .await
        .unwrap();
    ledger.complete_order(done).await.unwrap();

    let ids = |orders: Vec<pancito::model::Order>| orders.into_iter().map(|o| o.id).collect::<Vec<_>>();
    assert_eq!(ids(ledger.orders_by_table(Some(TableId(1))).await.unwrap()), vec![at_one]);
    assert_eq!(ids(ledger.orders_by_table(None).await.unwrap()), vec![free]);
    assert_eq!(ids(ledger.orders_by_customer("ANA").await.unwrap()), vec![free]);

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_frequent_customers_and_accounts() {
    let ledger = open(&MemoryStore::new()).await;
    let menu = add_dish(&ledger, "Menú del día", 4500.0, DishCategory::Almuerzo).await;

    let ana = ledger.add_frequent_customer("Ana", "Ferretería").await.unwrap();
    let duplicate = ledger.add_frequent_customer(" ana ", "Botillería").await;
    assert!(matches!(
        duplicate,
        Err(LedgerError::Customer(CustomerError::AlreadyExists(_)))
    ));

    let moved = ledger.update_frequent_customer(ana, "Farmacia").await.unwrap();
    assert_eq!(moved.local, "Farmacia");

    let first = ledger
        .add_order(NewOrder::free_zone(vec![OrderItem::new(menu.clone(), 1)]).for_customer("Ana"))
        .await
        .unwrap();
    ledger
        .add_order(NewOrder::free_zone(vec![OrderItem::new(menu, 2)]).for_customer("Ana"))
        .await
        .unwrap();
    ledger.complete_order(first).await.unwrap();
    ledger.update_order_payment_status(first, true).await.unwrap();

    let account = ledger.customer_account("ANA").await.unwrap();
    assert_eq!(account.name, "Ana");
    assert_eq!(account.order_count, 2);
    assert_eq!(account.pending_orders.len(), 1);
    assert_eq!(account.amount_owed, 9000.0);
    assert_eq!(account.lifetime_total, 13500.0);

    assert!(matches!(
        ledger.customer_account("Pedro").await,
        Err(LedgerError::Customer(CustomerError::NotFound(_)))
    ));

    ledger.delete_frequent_customer(ana).await.unwrap();
    assert!(ledger.frequent_customers().await.unwrap().is_empty());

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_period_statistics_through_the_ledger() {
    let ledger = open(&MemoryStore::new()).await;
    let cafe = add_dish(&ledger, "Café", 2500.0, DishCategory::Desayuno).await;
    let pan = add_dish(&ledger, "Pan", 1000.0, DishCategory::Desayuno).await;

    let today = ledger
        .add_order_at(
            NewOrder::free_zone(vec![OrderItem::new(cafe.clone(), 1), OrderItem::new(pan.clone(), 3)]),
            noon() - Duration::hours(1),
        )
        .await
        .unwrap();
    let last_week = ledger
        .add_order_at(NewOrder::free_zone(vec![OrderItem::new(cafe, 4)]), noon() - Duration::days(3))
        .await
        .unwrap();
    // Active orders never count
    ledger
        .add_order_at(NewOrder::free_zone(vec![OrderItem::new(pan, 9)]), noon())
        .await
        .unwrap();
    ledger.complete_order(today).await.unwrap();
    ledger.complete_order(last_week).await.unwrap();

    let day = ledger.stats_at(StatsPeriod::Today, noon()).await.unwrap();
    assert_eq!(day.label, "Viernes, 16 de octubre de 2026");
    assert_eq!((day.orders_count, day.total_sales), (1, 5500.0));
    assert_eq!(day.top_dishes[0].dish.name, "Pan");

    let week = ledger.stats_at(StatsPeriod::Week, noon()).await.unwrap();
    assert_eq!((week.orders_count, week.total_sales), (2, 15500.0));
    assert_eq!(week.top_dishes[0].dish.name, "Café");
    assert_eq!(week.top_dishes[0].quantity, 5);

    ledger.shutdown().await.unwrap();
}

/// Reopening on the same store restores every collection and the table occupancy
/// derived from the active orders.
#[tokio::test]
async fn test_state_survives_reopen() {
    let store = MemoryStore::new();
    let ledger = open(&store).await;
    let pan = add_dish(&ledger, "Pan", 1000.0, DishCategory::Otros).await;
    let first = ledger
        .add_order(NewOrder::at_table(TableId(1), vec![OrderItem::new(pan.clone(), 1)]))
        .await
        .unwrap();
    ledger.add_frequent_customer("Ana", "Kiosco").await.unwrap();
    ledger.shutdown().await.unwrap();

    let ledger = open(&store).await;
    assert_eq!(ledger.tables().await.unwrap().len(), 4);
    let table = ledger.table(TableId(1)).await.unwrap();
    assert_eq!(table.status, TableStatus::Occupied);
    assert_eq!(table.active_orders().collect::<Vec<_>>(), vec![first]);
    assert_eq!(ledger.frequent_customers().await.unwrap().len(), 1);

    // Ids continue after the stored ones
    let second = ledger
        .add_order(NewOrder::at_table(TableId(1), vec![OrderItem::new(pan, 1)]))
        .await
        .unwrap();
    assert_eq!(second.0, first.0 + 1);

    ledger.complete_order(first).await.unwrap();
    assert_eq!(ledger.table(TableId(1)).await.unwrap().status, TableStatus::Occupied);
    ledger.complete_order(second).await.unwrap();
    assert_eq!(ledger.table(TableId(1)).await.unwrap().status, TableStatus::Available);

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_backup_round_trip_into_an_empty_ledger() {
    let source = open(&MemoryStore::new()).await;
    assert_eq!(source.seed_sample_menu().await.unwrap(), 12);
    assert_eq!(source.seed_sample_menu().await.unwrap(), 0);

    let dishes = source.dishes().await.unwrap();
    let done = source
        .add_order(NewOrder::at_table(TableId(2), vec![OrderItem::new(dishes[3].clone(), 2)]))
        .await
        .unwrap();
    source.complete_order(done).await.unwrap();
    source
        .add_order(NewOrder::at_table(TableId(3), vec![OrderItem::new(dishes[0].clone(), 1)]))
        .await
        .unwrap();
    source.add_frequent_customer("Ana", "Ferretería").await.unwrap();

    let backup = source.export_backup().await.unwrap();
    let text = format!("Respaldo de Datos\n{}\n", backup.to_json().unwrap());

    let target_store = MemoryStore::new();
    let target = open(&target_store).await;
    let imported = target.import_backup(&text).await.unwrap();
    assert_eq!(imported.statistics.total_orders, 2);

    assert_eq!(target.dishes().await.unwrap(), source.dishes().await.unwrap());
    assert_eq!(target.orders().await.unwrap(), source.orders().await.unwrap());
    assert_eq!(target.tables().await.unwrap(), source.tables().await.unwrap());
    assert_eq!(
        target.frequent_customers().await.unwrap(),
        source.frequent_customers().await.unwrap()
    );
    assert!(target_store.raw(keys::STATISTICS).unwrap().contains("\"totalOrders\":2"));

    // The restored active order still holds its table
    let table = target.table(TableId(3)).await.unwrap();
    assert_eq!(table.status, TableStatus::Occupied);
    assert!(table.is_occupied());

    source.shutdown().await.unwrap();
    target.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_bad_import_leaves_state_untouched() {
    let ledger = open(&MemoryStore::new()).await;
    add_dish(&ledger, "Pan", 1000.0, DishCategory::Otros).await;

    let truncated = ledger.import_backup("{\"dishes\": [").await;
    assert!(matches!(truncated, Err(LedgerError::Backup(BackupError::IncompleteJson))));

    let missing = ledger
        .import_backup(r#"{"dishes": [], "orders": [], "tables": [], "statistics": {}}"#)
        .await;
    assert!(matches!(
        missing,
        Err(LedgerError::Backup(BackupError::MissingField("frequentCustomers")))
    ));

    assert_eq!(ledger.dishes().await.unwrap().len(), 1);
    ledger.shutdown().await.unwrap();
}

/// A restore can drop a table that still has active orders. Those orders can still
/// be completed or cancelled; there is just no table to free.
#[tokio::test]
async fn test_orders_at_a_removed_table_can_still_finish() {
    let source = open(&MemoryStore::new()).await;
    let pan = add_dish(&source, "Pan Amasado", 1200.0, DishCategory::Otros).await;
    let first = source
        .add_order(NewOrder::at_table(TableId(4), vec![OrderItem::new(pan.clone(), 1)]))
        .await
        .unwrap();
    let second = source
        .add_order(NewOrder::at_table(TableId(4), vec![OrderItem::new(pan, 2)]))
        .await
        .unwrap();

    let mut backup = source.export_backup().await.unwrap();
    backup.tables.retain(|t| t.id != TableId(4));

    let target = open(&MemoryStore::new()).await;
    target.import_backup(&backup.to_json().unwrap()).await.unwrap();
    assert_eq!(target.tables().await.unwrap().len(), 3);

    assert!(target.complete_order(first).await.unwrap().completed);
    target.cancel_order(second).await.unwrap();
    assert!(target.order(second).await.is_err());
    assert!(target.orders().await.unwrap().iter().all(|o| !o.is_active()));

    source.shutdown().await.unwrap();
    target.shutdown().await.unwrap();
}

/// Imported orders follow the same total rule as orders placed through the ledger,
/// and a backup with clashing customer names is refused as a whole.
#[tokio::test]
async fn test_import_enforces_ledger_rules() {
    let source = open(&MemoryStore::new()).await;
    let cafe = add_dish(&source, "Café con Leche", 2500.0, DishCategory::Desayuno).await;
    let id = source
        .add_order(NewOrder::free_zone(vec![OrderItem::new(cafe, 2)]))
        .await
        .unwrap();
    source.add_frequent_customer("Ana", "Ferretería").await.unwrap();

    let mut value = serde_json::to_value(source.export_backup().await.unwrap()).unwrap();
    value["orders"][0]["total"] = serde_json::json!(1);

    let target = open(&MemoryStore::new()).await;
    target.import_backup(&value.to_string()).await.unwrap();
    assert_eq!(target.order(id).await.unwrap().total, 5000.0);

    let mut duplicate = value["frequentCustomers"][0].clone();
    duplicate["id"] = serde_json::json!(2);
    duplicate["name"] = serde_json::json!("ANA ");
    value["frequentCustomers"].as_array_mut().unwrap().push(duplicate);
    value["orders"][0]["total"] = serde_json::json!(5000);
    value["dishes"] = serde_json::json!([]);

    let result = target.import_backup(&value.to_string()).await;
    assert!(matches!(
        result,
        Err(LedgerError::Backup(BackupError::DuplicateCustomer(name))) if name == "ANA"
    ));
    assert_eq!(target.frequent_customers().await.unwrap().len(), 1);
    assert_eq!(target.dishes().await.unwrap().len(), 1);

    source.shutdown().await.unwrap();
    target.shutdown().await.unwrap();
}

/// A failed write is reported, and the change stays in memory.
#[tokio::test]
async fn test_storage_failure_is_surfaced() {
    let store = MemoryStore::new();
    let ledger = open(&store).await;

    store.fail_writes(true);
    let result = ledger
        .add_dish(DishCreate {
            name: "Sopaipillas".to_string(),
            description: String::new(),
            price: 2000.0,
            category: DishCategory::Otros,
        })
        .await;
    assert!(matches!(result, Err(LedgerError::Dish(DishError::StorageError(_)))));
    assert_eq!(ledger.dishes().await.unwrap().len(), 1);
    assert!(store.raw(keys::DISHES).is_none());

    store.fail_writes(false);
    ledger.reload().await.unwrap();
    assert!(ledger.dishes().await.unwrap().is_empty());

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_ledger_on_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = LedgerConfig {
        data_dir: dir.path().to_path_buf(),
        table_count: 2,
        ..LedgerConfig::default()
    };

    let ledger = Ledger::open(Arc::new(FileStore::open(dir.path()).await.unwrap()), &config)
        .await
        .unwrap();
    ledger.seed_sample_menu().await.unwrap();
    ledger.shutdown().await.unwrap();

    assert!(dir.path().join("pancito_dishes.json").exists());
    assert!(dir.path().join("pancito_tables.json").exists());

    let ledger = Ledger::open(Arc::new(FileStore::open(dir.path()).await.unwrap()), &config)
        .await
        .unwrap();
    assert_eq!(ledger.tables().await.unwrap().len(), 2);
    assert_eq!(
        ledger.dishes_by_category(DishCategory::Bebestibles).await.unwrap().len(),
        3
    );
    ledger.shutdown().await.unwrap();
}
