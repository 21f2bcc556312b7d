//! # Backup & Restore
//!
//! A backup is one JSON document holding the four collections and a statistics
//! summary of the whole order history:
//!
//! ```json
//! {
//!   "exportDate": "2026-10-16T15:00:00Z",
//!   "appVersion": "1.0.0",
//!   "dishes": [...], "orders": [...], "tables": [...], "frequentCustomers": [...],
//!   "statistics": { "totalOrders": 3, "completedOrders": 2, ..., "topDishes": [...] }
//! }
//! ```
//!
//! Backups are usually pasted back from a chat or a note, so [`parse`] first cuts the
//! text down to the span between the first `{` and the last `}`.

use crate::model::{
    order_total, validate_items, Dish, DishCategory, DishId, FrequentCustomer, Order, Table,
};
use crate::stats::{format_price, TOP_DISHES};
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

pub const APP_VERSION: &str = "1.0.0";

/// Top-level fields a backup must carry (non-null) to be restored.
const REQUIRED_FIELDS: [&str; 5] = ["dishes", "orders", "tables", "frequentCustomers", "statistics"];

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackupError {
    #[error("The backup text is empty")]
    EmptyInput,

    /// No `{ ... }` span in the text, usually a truncated copy.
    #[error("The backup JSON is incomplete; make sure the whole content was copied")]
    IncompleteJson,

    #[error("The backup JSON is invalid: {0}")]
    InvalidJson(String),

    #[error("Invalid backup format: missing '{0}'")]
    MissingField(&'static str),

    #[error("Invalid order {0} in backup: {1}")]
    InvalidOrder(String, String),

    /// Two frequent customers share a name (trimmed, case-insensitive).
    #[error("Duplicate frequent customer in backup: {0}")]
    DuplicateCustomer(String),
}

/// A dish in the backup ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupTopDish {
    pub id: DishId,
    pub name: String,
    pub category: DishCategory,
    pub quantity: u32,
    pub revenue: f64,
}

/// Aggregates over every order in the backup, completed or not.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupStatistics {
    pub total_orders: usize,
    pub completed_orders: usize,
    pub pending_orders: usize,
    pub paid_orders: usize,
    pub total_revenue: f64,
    pub average_ticket: f64,
    pub top_dishes: Vec<BackupTopDish>,
}

impl BackupStatistics {
    pub fn from_orders(orders: &[Order]) -> Self {
        let total_orders = orders.len();
        let completed_orders = orders.iter().filter(|o| o.completed).count();
        let total_revenue: f64 = orders.iter().map(|o| o.total).sum();

        let mut dishes: IndexMap<DishId, BackupTopDish> = IndexMap::new();
        for item in orders.iter().flat_map(|o| o.items.iter()) {
            let entry = dishes.entry(item.dish.id).or_insert_with(|| BackupTopDish {
                id: item.dish.id,
                name: item.dish.name.clone(),
                category: item.dish.category,
                quantity: 0,
                revenue: 0.0,
            });
            entry.quantity += item.quantity;
            entry.revenue += item.subtotal();
        }
        let mut top_dishes: Vec<BackupTopDish> = dishes.into_values().collect();
        top_dishes.sort_by(|a, b| {
            b.quantity
                .cmp(&a.quantity)
                .then_with(|| b.revenue.total_cmp(&a.revenue))
        });
        top_dishes.truncate(TOP_DISHES);

        Self {
            total_orders,
            completed_orders,
            pending_orders: total_orders - completed_orders,
            paid_orders: orders.iter().filter(|o| o.is_paid()).count(),
            total_revenue,
            average_ticket: if total_orders > 0 {
                total_revenue / total_orders as f64
            } else {
                0.0
            },
            top_dishes,
        }
    }
}

fn default_app_version() -> String {
    APP_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
    #[serde(default = "default_app_version")]
    pub app_version: String,
    pub dishes: Vec<Dish>,
    pub orders: Vec<Order>,
    pub tables: Vec<Table>,
    pub frequent_customers: Vec<FrequentCustomer>,
    pub statistics: BackupStatistics,
}

impl Backup {
    /// Bundles the collections as of `exported_at`.
    pub fn new(
        dishes: Vec<Dish>,
        orders: Vec<Order>,
        tables: Vec<Table>,
        frequent_customers: Vec<FrequentCustomer>,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            export_date: Some(exported_at),
            app_version: default_app_version(),
            statistics: BackupStatistics::from_orders(&orders),
            dishes,
            orders,
            tables,
            frequent_customers,
        }
    }

    /// Holds restored data to the same rules as data entered through the ledger:
    /// every order has valid items and a total equal to their sum, and customer
    /// names are unique.
    fn into_consistent(mut self) -> Result<Self, BackupError> {
        for order in &mut self.orders {
            validate_items(&order.items)
                .map_err(|reason| BackupError::InvalidOrder(order.id.to_string(), reason))?;
            order.total = order_total(&order.items);
        }

        let mut names = HashSet::new();
        for customer in &self.frequent_customers {
            if !names.insert(FrequentCustomer::name_key(&customer.name)) {
                return Err(BackupError::DuplicateCustomer(customer.name.trim().to_string()));
            }
        }
        Ok(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// `PancitoDeVida_Respaldo_<YYYY-MM-DD>.json`, dated by the export (UTC).
    pub fn file_name(&self) -> String {
        file_name(self.export_date.unwrap_or_else(Utc::now).date_naive())
    }

    /// Human readable description, shown before a restore is confirmed.
    pub fn summary(&self) -> String {
        let generated = self
            .export_date
            .map(|d| d.format("%d-%m-%Y").to_string())
            .unwrap_or_else(|| "desconocido".to_string());
        let s = &self.statistics;
        format!(
            "Respaldo generado: {generated}\n\
             Versión de app: {}\n\
             \n\
             Datos incluidos:\n\
             • Platos: {}\n\
             • Pedidos: {}\n\
             • Mesas: {}\n\
             • Clientes frecuentes: {}\n\
             \n\
             Estadísticas:\n\
             • Total de pedidos: {}\n\
             • Pedidos completados: {}\n\
             • Pendientes: {}\n\
             • Pagados: {}\n\
             • Ticket promedio: ${}\n\
             • Ingresos totales: ${}",
            self.app_version,
            self.dishes.len(),
            self.orders.len(),
            self.tables.len(),
            self.frequent_customers.len(),
            s.total_orders,
            s.completed_orders,
            s.pending_orders,
            s.paid_orders,
            format_price(s.average_ticket),
            format_price(s.total_revenue),
        )
    }
}

pub fn file_name(date: NaiveDate) -> String {
    format!("PancitoDeVida_Respaldo_{date}.json")
}

/// Cuts `raw` down to the span between its first `{` and last `}`.
pub fn extract_json(raw: &str) -> Result<&str, BackupError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BackupError::EmptyInput);
    }
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if end > start => Ok(&trimmed[start..=end]),
        _ => Err(BackupError::IncompleteJson),
    }
}

/// Parses pasted backup text.
pub fn parse(raw: &str) -> Result<Backup, BackupError> {
    let json = extract_json(raw)?;
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| BackupError::InvalidJson(e.to_string()))?;

    for field in REQUIRED_FIELDS {
        if value.get(field).map_or(true, serde_json::Value::is_null) {
            return Err(BackupError::MissingField(field));
        }
    }
    let backup: Backup =
        serde_json::from_value(value).map_err(|e| BackupError::InvalidJson(e.to_string()))?;
    backup.into_consistent()
}
