use crate::model::{Dish, FrequentCustomer, OrderId, TableId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of an order: a snapshot of the dish at ordering time and how many were
/// ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub dish: Dish,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(dish: Dish, quantity: u32) -> Self {
        Self { dish, quantity }
    }

    pub fn subtotal(&self) -> f64 {
        self.dish.price * f64::from(self.quantity)
    }
}

/// Sum of `price * quantity` over all items.
pub fn order_total(items: &[OrderItem]) -> f64 {
    items.iter().map(OrderItem::subtotal).sum()
}

/// Rejects empty orders and zero quantities.
pub fn validate_items(items: &[OrderItem]) -> Result<(), String> {
    if items.is_empty() {
        return Err("an order needs at least one item".to_string());
    }
    if let Some(item) = items.iter().find(|item| item.quantity == 0) {
        return Err(format!("quantity of '{}' must be greater than zero", item.dish.name));
    }
    Ok(())
}

/// A customer order.
///
/// # Actor Framework
/// Managed by [`order_actor`](crate::order_actor). An order is created active, then
/// either completed (kept, `completed = true`) or cancelled (removed). While active and
/// seated (`table_id` is `Some`) it keeps its table occupied.
///
/// `table_id = None` is the free zone: take-away and counter orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub table_id: Option<TableId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
}

impl Order {
    pub fn is_active(&self) -> bool {
        !self.completed
    }

    pub fn is_paid(&self) -> bool {
        self.paid == Some(true)
    }

    /// Whether the order was placed under `name` (trimmed, case-insensitive).
    pub fn is_for_customer(&self, name: &str) -> bool {
        self.customer_name
            .as_deref()
            .is_some_and(|own| FrequentCustomer::name_key(own) == FrequentCustomer::name_key(name))
    }
}

/// What a caller supplies to place an order. The ledger stamps the creation time.
#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub table_id: Option<TableId>,
    pub customer_name: Option<String>,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    pub fn at_table(table: TableId, items: Vec<OrderItem>) -> Self {
        Self {
            table_id: Some(table),
            customer_name: None,
            items,
        }
    }

    pub fn free_zone(items: Vec<OrderItem>) -> Self {
        Self {
            table_id: None,
            customer_name: None,
            items,
        }
    }

    pub fn for_customer(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    pub fn placed_at(self, created_at: DateTime<Utc>) -> OrderCreate {
        OrderCreate {
            table_id: self.table_id,
            customer_name: self.customer_name,
            items: self.items,
            created_at,
        }
    }
}

/// Payload for creating an order in the order actor.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub table_id: Option<TableId>,
    pub customer_name: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

/// Edit of an order's content. The total follows the items; the table never changes.
///
/// `customer_name: Some(None)` clears the name.
#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub items: Option<Vec<OrderItem>>,
    pub customer_name: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DishCategory, DishId};
    use chrono::TimeZone;

    fn item(price: f64, quantity: u32) -> OrderItem {
        OrderItem::new(Dish::new(DishId(1), "Completo", "", price, DishCategory::Otros), quantity)
    }

    #[test]
    fn test_total_and_validation() {
        assert_eq!(order_total(&[item(2500.0, 2), item(1500.0, 1)]), 6500.0);
        assert!(validate_items(&[]).is_err());
        assert!(validate_items(&[item(1000.0, 1), item(1000.0, 0)]).is_err());
        assert!(validate_items(&[item(1000.0, 1)]).is_ok());
    }

    #[test]
    fn test_serialized_shape() {
        let order = Order {
            id: OrderId(3),
            table_id: None,
            customer_name: Some("Ñuñoa".to_string()),
            items: vec![item(3000.0, 1)],
            total: 3000.0,
            created_at: Utc.with_ymd_and_hms(2026, 10, 16, 15, 0, 0).unwrap(),
            completed: false,
            paid: None,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["tableId"], serde_json::Value::Null);
        assert_eq!(json["customerName"], "Ñuñoa");
        assert_eq!(json["createdAt"], "2026-10-16T15:00:00Z");
        assert!(json.get("paid").is_none());
        assert!(order.is_for_customer(" ñuñoa"));
    }
}
