//! # Sales Statistics
//!
//! Pure derivations over the order history. Nothing here touches an actor: callers pass
//! a snapshot of the orders, the current instant and the business time zone, which
//! keeps every figure reproducible in tests.
//!
//! | Period | Orders counted |
//! |--------|----------------|
//! | [`StatsPeriod::Today`] | completed, created on the current calendar day (business time zone) |
//! | [`StatsPeriod::Week`] | completed, `now - 7 days <= created_at <= now` |
//! | [`StatsPeriod::Month`] | completed, `now - 30 days <= created_at <= now` |
//! | [`StatsPeriod::Year`] | completed, `now - 365 days <= created_at <= now` |

use crate::model::{Dish, DishId, Order};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

/// Number of dishes kept in a ranking.
pub const TOP_DISHES: usize = 5;

const WEEKDAYS: [&str; 7] = [
    "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
];
const MONTHS: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
    "septiembre", "octubre", "noviembre", "diciembre",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsPeriod {
    Today,
    Week,
    Month,
    Year,
}

impl StatsPeriod {
    /// Length of the rolling window. `Today` is a calendar day instead.
    fn window(self) -> Option<Duration> {
        match self {
            StatsPeriod::Today => None,
            StatsPeriod::Week => Some(Duration::days(7)),
            StatsPeriod::Month => Some(Duration::days(30)),
            StatsPeriod::Year => Some(Duration::days(365)),
        }
    }
}

impl Display for StatsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StatsPeriod::Today => "today",
            StatsPeriod::Week => "week",
            StatsPeriod::Month => "month",
            StatsPeriod::Year => "year",
        })
    }
}

impl FromStr for StatsPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" | "hoy" => Ok(StatsPeriod::Today),
            "week" | "semana" => Ok(StatsPeriod::Week),
            "month" | "mes" => Ok(StatsPeriod::Month),
            "year" | "año" | "ano" => Ok(StatsPeriod::Year),
            other => Err(format!("unknown period: {other} (expected today, week, month or year)")),
        }
    }
}

/// Units sold of one dish. `dish` is the first snapshot seen in the period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishSales {
    pub dish: Dish,
    pub quantity: u32,
}

/// Sales figures for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    /// Display label: the long Spanish date for today, "Esta Semana" and so on otherwise.
    #[serde(rename = "date")]
    pub label: String,
    pub total_sales: f64,
    pub orders_count: usize,
    pub top_dishes: Vec<DishSales>,
}

/// Computes the statistics of `period` as seen at `now`.
pub fn period_stats(
    orders: &[Order],
    period: StatsPeriod,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> PeriodStats {
    let counted: Vec<&Order> = match period.window() {
        None => {
            let today = now.with_timezone(&offset).date_naive();
            orders
                .iter()
                .filter(|o| o.completed && o.created_at.with_timezone(&offset).date_naive() == today)
                .collect()
        }
        Some(window) => {
            let from = now - window;
            orders
                .iter()
                .filter(|o| o.completed && o.created_at >= from && o.created_at <= now)
                .collect()
        }
    };

    let label = match period {
        StatsPeriod::Today => spanish_long_date(now.with_timezone(&offset).date_naive()),
        StatsPeriod::Week => "Esta Semana".to_string(),
        StatsPeriod::Month => "Este Mes".to_string(),
        StatsPeriod::Year => "Este Año".to_string(),
    };

    PeriodStats {
        label,
        total_sales: counted.iter().map(|o| o.total).sum(),
        orders_count: counted.len(),
        top_dishes: top_dishes(counted.iter().copied(), TOP_DISHES),
    }
}

/// Aggregates quantities per dish across all line items and keeps the `limit` best
/// sellers. Ties keep the order in which dishes were first seen.
pub fn top_dishes<'a>(orders: impl IntoIterator<Item = &'a Order>, limit: usize) -> Vec<DishSales> {
    let mut sales: IndexMap<DishId, DishSales> = IndexMap::new();
    for item in orders.into_iter().flat_map(|o| o.items.iter()) {
        sales
            .entry(item.dish.id)
            .or_insert_with(|| DishSales {
                dish: item.dish.clone(),
                quantity: 0,
            })
            .quantity += item.quantity;
    }

    let mut ranked: Vec<DishSales> = sales.into_values().collect();
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranked.truncate(limit);
    ranked
}

/// "Viernes, 16 de octubre de 2026".
pub fn spanish_long_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS[date.month0() as usize];
    let mut label = format!("{weekday}, {} de {month} de {}", date.day(), date.year());
    if let Some(first) = label.get(..1) {
        label.replace_range(..1, &first.to_uppercase());
    }
    label
}

/// Formats an amount in pesos with `.` as thousands separator: `12500.0` -> `"12.500"`.
pub fn format_price(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Running balance of a frequent customer, derived from the orders placed under their
/// name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAccount {
    pub name: String,
    /// Orders not yet completed.
    pub pending_orders: Vec<Order>,
    /// Orders, completed or not, that are not marked as paid.
    pub unpaid_orders: usize,
    pub amount_owed: f64,
    /// Every order ever placed under the name.
    pub order_count: usize,
    pub lifetime_total: f64,
}

pub fn customer_account(name: &str, orders: &[Order]) -> CustomerAccount {
    let own: Vec<&Order> = orders.iter().filter(|o| o.is_for_customer(name)).collect();
    let unpaid: Vec<&&Order> = own.iter().filter(|o| !o.is_paid()).collect();

    CustomerAccount {
        name: name.trim().to_string(),
        pending_orders: own.iter().filter(|o| o.is_active()).map(|o| (*o).clone()).collect(),
        unpaid_orders: unpaid.len(),
        amount_owed: unpaid.iter().map(|o| o.total).sum(),
        order_count: own.len(),
        lifetime_total: own.iter().map(|o| o.total).sum(),
    }
}
