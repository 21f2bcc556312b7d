//! A menu item.
//!
//! # Actor Framework
//! Managed by a [`ResourceActor<Dish>`](resource_actor::ResourceActor), see
//! [`dish_actor`](crate::dish_actor). Orders copy the whole dish into each line item,
//! so editing or deleting a dish never changes past orders.

use crate::model::DishId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Menu section. Serialized with the Spanish labels shown on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DishCategory {
    Desayuno,
    Almuerzo,
    Bebestibles,
    Otros,
}

impl DishCategory {
    pub const ALL: [DishCategory; 4] = [
        DishCategory::Desayuno,
        DishCategory::Almuerzo,
        DishCategory::Bebestibles,
        DishCategory::Otros,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DishCategory::Desayuno => "Desayuno",
            DishCategory::Almuerzo => "Almuerzo",
            DishCategory::Bebestibles => "Bebestibles",
            DishCategory::Otros => "Otros",
        }
    }
}

impl Display for DishCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for DishCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DishCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown dish category: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: DishId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: DishCategory,
}

impl Dish {
    pub fn new(
        id: DishId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: DishCategory,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            category,
        }
    }
}

/// Payload for adding a dish to the menu.
#[derive(Debug, Clone)]
pub struct DishCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: DishCategory,
}

/// Partial edit of a dish. `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<DishCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!("bebestibles".parse::<DishCategory>(), Ok(DishCategory::Bebestibles));
        assert!("Postres".parse::<DishCategory>().is_err());
        assert_eq!(serde_json::to_string(&DishCategory::Almuerzo).unwrap(), "\"Almuerzo\"");
    }
}
