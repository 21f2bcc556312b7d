//! [`ActorEntity`] implementation for [`Dish`].

use crate::dish_actor::DishError;
use crate::model::{Dish, DishCreate, DishId, DishUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

fn validate_name(name: &str) -> Result<String, DishError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DishError::ValidationError("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

fn validate_price(price: f64) -> Result<f64, DishError> {
    if !price.is_finite() || price < 0.0 {
        return Err(DishError::ValidationError(format!("invalid price: {price}")));
    }
    Ok(price)
}

#[async_trait]
impl ActorEntity for Dish {
    type Id = DishId;
    type Create = DishCreate;
    type Update = DishUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = DishError;

    fn id(&self) -> DishId {
        self.id
    }

    fn from_create_params(id: DishId, params: DishCreate) -> Result<Self, DishError> {
        Ok(Self::new(
            id,
            validate_name(&params.name)?,
            params.description.trim(),
            validate_price(params.price)?,
            params.category,
        ))
    }

    /// Applies the fields present in the update. Existing orders keep their own copy
    /// of the dish and are not affected.
    async fn on_update(&mut self, update: DishUpdate, _ctx: &()) -> Result<(), DishError> {
        if let Some(name) = update.name {
            self.name = validate_name(&name)?;
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(price) = update.price {
            self.price = validate_price(price)?;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), DishError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DishCategory;

    fn create(name: &str, price: f64) -> DishCreate {
        DishCreate {
            name: name.to_string(),
            description: "  Con palta  ".to_string(),
            price,
            category: DishCategory::Desayuno,
        }
    }

    #[test]
    fn test_create_trims_and_validates() {
        let dish = Dish::from_create_params(DishId(1), create(" Tostadas ", 2500.0)).unwrap();
        assert_eq!(dish.name, "Tostadas");
        assert_eq!(dish.description, "Con palta");

        assert!(matches!(
            Dish::from_create_params(DishId(2), create("   ", 100.0)),
            Err(DishError::ValidationError(_))
        ));
        assert!(matches!(
            Dish::from_create_params(DishId(3), create("Pan", -1.0)),
            Err(DishError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_update_only_touches_given_fields() {
        let mut dish = Dish::from_create_params(DishId(1), create("Tostadas", 2500.0)).unwrap();
        let update = DishUpdate {
            price: Some(2800.0),
            ..Default::default()
        };
        dish.on_update(update, &()).await.unwrap();
        assert_eq!(dish.price, 2800.0);
        assert_eq!(dish.name, "Tostadas");
        assert_eq!(dish.category, DishCategory::Desayuno);
    }
}
