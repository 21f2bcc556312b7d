//! Type-safe identifiers.
//!
//! Every entity id is a `u32` newtype serialized as a bare JSON number. The
//! conversions to and from `u32` let the actor assign ids from its counter.

/// Declares `<Entity>Id` with its conversions and a `prefix_N` display form.
macro_rules! entity_id {
    ($entity:ident, $prefix:literal) => {
        paste::paste! {
            #[doc = "Type-safe identifier for [`" $entity "`](crate::model::" $entity ")."]
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
                serde::Serialize, serde::Deserialize,
            )]
            #[serde(transparent)]
            pub struct [<$entity Id>](pub u32);

            impl From<u32> for [<$entity Id>] {
                fn from(id: u32) -> Self {
                    Self(id)
                }
            }

            impl From<[<$entity Id>]> for u32 {
                fn from(id: [<$entity Id>]) -> Self {
                    id.0
                }
            }

            impl std::fmt::Display for [<$entity Id>] {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, concat!($prefix, "_{}"), self.0)
                }
            }
        }
    };
}

entity_id!(Dish, "dish");
entity_id!(Table, "table");
entity_id!(Order, "order");
entity_id!(FrequentCustomer, "customer");

/// Shorter alias used throughout the customer actor.
pub type CustomerId = FrequentCustomerId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display_with_prefix_and_serialize_as_numbers() {
        assert_eq!(OrderId(7).to_string(), "order_7");
        assert_eq!(TableId(2).to_string(), "table_2");
        assert_eq!(serde_json::to_string(&DishId(12)).unwrap(), "12");
        let id: CustomerId = serde_json::from_str("3").unwrap();
        assert_eq!(u32::from(id), 3);
    }
}
