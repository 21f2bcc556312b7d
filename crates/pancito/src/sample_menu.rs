//! The house menu used to seed an empty ledger.

use crate::model::{DishCategory, DishCreate};

const MENU: [(&str, &str, f64, DishCategory); 12] = [
    ("Café con Leche", "Café colombiano con leche fresca", 2500.0, DishCategory::Desayuno),
    ("Pan con Palta", "Pan integral con palta y tomate", 3000.0, DishCategory::Desayuno),
    ("Huevos Revueltos", "Huevos revueltos con pan tostado", 3500.0, DishCategory::Desayuno),
    ("Cazuela de Vacuno", "Cazuela tradicional chilena con vacuno", 6500.0, DishCategory::Almuerzo),
    ("Pollo al Horno", "Pollo al horno con papas y ensalada", 5500.0, DishCategory::Almuerzo),
    ("Arroz con Pollo", "Arroz con pollo y verduras", 5000.0, DishCategory::Almuerzo),
    ("Jugo Natural", "Jugo natural de frutas de temporada", 2000.0, DishCategory::Bebestibles),
    ("Coca Cola", "Coca Cola 350ml", 1500.0, DishCategory::Bebestibles),
    ("Agua Mineral", "Agua mineral sin gas 500ml", 1000.0, DishCategory::Bebestibles),
    ("Empanada de Queso", "Empanada al horno rellena de queso", 1500.0, DishCategory::Otros),
    ("Sopaipillas", "Sopaipillas con pebre", 2000.0, DishCategory::Otros),
    ("Completo", "Completo italiano con palta, tomate y mayo", 3000.0, DishCategory::Otros),
];

pub fn sample_menu() -> Vec<DishCreate> {
    MENU.iter()
        .map(|&(name, description, price, category)| DishCreate {
            name: name.to_string(),
            description: description.to_string(),
            price,
            category,
        })
        .collect()
}
