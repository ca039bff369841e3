use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An inventory item.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub quantity: Decimal,
    /// Purchase cost of one unit.
    pub cost: Decimal,
    /// Shelf price of one unit.
    pub price: Decimal,
}

/// The fields of a `Product` that can be changed. `None` leaves a field unchanged.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdates {
    pub name: Option<String>,
    pub quantity: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub price: Option<Decimal>,
}
