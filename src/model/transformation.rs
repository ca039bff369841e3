use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product bought in dollars and sold in TL.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transformation {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub quantity: Decimal,
    /// Cost of a single unit, in dollars.
    pub product_cost: Decimal,
    /// Total amount received for all units, in TL.
    pub selling_price: Decimal,
    /// Marks a sale whose selling price is pure profit (no cost to recover).
    pub is_net_profit: bool,
}

impl Transformation {
    /// `product_cost * quantity`, in dollars.
    pub fn cost_in_dollar(&self) -> Decimal {
        self.product_cost * self.quantity
    }
}

/// The fields of a `Transformation` that can be changed. `None` leaves a field unchanged.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransformationUpdates {
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub quantity: Option<Decimal>,
    pub product_cost: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub is_net_profit: Option<bool>,
}
