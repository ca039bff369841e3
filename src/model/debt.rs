use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Money a customer owes for a product taken on credit.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Debt {
    pub id: String,
    pub date: NaiveDate,
    pub customer_name: String,
    pub product_name: String,
    pub product_cost: Decimal,
    /// The amount owed, in TL.
    pub amount: Decimal,
    pub is_paid: bool,
}

/// The fields of a `Debt` that can be changed. `None` leaves a field unchanged.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DebtUpdates {
    pub date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub product_name: Option<String>,
    pub product_cost: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub is_paid: Option<bool>,
}
