use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Money paid out of the till, e.g. rent, lunch, a supplier invoice.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub amount: Decimal,
}

/// The fields of an `Expense` that can be changed. `None` leaves a field unchanged.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExpenseUpdates {
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub amount: Option<Decimal>,
}
