use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The counted cash in the till for one business date. There is at most one per date.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CashSnapshot {
    pub date: NaiveDate,
    /// Cash carried over from the day before. When this was never entered, it is derived from
    /// `cash_in_box_today` of the previous calendar day.
    pub cash_in_box_yesterday: Option<Decimal>,
    /// Cash counted in the box at the end of `date`.
    pub cash_in_box_today: Decimal,
    /// TL per dollar on `date`. Zero means the rate has not been entered yet.
    pub dollar_to_tl_rate: Decimal,
}

impl CashSnapshot {
    pub fn new(date: NaiveDate, cash_in_box_today: Decimal) -> Self {
        Self {
            date,
            cash_in_box_yesterday: None,
            cash_in_box_today,
            dollar_to_tl_rate: Decimal::ZERO,
        }
    }

    /// Returns true when a dollar rate has been entered for this date.
    pub fn has_rate(&self) -> bool {
        !self.dollar_to_tl_rate.is_zero()
    }
}
