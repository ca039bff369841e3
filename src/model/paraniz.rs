//! Paraniz is the airtime and bill-payment resale line. A sale is either a bill payment
//! (`FATURA`) or a prepaid credit top-up (`KONTOR`).

use anyhow::bail;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParanizCategory {
    /// A bill paid on behalf of a customer.
    Fatura,
    /// Prepaid credit sold to a customer.
    Kontor,
}

serde_plain::derive_display_from_serialize!(ParanizCategory);
serde_plain::derive_fromstr_from_deserialize!(ParanizCategory);

impl ParanizCategory {
    /// Parses a stored category, accepting any letter case.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FATURA" => Ok(ParanizCategory::Fatura),
            "KONTOR" => Ok(ParanizCategory::Kontor),
            bad => bail!("Invalid paraniz category '{bad}', expected FATURA or KONTOR"),
        }
    }
}

/// A single paraniz sale.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ParanizSale {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    /// What the customer paid, in TL.
    pub amount: Decimal,
    /// What the sale cost the shop, in TL.
    pub cost: Decimal,
    pub category: ParanizCategory,
    pub subscription_number: String,
}

/// The fields of a `ParanizSale` that can be changed. `None` leaves a field unchanged.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParanizSaleUpdates {
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub category: Option<ParanizCategory>,
    pub subscription_number: Option<String>,
}

/// A batch entry of the kontor/fatura breakdown table. Unlike `ParanizSale` it records sums for
/// both categories at once.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ParanizBatch {
    pub id: String,
    pub date: NaiveDate,
    pub kontor_amount: Decimal,
    pub kontor_cost: Decimal,
    pub fatura_amount: Decimal,
    pub fatura_cost: Decimal,
}

/// The fields of a `ParanizBatch` that can be changed. `None` leaves a field unchanged.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParanizBatchUpdates {
    pub date: Option<NaiveDate>,
    pub kontor_amount: Option<Decimal>,
    pub kontor_cost: Option<Decimal>,
    pub fatura_amount: Option<Decimal>,
    pub fatura_cost: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_display() {
        assert_eq!(ParanizCategory::Fatura.to_string(), "FATURA");
        assert_eq!(ParanizCategory::Kontor.to_string(), "KONTOR");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            ParanizCategory::from_str("KONTOR").unwrap(),
            ParanizCategory::Kontor
        );
        assert!(ParanizCategory::from_str("kontor").is_err());
    }

    #[test]
    fn test_category_parse_any_case() {
        assert_eq!(
            ParanizCategory::parse(" fatura ").unwrap(),
            ParanizCategory::Fatura
        );
        let err = ParanizCategory::parse("gift").unwrap_err();
        assert!(err.to_string().contains("Invalid paraniz category"));
    }
}
