//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{
    CashSnapshot, Debt, Expense, ParanizCategory, ParanizSale, Transformation,
};
use crate::utils::generate_id;
use crate::Config;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

/// The business date of the fixture day inserted by `insert_test_day`.
pub const TEST_DAY: &str = "2024-05-10";

/// Test environment that sets up a daybook home directory with Config and database.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with Config and initialized database.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("daybook");
        let config = Config::create(&root).await.unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Inserts a day that reconciles to a cash excess of `+5.00`:
    /// - expenses of 30 and 20
    /// - transformations selling for 100 (5 x $2) and 50 (10 x $1)
    /// - one KONTOR paraniz sale of 40
    /// - 60 counted the day before and 205 counted today
    pub async fn insert_test_day(&self) -> NaiveDate {
        let db = self.config.db();
        let day = date(TEST_DAY);
        for (name, amount) in [("rent", dec!(30)), ("lunch", dec!(20))] {
            db.insert_expense(&Expense {
                id: generate_id(),
                date: day,
                name: name.to_string(),
                amount,
            })
            .await
            .unwrap();
        }
        for (name, quantity, cost, price) in [
            ("phone case", dec!(5), dec!(2), dec!(100)),
            ("cable", dec!(10), dec!(1), dec!(50)),
        ] {
            db.insert_transformation(&Transformation {
                id: generate_id(),
                date: day,
                name: name.to_string(),
                quantity,
                product_cost: cost,
                selling_price: price,
                is_net_profit: false,
            })
            .await
            .unwrap();
        }
        db.insert_paraniz_sale(&ParanizSale {
            id: generate_id(),
            date: day,
            name: "top-up".to_string(),
            amount: dec!(40),
            cost: dec!(38),
            category: ParanizCategory::Kontor,
            subscription_number: "5551234567".to_string(),
        })
        .await
        .unwrap();
        db.upsert_cash_snapshot(&CashSnapshot::new(date("2024-05-09"), dec!(60)))
            .await
            .unwrap();
        db.upsert_cash_snapshot(&CashSnapshot::new(day, dec!(205)))
            .await
            .unwrap();
        day
    }

    /// Inserts a debt and returns it.
    pub async fn insert_test_debt(&self, customer: &str, amount: Decimal, is_paid: bool) -> Debt {
        let debt = Debt {
            id: generate_id(),
            date: date(TEST_DAY),
            customer_name: customer.to_string(),
            product_name: "charger".to_string(),
            product_cost: Decimal::ZERO,
            amount,
            is_paid,
        };
        self.config.db().insert_debt(&debt).await.unwrap();
        debt
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}
