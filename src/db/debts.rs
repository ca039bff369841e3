use super::rows::{date_key, decimal_text, DebtRow, DEBT_COLUMNS};
use super::{not_found, Db};
use crate::model::{Debt, DebtUpdates, Entity};
use crate::Result;
use anyhow::Context;

impl Db {
    pub(crate) async fn insert_debt(&self, debt: &Debt) -> Result<()> {
        sqlx::query(
            "INSERT INTO debts \
                (id, date, customer_name, product_name, product_cost, amount, is_paid) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(debt.id.as_str())
        .bind(date_key(debt.date))
        .bind(debt.customer_name.as_str())
        .bind(debt.product_name.as_str())
        .bind(decimal_text(debt.product_cost))
        .bind(decimal_text(debt.amount))
        .bind(debt.is_paid)
        .execute(&self.pool)
        .await
        .context("Failed to insert debt")?;
        Ok(())
    }

    pub(crate) async fn get_debt(&self, id: &str) -> Result<Option<Debt>> {
        let sql = format!("SELECT {DEBT_COLUMNS} FROM debts WHERE id = ?");
        self.fetch_optional::<DebtRow, _>(&sql, id).await
    }

    /// All debts, or only the open ones when `unpaid_only` is set.
    pub(crate) async fn list_debts(&self, unpaid_only: bool) -> Result<Vec<Debt>> {
        let clause = if unpaid_only { "WHERE is_paid = 0" } else { "" };
        let sql = format!("SELECT {DEBT_COLUMNS} FROM debts {clause} ORDER BY created_at, rowid");
        self.fetch_all::<DebtRow, _>(&sql, Vec::new()).await
    }

    pub(crate) async fn update_debt(&self, id: &str, updates: &DebtUpdates) -> Result<Debt> {
        let result = sqlx::query(
            "UPDATE debts SET \
                date = COALESCE(?, date), \
                customer_name = COALESCE(?, customer_name), \
                product_name = COALESCE(?, product_name), \
                product_cost = COALESCE(?, product_cost), \
                amount = COALESCE(?, amount), \
                is_paid = COALESCE(?, is_paid) \
             WHERE id = ?",
        )
        .bind(updates.date.map(date_key))
        .bind(updates.customer_name.as_deref())
        .bind(updates.product_name.as_deref())
        .bind(updates.product_cost.map(decimal_text))
        .bind(updates.amount.map(decimal_text))
        .bind(updates.is_paid)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update debt")?;

        if result.rows_affected() == 0 {
            return Err(not_found(Entity::Debt, id));
        }
        self.get_debt(id)
            .await?
            .ok_or_else(|| not_found(Entity::Debt, id))
    }

    /// Marks a debt as paid or unpaid without touching its other fields.
    pub(crate) async fn set_debt_paid(&self, id: &str, is_paid: bool) -> Result<Debt> {
        self.update_debt(
            id,
            &DebtUpdates {
                is_paid: Some(is_paid),
                ..Default::default()
            },
        )
        .await
    }
}
