use super::rows::{date_key, decimal_text, ExpenseRow, EXPENSE_COLUMNS};
use super::{not_found, DateFilter, Db};
use crate::model::{Entity, Expense, ExpenseUpdates};
use crate::Result;
use anyhow::Context;

impl Db {
    pub(crate) async fn insert_expense(&self, expense: &Expense) -> Result<()> {
        sqlx::query("INSERT INTO expenses (id, date, name, amount) VALUES (?, ?, ?, ?)")
            .bind(expense.id.as_str())
            .bind(date_key(expense.date))
            .bind(expense.name.as_str())
            .bind(decimal_text(expense.amount))
            .execute(&self.pool)
            .await
            .context("Failed to insert expense")?;
        Ok(())
    }

    pub(crate) async fn get_expense(&self, id: &str) -> Result<Option<Expense>> {
        let sql = format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?");
        self.fetch_optional::<ExpenseRow, _>(&sql, id).await
    }

    pub(crate) async fn list_expenses(&self, filter: DateFilter) -> Result<Vec<Expense>> {
        let (clause, binds) = filter.clause();
        let sql =
            format!("SELECT {EXPENSE_COLUMNS} FROM expenses {clause} ORDER BY created_at, rowid");
        self.fetch_all::<ExpenseRow, _>(&sql, binds).await
    }

    /// Changes the fields that are `Some` in `updates` and returns the updated expense.
    pub(crate) async fn update_expense(&self, id: &str, updates: &ExpenseUpdates) -> Result<Expense> {
        let result = sqlx::query(
            "UPDATE expenses SET \
                date = COALESCE(?, date), \
                name = COALESCE(?, name), \
                amount = COALESCE(?, amount) \
             WHERE id = ?",
        )
        .bind(updates.date.map(date_key))
        .bind(updates.name.as_deref())
        .bind(updates.amount.map(decimal_text))
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update expense")?;

        if result.rows_affected() == 0 {
            return Err(not_found(Entity::Expense, id));
        }
        self.get_expense(id)
            .await?
            .ok_or_else(|| not_found(Entity::Expense, id))
    }
}
