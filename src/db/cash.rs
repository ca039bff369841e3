use super::rows::{date_key, decimal_text, CashSnapshotRow, CASH_COLUMNS};
use super::{not_found, DateFilter, Db};
use crate::model::{CashSnapshot, Entity};
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;

impl Db {
    /// Stores `snapshot`, replacing any snapshot that already exists for its date.
    pub(crate) async fn upsert_cash_snapshot(&self, snapshot: &CashSnapshot) -> Result<()> {
        sqlx::query(
            "INSERT INTO cash_snapshots \
                (date, cash_in_box_yesterday, cash_in_box_today, dollar_to_tl_rate) \
             VALUES (?, ?, ?, ?) \
             ON CONFLICT(date) DO UPDATE SET \
                cash_in_box_yesterday = excluded.cash_in_box_yesterday, \
                cash_in_box_today = excluded.cash_in_box_today, \
                dollar_to_tl_rate = excluded.dollar_to_tl_rate",
        )
        .bind(date_key(snapshot.date))
        .bind(snapshot.cash_in_box_yesterday.map(decimal_text))
        .bind(decimal_text(snapshot.cash_in_box_today))
        .bind(decimal_text(snapshot.dollar_to_tl_rate))
        .execute(&self.pool)
        .await
        .context("Failed to save cash snapshot")?;
        Ok(())
    }

    pub(crate) async fn get_cash_snapshot(&self, date: NaiveDate) -> Result<Option<CashSnapshot>> {
        let sql = format!("SELECT {CASH_COLUMNS} FROM cash_snapshots WHERE date = ?");
        self.fetch_optional::<CashSnapshotRow, _>(&sql, &date_key(date))
            .await
    }

    pub(crate) async fn list_cash_snapshots(&self, filter: DateFilter) -> Result<Vec<CashSnapshot>> {
        let (clause, binds) = filter.clause();
        let sql = format!("SELECT {CASH_COLUMNS} FROM cash_snapshots {clause} ORDER BY date");
        self.fetch_all::<CashSnapshotRow, _>(&sql, binds).await
    }

    pub(crate) async fn delete_cash_snapshot(&self, date: NaiveDate) -> Result<()> {
        let key = date_key(date);
        let result = sqlx::query("DELETE FROM cash_snapshots WHERE date = ?")
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .context("Failed to delete cash snapshot")?;
        if result.rows_affected() == 0 {
            return Err(not_found(Entity::Cash, &key));
        }
        Ok(())
    }
}
