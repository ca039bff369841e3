use super::rows::{
    date_key, decimal_text, ParanizBatchRow, ParanizSaleRow, PARANIZ_BATCH_COLUMNS,
    PARANIZ_SALE_COLUMNS,
};
use super::{not_found, DateFilter, Db};
use crate::model::{
    Entity, ParanizBatch, ParanizBatchUpdates, ParanizCategory, ParanizSale, ParanizSaleUpdates,
};
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;

impl Db {
    pub(crate) async fn insert_paraniz_sale(&self, sale: &ParanizSale) -> Result<()> {
        sqlx::query(
            "INSERT INTO paraniz_sales \
                (id, date, name, amount, cost, category, subscription_number) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(sale.id.as_str())
        .bind(date_key(sale.date))
        .bind(sale.name.as_str())
        .bind(decimal_text(sale.amount))
        .bind(decimal_text(sale.cost))
        .bind(sale.category.to_string())
        .bind(sale.subscription_number.as_str())
        .execute(&self.pool)
        .await
        .context("Failed to insert paraniz sale")?;
        Ok(())
    }

    pub(crate) async fn get_paraniz_sale(&self, id: &str) -> Result<Option<ParanizSale>> {
        let sql = format!("SELECT {PARANIZ_SALE_COLUMNS} FROM paraniz_sales WHERE id = ?");
        self.fetch_optional::<ParanizSaleRow, _>(&sql, id).await
    }

    pub(crate) async fn list_paraniz_sales(&self, filter: DateFilter) -> Result<Vec<ParanizSale>> {
        let (clause, binds) = filter.clause();
        let sql = format!(
            "SELECT {PARANIZ_SALE_COLUMNS} FROM paraniz_sales {clause} ORDER BY created_at, rowid"
        );
        self.fetch_all::<ParanizSaleRow, _>(&sql, binds).await
    }

    pub(crate) async fn list_paraniz_sales_by_category(
        &self,
        date: NaiveDate,
        category: ParanizCategory,
    ) -> Result<Vec<ParanizSale>> {
        let sql = format!(
            "SELECT {PARANIZ_SALE_COLUMNS} FROM paraniz_sales WHERE date = ? AND category = ? \
             ORDER BY created_at, rowid"
        );
        self.fetch_all::<ParanizSaleRow, _>(&sql, vec![date_key(date), category.to_string()])
            .await
    }

    pub(crate) async fn update_paraniz_sale(
        &self,
        id: &str,
        updates: &ParanizSaleUpdates,
    ) -> Result<ParanizSale> {
        let result = sqlx::query(
            "UPDATE paraniz_sales SET \
                date = COALESCE(?, date), \
                name = COALESCE(?, name), \
                amount = COALESCE(?, amount), \
                cost = COALESCE(?, cost), \
                category = COALESCE(?, category), \
                subscription_number = COALESCE(?, subscription_number) \
             WHERE id = ?",
        )
        .bind(updates.date.map(date_key))
        .bind(updates.name.as_deref())
        .bind(updates.amount.map(decimal_text))
        .bind(updates.cost.map(decimal_text))
        .bind(updates.category.map(|c| c.to_string()))
        .bind(updates.subscription_number.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update paraniz sale")?;

        if result.rows_affected() == 0 {
            return Err(not_found(Entity::ParanizSale, id));
        }
        self.get_paraniz_sale(id)
            .await?
            .ok_or_else(|| not_found(Entity::ParanizSale, id))
    }

    pub(crate) async fn insert_paraniz_batch(&self, batch: &ParanizBatch) -> Result<()> {
        sqlx::query(
            "INSERT INTO paraniz_batches \
                (id, date, kontor_amount, kontor_cost, fatura_amount, fatura_cost) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(batch.id.as_str())
        .bind(date_key(batch.date))
        .bind(decimal_text(batch.kontor_amount))
        .bind(decimal_text(batch.kontor_cost))
        .bind(decimal_text(batch.fatura_amount))
        .bind(decimal_text(batch.fatura_cost))
        .execute(&self.pool)
        .await
        .context("Failed to insert paraniz batch")?;
        Ok(())
    }

    pub(crate) async fn get_paraniz_batch(&self, id: &str) -> Result<Option<ParanizBatch>> {
        let sql = format!("SELECT {PARANIZ_BATCH_COLUMNS} FROM paraniz_batches WHERE id = ?");
        self.fetch_optional::<ParanizBatchRow, _>(&sql, id).await
    }

    pub(crate) async fn list_paraniz_batches(&self, filter: DateFilter) -> Result<Vec<ParanizBatch>> {
        let (clause, binds) = filter.clause();
        let sql = format!(
            "SELECT {PARANIZ_BATCH_COLUMNS} FROM paraniz_batches {clause} \
             ORDER BY created_at, rowid"
        );
        self.fetch_all::<ParanizBatchRow, _>(&sql, binds).await
    }

    pub(crate) async fn update_paraniz_batch(
        &self,
        id: &str,
        updates: &ParanizBatchUpdates,
    ) -> Result<ParanizBatch> {
        let result = sqlx::query(
            "UPDATE paraniz_batches SET \
                date = COALESCE(?, date), \
                kontor_amount = COALESCE(?, kontor_amount), \
                kontor_cost = COALESCE(?, kontor_cost), \
                fatura_amount = COALESCE(?, fatura_amount), \
                fatura_cost = COALESCE(?, fatura_cost) \
             WHERE id = ?",
        )
        .bind(updates.date.map(date_key))
        .bind(updates.kontor_amount.map(decimal_text))
        .bind(updates.kontor_cost.map(decimal_text))
        .bind(updates.fatura_amount.map(decimal_text))
        .bind(updates.fatura_cost.map(decimal_text))
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update paraniz batch")?;

        if result.rows_affected() == 0 {
            return Err(not_found(Entity::Paraniz, id));
        }
        self.get_paraniz_batch(id)
            .await?
            .ok_or_else(|| not_found(Entity::Paraniz, id))
    }
}
