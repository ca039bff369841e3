use super::rows::{date_key, decimal_text, TransformationRow, TRANSFORMATION_COLUMNS};
use super::{not_found, DateFilter, Db};
use crate::model::{Entity, Transformation, TransformationUpdates};
use crate::Result;
use anyhow::Context;

impl Db {
    pub(crate) async fn insert_transformation(&self, t: &Transformation) -> Result<()> {
        sqlx::query(
            "INSERT INTO transformations \
                (id, date, name, quantity, product_cost, selling_price, is_net_profit) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(t.id.as_str())
        .bind(date_key(t.date))
        .bind(t.name.as_str())
        .bind(decimal_text(t.quantity))
        .bind(decimal_text(t.product_cost))
        .bind(decimal_text(t.selling_price))
        .bind(t.is_net_profit)
        .execute(&self.pool)
        .await
        .context("Failed to insert transformation")?;
        Ok(())
    }

    pub(crate) async fn get_transformation(&self, id: &str) -> Result<Option<Transformation>> {
        let sql = format!("SELECT {TRANSFORMATION_COLUMNS} FROM transformations WHERE id = ?");
        self.fetch_optional::<TransformationRow, _>(&sql, id).await
    }

    pub(crate) async fn list_transformations(&self, filter: DateFilter) -> Result<Vec<Transformation>> {
        let (clause, binds) = filter.clause();
        let sql = format!(
            "SELECT {TRANSFORMATION_COLUMNS} FROM transformations {clause} \
             ORDER BY created_at, rowid"
        );
        self.fetch_all::<TransformationRow, _>(&sql, binds).await
    }

    pub(crate) async fn update_transformation(
        &self,
        id: &str,
        updates: &TransformationUpdates,
    ) -> Result<Transformation> {
        let result = sqlx::query(
            "UPDATE transformations SET \
                date = COALESCE(?, date), \
                name = COALESCE(?, name), \
                quantity = COALESCE(?, quantity), \
                product_cost = COALESCE(?, product_cost), \
                selling_price = COALESCE(?, selling_price), \
                is_net_profit = COALESCE(?, is_net_profit) \
             WHERE id = ?",
        )
        .bind(updates.date.map(date_key))
        .bind(updates.name.as_deref())
        .bind(updates.quantity.map(decimal_text))
        .bind(updates.product_cost.map(decimal_text))
        .bind(updates.selling_price.map(decimal_text))
        .bind(updates.is_net_profit)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update transformation")?;

        if result.rows_affected() == 0 {
            return Err(not_found(Entity::Transformation, id));
        }
        self.get_transformation(id)
            .await?
            .ok_or_else(|| not_found(Entity::Transformation, id))
    }
}
