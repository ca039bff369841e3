use super::rows::{decimal_text, ProductRow, PRODUCT_COLUMNS};
use super::{not_found, Db};
use crate::model::{Entity, Product, ProductUpdates};
use crate::Result;
use anyhow::Context;

impl Db {
    pub(crate) async fn insert_product(&self, product: &Product) -> Result<()> {
        sqlx::query("INSERT INTO products (id, name, quantity, cost, price) VALUES (?, ?, ?, ?, ?)")
            .bind(product.id.as_str())
            .bind(product.name.as_str())
            .bind(decimal_text(product.quantity))
            .bind(decimal_text(product.cost))
            .bind(decimal_text(product.price))
            .execute(&self.pool)
            .await
            .context("Failed to insert product")?;
        Ok(())
    }

    pub(crate) async fn get_product(&self, id: &str) -> Result<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?");
        self.fetch_optional::<ProductRow, _>(&sql, id).await
    }

    pub(crate) async fn list_products(&self) -> Result<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at, rowid");
        self.fetch_all::<ProductRow, _>(&sql, Vec::new()).await
    }

    pub(crate) async fn update_product(&self, id: &str, updates: &ProductUpdates) -> Result<Product> {
        let result = sqlx::query(
            "UPDATE products SET \
                name = COALESCE(?, name), \
                quantity = COALESCE(?, quantity), \
                cost = COALESCE(?, cost), \
                price = COALESCE(?, price) \
             WHERE id = ?",
        )
        .bind(updates.name.as_deref())
        .bind(updates.quantity.map(decimal_text))
        .bind(updates.cost.map(decimal_text))
        .bind(updates.price.map(decimal_text))
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update product")?;

        if result.rows_affected() == 0 {
            return Err(not_found(Entity::Product, id));
        }
        self.get_product(id)
            .await?
            .ok_or_else(|| not_found(Entity::Product, id))
    }
}

#[cfg(test)]
mod tests {
    use crate::db::tests::test_db;
    use crate::model::{Entity, Product, ProductUpdates};
    use crate::utils::generate_id;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_product_crud() {
        let (_dir, db) = test_db().await;
        let product = Product {
            id: generate_id(),
            name: "USB-C cable".to_string(),
            quantity: dec!(12),
            cost: dec!(1.2),
            price: dec!(75),
        };
        db.insert_product(&product).await.unwrap();
        assert_eq!(db.list_products().await.unwrap(), vec![product.clone()]);

        let updated = db
            .update_product(
                &product.id,
                &ProductUpdates {
                    quantity: Some(dec!(11)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.quantity, dec!(11));
        assert_eq!(updated.price, dec!(75));

        db.delete_records(Entity::Product, &[product.id.clone()])
            .await
            .unwrap();
        assert!(db.get_product(&product.id).await.unwrap().is_none());
    }
}
