// Cart store adapter over PostgreSQL

use sqlx::PgPool;
use uuid::Uuid;

use crate::cart::error::CartError;
use crate::cart::models::CartLine;

/// Repository for cart operations
#[derive(Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    /// Create a new CartRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check that a product exists before adding it to a cart
    pub async fn product_exists(&self, product_id: Uuid) -> Result<bool, CartError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    /// Add an item to the subject's cart
    pub async fn add_item(
        &self,
        username: &str,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<(), CartError> {
        sqlx::query("INSERT INTO cart_items (username, product_id, quantity) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(product_id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// The subject's cart joined with product name and price.
    /// Items whose product has since been deleted are skipped by the join.
    pub async fn lines(&self, username: &str) -> Result<Vec<CartLine>, CartError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT c.product_id, p.name, p.price, c.quantity
            FROM cart_items c
            JOIN products p ON p.id = c.product_id
            WHERE c.username = $1
            ORDER BY p.name
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Remove a product from the subject's cart. Every row for the product
    /// is deleted, so repeated adds of the same product all go at once.
    /// Returns deleted-row count.
    pub async fn remove_item(&self, username: &str, product_id: Uuid) -> Result<u64, CartError> {
        let result =
            sqlx::query("DELETE FROM cart_items WHERE username = $1 AND product_id = $2")
                .bind(username)
                .bind(product_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}
