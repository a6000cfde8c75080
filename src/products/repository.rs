// Product store adapter over PostgreSQL

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::products::models::{CreateProduct, Product, UpdateProduct};

/// Repository for product catalog operations
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new ProductRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new product; the id is store-generated
    pub async fn create(&self, product: &CreateProduct) -> Result<Product, ApiError> {
        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, stock
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Fetch the full catalog
    pub async fn find_all(&self) -> Result<Vec<Product>, ApiError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, stock FROM products ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Case-insensitive substring search over name and description
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, stock
            FROM products
            WHERE name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%'
            ORDER BY name
            "#,
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Compound range filter: price between bounds, stock at least the bound
    pub async fn filter(
        &self,
        min_price: Decimal,
        max_price: Decimal,
        min_stock: i32,
    ) -> Result<Vec<Product>, ApiError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, stock
            FROM products
            WHERE price >= $1 AND price <= $2 AND stock >= $3
            ORDER BY name
            "#,
        )
        .bind(min_price)
        .bind(max_price)
        .bind(min_stock)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Point lookup by id
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, stock FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Replace a product's fields. Returns matched-row count so the caller
    /// can report "not found" distinctly.
    pub async fn update(&self, id: Uuid, product: &UpdateProduct) -> Result<u64, ApiError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1, description = $2, price = $3, stock = $4
            WHERE id = $5
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a product. Returns deleted-row count.
    pub async fn delete(&self, id: Uuid) -> Result<u64, ApiError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
