// Order store adapter over PostgreSQL

use axum::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::cart::models::CartLine;
use crate::orders::error::OrderError;
use crate::orders::models::{Order, OrderItem};

/// Store operations order placement and history depend on.
///
/// `OrdersRepository` is the PostgreSQL implementation; service tests
/// substitute an in-memory store.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// The subject's cart joined with live products
    async fn cart_lines(&self, username: &str) -> Result<Vec<CartLine>, OrderError>;

    /// Persist an order with its item snapshots
    async fn create(
        &self,
        username: &str,
        total: Decimal,
        lines: &[CartLine],
    ) -> Result<Order, OrderError>;

    /// Empty the subject's cart after placement
    async fn clear_cart(&self, username: &str) -> Result<(), OrderError>;

    /// Order history for the subject
    async fn find_by_username(&self, username: &str) -> Result<Vec<Order>, OrderError>;

    /// Item snapshots belonging to an order
    async fn items_for_order(&self, order: &Order) -> Result<Vec<OrderItem>, OrderError>;
}

/// Repository for order operations
#[derive(Clone)]
pub struct OrdersRepository {
    pool: PgPool,
}

impl OrdersRepository {
    /// Create a new OrdersRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for OrdersRepository {
    /// Cart rows whose product has been deleted drop out of the join
    async fn cart_lines(&self, username: &str) -> Result<Vec<CartLine>, OrderError> {
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

    async fn create(
        &self,
        username: &str,
        total: Decimal,
        lines: &[CartLine],
    ) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (username, total)
            VALUES ($1, $2)
            RETURNING id, username, total, created_at
            "#,
        )
        .bind(username)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, name, quantity, price)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(&line.name)
            .bind(line.quantity)
            .bind(line.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    async fn clear_cart(&self, username: &str) -> Result<(), OrderError> {
        sqlx::query("DELETE FROM cart_items WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<Order>, OrderError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, username, total, created_at FROM orders
             WHERE username = $1 ORDER BY created_at DESC",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn items_for_order(&self, order: &Order) -> Result<Vec<OrderItem>, OrderError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT order_id, product_id, name, quantity, price
             FROM order_items WHERE order_id = $1",
        )
        .bind(order.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
