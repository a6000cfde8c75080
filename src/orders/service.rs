// Order placement and history - business logic layer

use rust_decimal::Decimal;
use tracing::info;

use crate::orders::error::OrderError;
use crate::orders::models::{OrderItemResponse, OrderResponse};
use crate::orders::repository::{OrderStore, OrdersRepository};

/// Order service coordinating cart reads, placement, and history
pub struct OrderService<S: OrderStore = OrdersRepository> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    /// Create a new OrderService
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Place an order from the subject's cart.
    ///
    /// An empty cart is rejected before any write: no order record exists
    /// for a rejected placement. Name and price are snapshotted from the
    /// cart lines, and the cart is cleared only after the order persists.
    pub async fn place(&self, username: &str) -> Result<OrderResponse, OrderError> {
        let lines = self.store.cart_lines(username).await?;

        if lines.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let total: Decimal = lines
            .iter()
            .map(|line| line.price * Decimal::from(line.quantity))
            .sum();

        let order = self.store.create(username, total, &lines).await?;
        self.store.clear_cart(username).await?;

        info!(
            "Order {} placed by {} (total {})",
            order.id, username, order.total
        );

        Ok(OrderResponse {
            id: order.id,
            total: order.total,
            items: lines
                .into_iter()
                .map(|line| OrderItemResponse {
                    product_id: line.product_id,
                    name: line.name,
                    quantity: line.quantity,
                    price: line.price,
                })
                .collect(),
            created_at: order.created_at,
        })
    }

    /// Order history for the subject, newest first, with item snapshots
    pub async fn history(&self, username: &str) -> Result<Vec<OrderResponse>, OrderError> {
        let orders = self.store.find_by_username(username).await?;

        let mut responses = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.store.items_for_order(&order).await?;
            responses.push(OrderResponse {
                id: order.id,
                total: order.total,
                items: items.into_iter().map(OrderItemResponse::from).collect(),
                created_at: order.created_at,
            });
        }

        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::models::CartLine;
    use crate::orders::models::{Order, OrderItem};
    use axum::async_trait;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// In-memory order store recording every write so tests can assert
    /// what was (or was not) persisted
    #[derive(Default)]
    struct MemoryStore {
        cart: Mutex<Vec<CartLine>>,
        orders: Mutex<Vec<(Order, Vec<OrderItem>)>>,
    }

    #[async_trait]
    impl OrderStore for MemoryStore {
        async fn cart_lines(&self, _username: &str) -> Result<Vec<CartLine>, OrderError> {
            Ok(self.cart.lock().unwrap().clone())
        }

        async fn create(
            &self,
            username: &str,
            total: Decimal,
            lines: &[CartLine],
        ) -> Result<Order, OrderError> {
            let order = Order {
                id: Uuid::new_v4(),
                username: username.to_string(),
                total,
                created_at: Utc::now(),
            };
            let items = lines
                .iter()
                .map(|line| OrderItem {
                    order_id: order.id,
                    product_id: line.product_id,
                    name: line.name.clone(),
                    quantity: line.quantity,
                    price: line.price,
                })
                .collect();
            self.orders.lock().unwrap().push((order.clone(), items));
            Ok(order)
        }

        async fn clear_cart(&self, _username: &str) -> Result<(), OrderError> {
            self.cart.lock().unwrap().clear();
            Ok(())
        }

        async fn find_by_username(&self, username: &str) -> Result<Vec<Order>, OrderError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .filter(|(order, _)| order.username == username)
                .map(|(order, _)| order.clone())
                .collect())
        }

        async fn items_for_order(&self, order: &Order) -> Result<Vec<OrderItem>, OrderError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .find(|(stored, _)| stored.id == order.id)
                .map(|(_, items)| items.clone())
                .unwrap_or_default())
        }
    }

    fn line(name: &str, price: Decimal, quantity: i32) -> CartLine {
        CartLine {
            product_id: Uuid::new_v4(),
            name: name.to_string(),
            price,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected_and_writes_no_order() {
        let service = OrderService::new(MemoryStore::default());

        let result = service.place("alice").await;

        assert!(matches!(result, Err(OrderError::EmptyCart)));
        assert!(service.store.orders.lock().unwrap().is_empty());
        assert!(service.history("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_placement_totals_lines_and_clears_cart() {
        let service = OrderService::new(MemoryStore::default());
        {
            let mut cart = service.store.cart.lock().unwrap();
            cart.push(line("Keyboard", dec!(89.99), 1));
            cart.push(line("Mouse", dec!(19.99), 3));
        }

        let placed = service.place("alice").await.unwrap();

        // total = 89.99 + 3 * 19.99
        assert_eq!(placed.total, dec!(149.96));
        assert_eq!(placed.items.len(), 2);
        assert!(service.store.cart.lock().unwrap().is_empty());

        // A second placement sees the emptied cart
        assert!(matches!(
            service.place("alice").await,
            Err(OrderError::EmptyCart)
        ));
    }

    #[tokio::test]
    async fn test_history_returns_placed_order_with_snapshots() {
        let service = OrderService::new(MemoryStore::default());
        service
            .store
            .cart
            .lock()
            .unwrap()
            .push(line("Keyboard", dec!(89.99), 2));

        let placed = service.place("alice").await.unwrap();
        let history = service.history("alice").await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, placed.id);
        assert_eq!(history[0].total, dec!(179.98));
        assert_eq!(history[0].items.len(), 1);
        assert_eq!(history[0].items[0].name, "Keyboard");
        assert_eq!(history[0].items[0].quantity, 2);
    }
}
