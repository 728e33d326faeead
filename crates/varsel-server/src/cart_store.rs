use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use varsel_core::{Cart, CartLine};

/// In-memory cart storage keyed by session id. Carts live for the process
/// lifetime behind one coarse lock.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    carts: Arc<Mutex<HashMap<String, Cart>>>,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line to the session's cart, creating the cart on first add.
    /// Returns a snapshot of the cart after the add.
    pub async fn add_line(&self, session_id: &str, line: CartLine) -> Cart {
        let mut carts = self.carts.lock().await;
        let cart = carts.entry(session_id.to_string()).or_default();
        cart.add_line(line);
        cart.clone()
    }

    /// Snapshot of the session's cart; an empty cart if none exists yet.
    pub async fn cart(&self, session_id: &str) -> Cart {
        self.carts
            .lock()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use varsel_core::catalog::ProductId;

    use super::*;

    fn line(color: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId(101),
            color: color.to_string(),
            size: "S".to_string(),
            unit_price: Decimal::new(19_99, 2),
            quantity,
        }
    }

    #[tokio::test]
    async fn add_line_creates_cart_for_new_session() {
        let store = CartStore::new();
        let cart = store.add_line("session-a", line("red", 1)).await;
        assert_eq!(cart.item_count(), 1);
    }

    #[tokio::test]
    async fn repeated_adds_merge_within_a_session() {
        let store = CartStore::new();
        store.add_line("session-a", line("red", 1)).await;
        let cart = store.add_line("session-a", line("red", 2)).await;

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = CartStore::new();
        store.add_line("session-a", line("red", 1)).await;

        assert!(store.cart("session-b").await.is_empty());
        assert_eq!(store.cart("session-a").await.item_count(), 1);
    }

    #[tokio::test]
    async fn returned_snapshot_does_not_alias_the_store() {
        let store = CartStore::new();
        let mut snapshot = store.add_line("session-a", line("red", 1)).await;
        snapshot.add_line(line("yellow", 5));

        assert_eq!(store.cart("session-a").await.item_count(), 1);
    }
}
