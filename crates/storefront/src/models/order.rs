//! Order domain types.

use chrono::{DateTime, Utc};

use birchwood_core::{OrderId, OrderItemId, Price, ProductId, UserId};

/// A completed order.
///
/// Created only by the checkout engine, never mutated or deleted afterwards.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Sum of line quantities x unit prices at checkout time.
    pub total_amount: Price,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// An immutable snapshot of one cart line, attached to its order.
///
/// Quantity and product reference are frozen at checkout time and stay valid
/// regardless of later cart or catalog changes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderLine {
    /// Unique order line ID.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Product name (joined, for display).
    pub product_name: String,
    /// Units ordered, copied from the cart line.
    pub quantity: i32,
}
