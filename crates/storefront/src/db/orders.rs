//! Order repository for order history reads.
//!
//! Orders and their line snapshots are append-only; the only writer is the
//! checkout engine, inside its own transaction. This repository covers the
//! read side.

use sqlx::PgPool;

use birchwood_core::UserId;

use super::RepositoryError;
use crate::models::{Order, OrderLine};

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, total_amount, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// List all line snapshots for a user's orders, joined with product name.
    ///
    /// One query for the whole history page; the route groups lines by
    /// order ID. Product deletion is forbidden while order lines reference
    /// the product, so the join always matches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines_by_user(&self, user_id: UserId) -> Result<Vec<OrderLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r"
            SELECT oi.id, oi.order_id, oi.product_id,
                   p.name AS product_name, oi.quantity
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            JOIN products p ON p.id = oi.product_id
            WHERE o.user_id = $1
            ORDER BY oi.order_id DESC, oi.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }
}
