//! Cart repository for per-user cart lines.
//!
//! The `(user_id, product_id)` pair is unique: adding a product that is
//! already in the cart increments its quantity through a single upsert
//! statement instead of inserting a second row, so concurrent adds can
//! never double-create or lose an increment.

use sqlx::PgPool;

use birchwood_core::{CartItemId, ProductId, UserId};

use super::RepositoryError;
use crate::models::CartLine;

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's cart lines joined with product name and unit price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r"
            SELECT ci.id, ci.user_id, ci.product_id,
                   p.name AS product_name, p.price AS unit_price,
                   ci.quantity
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.user_id = $1
            ORDER BY ci.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Add one unit of a product to a user's cart.
    ///
    /// Inserts a line with quantity 1, or increments the existing line for
    /// this (user, product) pair. One statement, race-free under concurrent
    /// adds. Returns the resulting quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails (including
    /// a foreign-key violation for a product that no longer exists).
    pub async fn upsert_increment(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<i32, RepositoryError> {
        let quantity = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO cart_items (user_id, product_id, quantity)
            VALUES ($1, $2, 1)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + 1
            RETURNING quantity
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(self.pool)
        .await?;

        Ok(quantity)
    }

    /// Delete a cart line, but only if it belongs to `user_id`.
    ///
    /// The ownership check is part of the delete predicate: a line owned by
    /// another user is simply not matched.
    ///
    /// # Returns
    ///
    /// Returns `true` if the line was deleted, `false` if no line matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete_by_id(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_items
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(item_id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
