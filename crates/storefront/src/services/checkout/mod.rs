//! Checkout engine.
//!
//! Transitions a user's cart into a durable order, exactly once per
//! invocation, with no partial state visible to other readers. The whole
//! transition runs in one database transaction:
//!
//! 1. Load the user's cart lines (joined with unit prices) under
//!    `FOR UPDATE` row locks.
//! 2. Empty cart: report [`CheckoutOutcome::EmptyCart`] without writing.
//! 3. Compute the total with exact decimal arithmetic.
//! 4. Insert the order row and one line snapshot per cart line.
//! 5. Delete the cart lines.
//! 6. Commit.
//!
//! The row locks serialize checkout per user: a second concurrent checkout
//! for the same cart blocks on step 1, then observes an empty cart and
//! reports `EmptyCart`, so at most one order is created per cart generation.
//! Any storage failure before commit rolls the whole transition back.

mod error;

pub use error::CheckoutError;

use rust_decimal::Decimal;
use sqlx::PgPool;

use birchwood_core::{OrderId, UserId};

use crate::models::CartLine;

/// Result of a checkout attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The cart had no lines; nothing was written.
    EmptyCart,
    /// The order was created and the cart cleared.
    Completed {
        /// ID of the new order.
        order_id: OrderId,
    },
}

/// Checkout service.
///
/// Holds the pool rather than a repository because the load, the order
/// materialization, and the cart clear must share one transaction.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order from the user's current cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Storage`] if any statement fails; the
    /// transaction is rolled back and no state changes.
    pub async fn checkout(&self, user_id: UserId) -> Result<CheckoutOutcome, CheckoutError> {
        let mut tx = self.pool.begin().await?;

        // Lock the cart lines for the duration of the transaction. A
        // concurrent checkout for the same user blocks here until we commit,
        // then sees the cart we cleared.
        let lines = sqlx::query_as::<_, CartLine>(
            r"
            SELECT ci.id, ci.user_id, ci.product_id,
                   p.name AS product_name, p.price AS unit_price,
                   ci.quantity
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.user_id = $1
            ORDER BY ci.id
            FOR UPDATE OF ci
            ",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            tx.rollback().await?;
            return Ok(CheckoutOutcome::EmptyCart);
        }

        let total = order_total(&lines);

        let order_id = sqlx::query_scalar::<_, OrderId>(
            r"
            INSERT INTO orders (user_id, total_amount)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        for line in &lines {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, quantity)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(user_id = %user_id, order_id = %order_id, %total, "order placed");

        Ok(CheckoutOutcome::Completed { order_id })
    }
}

/// Sum of `quantity x unit_price` over cart lines, as an exact decimal.
#[must_use]
pub fn order_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use birchwood_core::{CartItemId, Price, ProductId};

    fn line(id: i32, product_id: i32, cents: u32, quantity: i32) -> CartLine {
        CartLine {
            id: CartItemId::new(id),
            user_id: UserId::new(1),
            product_id: ProductId::new(product_id),
            product_name: format!("product-{product_id}"),
            unit_price: Price::from_cents(cents),
            quantity,
        }
    }

    #[test]
    fn test_order_total_empty() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_order_total_single_line() {
        let lines = vec![line(1, 1, 999, 3)];
        assert_eq!(order_total(&lines), Decimal::new(2997, 2));
    }

    #[test]
    fn test_order_total_widget_and_gadget() {
        // Widget $9.99 x2 + Gadget $5.00 x1 = $24.98
        let lines = vec![line(1, 1, 999, 2), line(2, 2, 500, 1)];
        assert_eq!(order_total(&lines), Decimal::new(2498, 2));
    }

    #[test]
    fn test_order_total_no_float_drift() {
        // 10c three times is exactly 30c
        let lines = vec![line(1, 1, 10, 3)];
        assert_eq!(order_total(&lines), Decimal::new(30, 2));
    }
}
