//! Checkout error types.

use thiserror::Error;

/// Errors that can occur while placing an order.
///
/// An empty cart is not an error - see
/// [`CheckoutOutcome`](super::CheckoutOutcome).
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The persistence layer could not complete the transaction.
    ///
    /// The whole checkout rolls back: no order row, no order lines, cart
    /// untouched. Safe for the caller to retry.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
