//! Application services.
//!
//! Services own the business logic above the repositories: authentication
//! and the cart-to-order checkout transition.

pub mod auth;
pub mod checkout;
