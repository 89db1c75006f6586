//! Domain models for storefront.
//!
//! Row types decode straight from sqlx queries via `FromRow`; anything the
//! templates need is reshaped into view structs at the route layer.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::CartLine;
pub use order::{Order, OrderLine};
pub use product::Product;
pub use session::{CurrentUser, session_keys};
pub use user::User;
