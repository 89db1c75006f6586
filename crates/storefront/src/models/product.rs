//! Product domain types.

use chrono::{DateTime, Utc};

use birchwood_core::{Price, ProductId};

/// A catalog product.
///
/// Immutable from the cart and checkout paths; rows are created by the
/// seeding CLI.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Price,
    /// Path to the product image under the media directory, if any.
    pub image_path: Option<String>,
    /// When the product was added to the catalog.
    pub created_at: DateTime<Utc>,
}
