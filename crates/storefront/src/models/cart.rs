//! Cart domain types.

use rust_decimal::Decimal;

use birchwood_core::{CartItemId, Price, ProductId, UserId};

/// One line of a user's cart: a quantity of a single product.
///
/// At most one line exists per (user, product) pair; repeat adds increment
/// `quantity` instead of inserting a second row. Loaded joined with the
/// product so display and checkout see the unit price the line carries.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartLine {
    /// Unique cart line ID.
    pub id: CartItemId,
    /// Owning user.
    pub user_id: UserId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Product name at load time (joined, for display).
    pub product_name: String,
    /// Product unit price at load time (joined).
    pub unit_price: Price,
    /// Number of units, always >= 1.
    pub quantity: i32,
}

impl CartLine {
    /// The exact total for this line (quantity x unit price).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.line_total(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let line = CartLine {
            id: CartItemId::new(1),
            user_id: UserId::new(1),
            product_id: ProductId::new(1),
            product_name: "Widget".to_owned(),
            unit_price: Price::from_cents(999),
            quantity: 2,
        };
        assert_eq!(line.line_total(), Decimal::new(1998, 2));
    }
}
