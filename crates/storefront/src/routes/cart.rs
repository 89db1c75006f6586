//! Cart route handlers.
//!
//! All cart routes require authentication; the acting user always comes from
//! the session, never from the form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::instrument;

use birchwood_core::{CartItemId, ProductId};

use crate::db::{CartRepository, ProductRepository};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CartLine, CurrentUser};
use crate::services::checkout::order_total;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: i32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.product_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price.to_string(),
            line_total: format!("${:.2}", line.line_total()),
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub lines: Vec<CartItemView>,
    pub total: String,
    pub current_user: Option<CurrentUser>,
}

/// Display the cart page.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<CartShowTemplate> {
    let lines = CartRepository::new(state.pool()).list_by_user(user.id).await?;
    let total = format!("${:.2}", order_total(&lines));

    Ok(CartShowTemplate {
        lines: lines.iter().map(CartItemView::from).collect(),
        total,
        current_user: Some(user),
    })
}

/// Add one unit of a product to the cart.
///
/// Creates the cart line on first add; increments its quantity on repeat
/// adds. Unknown products are a 404, not a silent no-op.
#[instrument(skip(state, user))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<i32>,
) -> Result<Redirect> {
    let product_id = ProductId::new(product_id);

    let product = ProductRepository::new(state.pool())
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let quantity = CartRepository::new(state.pool())
        .upsert_increment(user.id, product.id)
        .await?;

    tracing::debug!(user_id = %user.id, product_id = %product.id, quantity, "added to cart");
    add_breadcrumb(
        "cart",
        "Added product to cart",
        Some(&[("product_id", &product.id.to_string())]),
    );

    Ok(Redirect::to("/cart"))
}

/// Remove a cart line.
///
/// Only lines owned by the acting user can be removed; anything else is
/// reported as not found.
#[instrument(skip(state, user))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<i32>,
) -> Result<Redirect> {
    let item_id = CartItemId::new(item_id);

    let deleted = CartRepository::new(state.pool())
        .delete_by_id(user.id, item_id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("cart item {item_id}")));
    }

    Ok(Redirect::to("/cart"))
}
