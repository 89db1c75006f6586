//! Checkout route handlers.
//!
//! GET renders a preview of what the order will contain; POST runs the
//! checkout engine. An empty cart redirects back to the cart page in both
//! cases rather than erroring.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::db::CartRepository;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::routes::cart::CartItemView;
use crate::services::checkout::{CheckoutOutcome, CheckoutService, order_total};
use crate::state::AppState;

/// Checkout preview template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub lines: Vec<CartItemView>,
    pub total: String,
    pub current_user: Option<CurrentUser>,
}

/// Display the checkout preview.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response> {
    let lines = CartRepository::new(state.pool()).list_by_user(user.id).await?;

    if lines.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let total = format!("${:.2}", order_total(&lines));

    Ok(CheckoutTemplate {
        lines: lines.iter().map(CartItemView::from).collect(),
        total,
        current_user: Some(user),
    }
    .into_response())
}

/// Place the order.
///
/// Runs the checkout transaction; on success the cart is empty and the user
/// lands on their order history.
#[instrument(skip(state, user))]
pub async fn place_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Redirect> {
    add_breadcrumb("checkout", "Placing order", None);

    match CheckoutService::new(state.pool()).checkout(user.id).await? {
        CheckoutOutcome::Completed { .. } => Ok(Redirect::to("/orders")),
        CheckoutOutcome::EmptyCart => Ok(Redirect::to("/cart")),
    }
}
