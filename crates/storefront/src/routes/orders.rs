//! Order history route handler.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use birchwood_core::OrderId;

use crate::db::OrderRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, OrderLine};
use crate::state::AppState;

/// Order line display data for templates.
#[derive(Clone)]
pub struct OrderLineView {
    pub name: String,
    pub quantity: i32,
}

/// Order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub id: String,
    pub total: String,
    pub placed_at: String,
    pub lines: Vec<OrderLineView>,
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/history.html")]
pub struct OrderHistoryTemplate {
    pub orders: Vec<OrderView>,
    pub current_user: Option<CurrentUser>,
}

/// Display the user's order history, newest first.
#[instrument(skip(state, user))]
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<OrderHistoryTemplate> {
    let repo = OrderRepository::new(state.pool());
    let orders = repo.list_by_user(user.id).await?;
    let lines = repo.lines_by_user(user.id).await?;

    // Group line snapshots by their order
    let mut lines_by_order: HashMap<OrderId, Vec<OrderLine>> = HashMap::new();
    for line in lines {
        lines_by_order.entry(line.order_id).or_default().push(line);
    }

    let orders = orders
        .iter()
        .map(|order| OrderView {
            id: order.id.to_string(),
            total: order.total_amount.to_string(),
            placed_at: order.created_at.format("%b %e, %Y at %H:%M").to_string(),
            lines: lines_by_order
                .remove(&order.id)
                .unwrap_or_default()
                .iter()
                .map(|line| OrderLineView {
                    name: line.product_name.clone(),
                    quantity: line.quantity,
                })
                .collect(),
        })
        .collect();

    Ok(OrderHistoryTemplate {
        orders,
        current_user: Some(user),
    })
}
