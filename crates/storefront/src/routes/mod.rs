//! Route handlers and router assembly.
//!
//! ```text
//! GET  /                        home: the full catalog
//!
//! GET/POST /auth/login          login form / action
//! GET/POST /auth/register       registration form / action (auto-login)
//! POST /auth/logout             end the session
//!
//! GET  /cart                    cart view            (auth)
//! POST /cart/add/{product_id}   add one unit         (auth)
//! POST /cart/remove/{item_id}   remove a line        (auth)
//!
//! GET  /checkout                order preview        (auth)
//! POST /checkout                place the order      (auth)
//! GET  /orders                  order history        (auth)
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add/{product_id}", post(cart::add))
        .route("/remove/{item_id}", post(cart::remove))
}

/// All storefront routes; health probes and static files are wired up
/// separately in `main.rs`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/checkout", get(checkout::show).post(checkout::place_order))
        .route("/orders", get(orders::history))
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes())
}
