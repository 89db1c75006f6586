//! HTTP middleware: sessions, auth extractors, request IDs, security
//! headers. Assembled into the router in `main.rs`; Sentry and trace layers
//! wrap everything from the outside.

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{create_session_layer, create_session_store};
