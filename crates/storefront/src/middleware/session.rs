//! Postgres-backed session layer.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StoreConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "bw_session";

/// Sessions die after a week without activity.
const SESSION_IDLE_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Build the session store over the shared pool.
///
/// The store owns its table schema; the caller runs `store.migrate()` once
/// at startup rather than through our migration files.
#[must_use]
pub fn create_session_store(pool: &PgPool) -> PostgresStore {
    PostgresStore::new(pool.clone())
}

/// Build the session middleware layer.
///
/// Cookies are HTTP-only, `SameSite=Lax`, and marked secure whenever the
/// configured base URL is HTTPS.
#[must_use]
pub fn create_session_layer(
    store: PostgresStore,
    config: &StoreConfig,
) -> SessionManagerLayer<PostgresStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_IDLE_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
