//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. Sessions do not survive a
//! restart; every browser then starts again on the front page.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::WebConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "threads_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// # Arguments
///
/// * `config` - Site configuration (for the secure-cookie decision)
#[must_use]
pub fn create_session_layer(config: &WebConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
