//! Session-related types.
//!
//! The whole [`threads_core::SessionState`] is stored as one JSON value so
//! that every handler loads and saves a consistent snapshot.

/// Session keys.
pub mod keys {
    /// Key for the navigation and login state of the browser session.
    pub const SESSION_STATE: &str = "session_state";
}
