//! Types stored in the session.

pub mod session;

pub use session::keys;
