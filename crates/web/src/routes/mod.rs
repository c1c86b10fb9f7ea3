//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /              - Render the page the session is on
//! GET  /health        - Liveness check
//! GET  /health/ready  - Readiness check
//!
//! # Page actions (form posts, redirect back to /)
//! POST /front         - sign_up | sign_in | view_once | accept_terms
//! POST /signup        - create_account | back
//! POST /login         - sign_in | back
//! POST /browse        - browse | saved_outfits | logout | back_to_front
//! ```
//!
//! Every page shares the single `/` URL; which page renders is decided by
//! the session's `current_page`. A post for a page the session is not on is
//! ignored and redirected back to `/`.

pub mod browse;
pub mod front;
pub mod home;
pub mod login;
pub mod signup;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Redirect back to the page dispatcher.
pub(crate) fn to_current_page() -> Redirect {
    Redirect::to("/")
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::show))
        .route("/front", post(front::action))
        .route("/signup", post(signup::action))
        .route("/login", post(login::action))
        .route("/browse", post(browse::navigate))
}
