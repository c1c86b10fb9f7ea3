//! Page dispatcher.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use threads_core::Page;
use tracing::instrument;

use super::{browse, front, login, signup};
use crate::error::Result;
use crate::middleware::Navigator;
use crate::state::AppState;

/// Render whichever page the session is on.
///
/// A pending notice is consumed by this render.
#[instrument(skip_all, fields(page = tracing::field::Empty))]
pub async fn show(State(state): State<AppState>, mut nav: Navigator) -> Result<Response> {
    let notice = nav.take_notice().await?;
    let page = nav.state().current_page;
    tracing::Span::current().record("page", page.as_str());

    let response = match page {
        Page::Front => front::render(nav.state(), notice).into_response(),
        Page::Signup => signup::render(notice).into_response(),
        Page::Login => login::render(notice).into_response(),
        Page::Browse => browse::render(&state, nav.state(), notice)
            .await
            .into_response(),
    };
    Ok(response)
}
