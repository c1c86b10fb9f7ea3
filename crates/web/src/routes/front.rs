//! Front page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::Redirect};
use serde::Deserialize;
use threads_core::{Event, Notice, Page, SessionState};

use super::to_current_page;
use crate::error::Result;
use crate::filters;
use crate::middleware::Navigator;

/// Buttons on the front page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontAction {
    SignUp,
    SignIn,
    ViewOnce,
    AcceptTerms,
}

/// Front page form data.
#[derive(Debug, Deserialize)]
pub struct FrontForm {
    pub action: FrontAction,
    /// Present when the terms checkbox is ticked.
    pub terms: Option<String>,
}

impl FrontForm {
    /// The state machine event for this submission, if any.
    ///
    /// `accept_terms` with the box unticked produces nothing.
    #[must_use]
    pub fn event(&self) -> Option<Event> {
        match self.action {
            FrontAction::SignUp => Some(Event::SignUpClicked),
            FrontAction::SignIn => Some(Event::SignInClicked),
            FrontAction::ViewOnce => Some(Event::ViewOnceClicked),
            FrontAction::AcceptTerms if self.terms.is_some() => Some(Event::TermsAccepted),
            FrontAction::AcceptTerms => None,
        }
    }
}

/// Front page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/front.html")]
pub struct FrontTemplate {
    pub notice: Option<Notice>,
    /// Show the terms checkbox once "View Once" has been pressed.
    pub view_once: bool,
}

/// Build the front page.
#[must_use]
pub fn render(state: &SessionState, notice: Option<Notice>) -> FrontTemplate {
    FrontTemplate {
        notice,
        view_once: state.view_once,
    }
}

/// Handle a front page button.
pub async fn action(mut nav: Navigator, Form(form): Form<FrontForm>) -> Result<Redirect> {
    if nav.state().current_page != Page::Front {
        tracing::debug!(page = %nav.state().current_page, "Ignoring stale front page form");
        return Ok(to_current_page());
    }

    if let Some(event) = form.event() {
        nav.dispatch(event).await?;
    }
    Ok(to_current_page())
}
