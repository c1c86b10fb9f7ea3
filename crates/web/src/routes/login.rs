//! Login page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use threads_core::{Event, Notice, Page};

use super::to_current_page;
use crate::error::{Result, set_sentry_user};
use crate::filters;
use crate::middleware::Navigator;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Buttons on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginAction {
    SignIn,
    Back,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub action: LoginAction,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub notice: Option<Notice>,
}

/// Build the login page.
#[must_use]
pub fn render(notice: Option<Notice>) -> LoginTemplate {
    LoginTemplate { notice }
}

/// Handle a login page button.
///
/// A successful sign-in stores the matching user row in the session and
/// moves to the browse page; a failure stays here with an error.
pub async fn action(
    State(state): State<AppState>,
    mut nav: Navigator,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    if nav.state().current_page != Page::Login {
        tracing::debug!(page = %nav.state().current_page, "Ignoring stale login form");
        return Ok(to_current_page());
    }

    let event = match form.action {
        LoginAction::Back => Event::BackClicked,
        LoginAction::SignIn => match AuthService::new(state.users())
            .authenticate(&form.username, &form.password)
            .await
        {
            Ok(profile) => {
                tracing::info!(username = %profile.username, "Login succeeded");
                set_sentry_user(&profile.username);
                Event::LoginSucceeded(profile)
            }
            Err(e) => {
                tracing::warn!(username = %form.username, error = %e, "Login failed");
                Event::LoginFailed(e.to_string())
            }
        },
    };

    nav.dispatch(event).await?;
    Ok(to_current_page())
}
