//! Signup page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer};
use threads_core::session::ACCOUNT_CREATED_MESSAGE;
use threads_core::{Event, Notice, Page, SignupInput};

use super::to_current_page;
use crate::error::Result;
use crate::filters;
use crate::middleware::Navigator;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Buttons on the signup page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupAction {
    CreateAccount,
    Back,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub action: SignupAction,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "measurement")]
    pub waist: f64,
    #[serde(default, deserialize_with = "measurement")]
    pub bust: f64,
    #[serde(default, deserialize_with = "measurement")]
    pub hip: f64,
    /// Present when the terms checkbox is ticked.
    pub terms: Option<String>,
}

impl SignupForm {
    /// The account fields of the form.
    #[must_use]
    pub fn input(&self) -> SignupInput {
        SignupInput {
            username: self.username.clone(),
            password: self.password.clone(),
            phone: self.phone.clone(),
            waist: self.waist,
            bust: self.bust,
            hip: self.hip,
        }
    }
}

/// Number inputs post an empty string when cleared; treat that as 0.0, the
/// input's minimum.
fn measurement<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse().map_err(serde::de::Error::custom)
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/signup.html")]
pub struct SignupTemplate {
    pub notice: Option<Notice>,
}

/// Shown after an account is created, then refreshes to the front page.
#[derive(Template, WebTemplate)]
#[template(path = "pages/signup_success.html")]
pub struct SignupSuccessTemplate {
    pub notice: Option<Notice>,
    pub delay_secs: u64,
}

/// Build the signup page.
#[must_use]
pub fn render(notice: Option<Notice>) -> SignupTemplate {
    SignupTemplate { notice }
}

/// Handle a signup page button.
///
/// Creating an account appends to the user table; the success page stays up
/// for the configured delay before the browser returns to the front page.
pub async fn action(
    State(state): State<AppState>,
    mut nav: Navigator,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    if nav.state().current_page != Page::Signup {
        tracing::debug!(page = %nav.state().current_page, "Ignoring stale signup form");
        return Ok(to_current_page().into_response());
    }

    match form.action {
        SignupAction::Back => {
            nav.dispatch(Event::BackClicked).await?;
            Ok(to_current_page().into_response())
        }
        SignupAction::CreateAccount => {
            let accepted_terms = form.terms.is_some();
            match AuthService::new(state.users())
                .register(form.input(), accepted_terms)
                .await
            {
                Ok(_) => {
                    nav.dispatch(Event::AccountCreated).await?;
                    let notice = nav
                        .take_notice()
                        .await?
                        .unwrap_or_else(|| Notice::success(ACCOUNT_CREATED_MESSAGE));
                    Ok(SignupSuccessTemplate {
                        notice: Some(notice),
                        delay_secs: state.config().signup_delay.as_secs(),
                    }
                    .into_response())
                }
                Err(e) => {
                    if e.is_user_error() {
                        tracing::debug!(error = %e, "Signup rejected");
                    } else {
                        tracing::warn!(error = %e, "Signup failed");
                    }
                    nav.dispatch(Event::SignupRejected(e.to_string())).await?;
                    Ok(to_current_page().into_response())
                }
            }
        }
    }
}
