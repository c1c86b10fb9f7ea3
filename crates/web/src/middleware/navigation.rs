//! Session state extractor.
//!
//! [`Navigator`] loads the browser's [`SessionState`] from the session (a
//! fresh state on the front page if there is none) and is the only way
//! handlers change it.

use axum::{extract::FromRequestParts, http::request::Parts};
use threads_core::{Event, SessionState};
use tower_sessions::Session;

use crate::error::{AppError, add_breadcrumb};
use crate::models::keys;

/// The current browser session and its navigation state.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut nav: Navigator) -> Result<Redirect> {
///     nav.dispatch(Event::SignInClicked).await?;
///     Ok(Redirect::to("/"))
/// }
/// ```
pub struct Navigator {
    session: Session,
    state: SessionState,
}

impl<S> FromRequestParts<S> for Navigator
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        let state = session
            .get::<SessionState>(keys::SESSION_STATE)
            .await?
            .unwrap_or_default();

        Ok(Self { session, state })
    }
}

impl Navigator {
    /// The loaded state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run an event through the state machine and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session cannot be written.
    pub async fn dispatch(&mut self, event: Event) -> Result<(), AppError> {
        let from = self.state.current_page;
        let name = event.name();
        self.state = std::mem::take(&mut self.state).apply(event);
        let to = self.state.current_page;

        if from == to {
            tracing::debug!(page = %from, event = name, "Event handled");
        } else {
            tracing::info!(from = %from, to = %to, event = name, "Page changed");
            add_breadcrumb(
                "navigation",
                "Page changed",
                Some(&[("from", from.as_str()), ("to", to.as_str()), ("event", name)]),
            );
        }

        self.save().await
    }

    /// Remove and return the pending notice, persisting its removal.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session cannot be written.
    pub async fn take_notice(&mut self) -> Result<Option<threads_core::Notice>, AppError> {
        let notice = self.state.take_notice();
        if notice.is_some() {
            self.save().await?;
        }
        Ok(notice)
    }

    /// Write the state back to the session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session cannot be written.
    pub async fn save(&self) -> Result<(), AppError> {
        self.session
            .insert(keys::SESSION_STATE, &self.state)
            .await?;
        Ok(())
    }
}
