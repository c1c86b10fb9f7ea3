//! Per-browser session state and the page navigation state machine.
//!
//! A [`SessionState`] is created with the first request of a browser session
//! and mutated only through [`SessionState::apply`]. `apply` is a pure
//! function of the current state and the [`Event`]: the web layer performs
//! the side effects (authentication, appending a signup row) and reports
//! their outcome as an event.
//!
//! # Transitions
//!
//! ```text
//! front  --SignUpClicked-->            signup
//! front  --SignInClicked-->            login
//! front  --ViewOnceClicked-->          front (view_once = true)
//! front  --TermsAccepted [view_once]-> browse
//! signup --SignupRejected-->           signup (error notice)
//! signup --AccountCreated-->           front (success notice)
//! login  --LoginSucceeded-->           browse (logged_in = true)
//! login  --LoginFailed-->              login (error notice)
//! signup, login --BackClicked-->       front
//! browse --Navigate(..)-->             see NavChoice
//! ```
//!
//! Any other (page, event) pair leaves the state untouched.

use serde::{Deserialize, Serialize};

use crate::types::{Page, UserRecord};

/// Message shown after a successful signup.
pub const ACCOUNT_CREATED_MESSAGE: &str = "Account created successfully!";

/// Severity of a one-shot notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A message displayed once on the next render of the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    /// Create a success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// Create an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Returns true for error notices.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Which panel of the browse page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrowseView {
    /// The catalog grid.
    #[default]
    Catalog,
    /// The saved outfits placeholder (logged-in only).
    SavedOutfits,
}

/// Entries of the browse page sidebar menu.
///
/// Logged-in sessions are offered `Browse`, `SavedOutfits` and `Logout`;
/// anonymous sessions are offered `Browse` and `BackToFront`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavChoice {
    Browse,
    SavedOutfits,
    Logout,
    BackToFront,
}

impl NavChoice {
    /// The menu entries offered for the given login state, in display order.
    #[must_use]
    pub const fn menu(logged_in: bool) -> &'static [Self] {
        if logged_in {
            &[Self::Browse, Self::SavedOutfits, Self::Logout]
        } else {
            &[Self::Browse, Self::BackToFront]
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Browse => "Browse",
            Self::SavedOutfits => "Saved Outfits",
            Self::Logout => "Logout",
            Self::BackToFront => "Back to Front Page",
        }
    }

    /// Form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browse => "browse",
            Self::SavedOutfits => "saved_outfits",
            Self::Logout => "logout",
            Self::BackToFront => "back_to_front",
        }
    }
}

/// A user action, or the outcome of one, fed to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Front page "Sign Up" button.
    SignUpClicked,
    /// Front page "Sign In" button.
    SignInClicked,
    /// Front page "View Once" button.
    ViewOnceClicked,
    /// Front page terms checkbox ticked.
    TermsAccepted,
    /// "Back to frontpage" on the signup or login page.
    BackClicked,
    /// The registrar refused the signup form.
    SignupRejected(String),
    /// The registrar appended the new account.
    AccountCreated,
    /// The authenticator accepted the credentials.
    LoginSucceeded(UserRecord),
    /// The authenticator refused the credentials or could not read the table.
    LoginFailed(String),
    /// A browse page sidebar choice.
    Navigate(NavChoice),
}

impl Event {
    /// Short name for logs and breadcrumbs. Never includes the payload, which
    /// may carry a password.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SignUpClicked => "sign_up_clicked",
            Self::SignInClicked => "sign_in_clicked",
            Self::ViewOnceClicked => "view_once_clicked",
            Self::TermsAccepted => "terms_accepted",
            Self::BackClicked => "back_clicked",
            Self::SignupRejected(_) => "signup_rejected",
            Self::AccountCreated => "account_created",
            Self::LoginSucceeded(_) => "login_succeeded",
            Self::LoginFailed(_) => "login_failed",
            Self::Navigate(choice) => choice.as_str(),
        }
    }
}

/// Navigation and login state of one browser session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionState {
    pub logged_in: bool,
    pub current_page: Page,
    pub user_details: Option<UserRecord>,
    pub view_once: bool,
    #[serde(default)]
    pub browse_view: BrowseView,
    #[serde(default)]
    pub notice: Option<Notice>,
}

impl SessionState {
    /// Apply an event and return the next state.
    #[must_use]
    pub fn apply(mut self, event: Event) -> Self {
        match (self.current_page, event) {
            (Page::Front, Event::SignUpClicked) => self.go(Page::Signup),
            (Page::Front, Event::SignInClicked) => self.go(Page::Login),
            (Page::Front, Event::ViewOnceClicked) => {
                self.view_once = true;
                self.notice = None;
            }
            (Page::Front, Event::TermsAccepted) if self.view_once => self.enter_browse(),
            (Page::Signup, Event::SignupRejected(message)) => {
                self.notice = Some(Notice::error(message));
            }
            (Page::Signup, Event::AccountCreated) => {
                self.go(Page::Front);
                self.notice = Some(Notice::success(ACCOUNT_CREATED_MESSAGE));
            }
            (Page::Login, Event::LoginSucceeded(profile)) => {
                self.logged_in = true;
                self.user_details = Some(profile);
                self.enter_browse();
            }
            (Page::Login, Event::LoginFailed(message)) => {
                self.notice = Some(Notice::error(message));
            }
            (Page::Signup | Page::Login, Event::BackClicked) => self.go(Page::Front),
            (Page::Browse, Event::Navigate(choice)) => self.navigate(choice),
            _ => {}
        }
        self
    }

    /// Take the pending notice, leaving none behind.
    pub const fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Username of the logged-in user, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.user_details.as_ref().map(|u| u.username.as_str())
    }

    /// The user snapshot is present exactly when the session is logged in.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.logged_in == self.user_details.is_some()
    }

    fn go(&mut self, page: Page) {
        self.current_page = page;
        self.notice = None;
    }

    fn enter_browse(&mut self) {
        self.go(Page::Browse);
        self.browse_view = BrowseView::Catalog;
    }

    fn navigate(&mut self, choice: NavChoice) {
        if !NavChoice::menu(self.logged_in).contains(&choice) {
            return;
        }
        match choice {
            NavChoice::Browse => self.browse_view = BrowseView::Catalog,
            NavChoice::SavedOutfits => self.browse_view = BrowseView::SavedOutfits,
            NavChoice::Logout => {
                self.logged_in = false;
                self.user_details = None;
                self.browse_view = BrowseView::Catalog;
                self.go(Page::Front);
            }
            NavChoice::BackToFront => self.go(Page::Front),
        }
    }
}
