//! Authentication error types.

use thiserror::Error;

use crate::store::StoreError;

/// Message shown when no row matches the submitted credentials.
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "Authentication failed. Please check your username and password.";

/// Message shown when the signup terms box is unticked.
pub const TERMS_NOT_ACCEPTED_MESSAGE: &str =
    "Account can't be created unless you agree to the terms.";

/// Errors that can occur during login or signup.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No row has the given username and password.
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    /// Signup submitted without accepting the terms.
    #[error("{}", TERMS_NOT_ACCEPTED_MESSAGE)]
    TermsNotAccepted,

    /// The user table could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Returns true if the user can fix the error by changing the form input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::TermsNotAccepted)
    }
}
