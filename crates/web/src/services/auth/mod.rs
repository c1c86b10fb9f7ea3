//! Authentication service.
//!
//! Provides plaintext username/password login and account signup over the
//! CSV user table. No hashing, normalization or uniqueness check is applied:
//! the first row matching both fields wins, and signups with an existing
//! username are appended as new rows.

mod error;

pub use error::{AuthError, INVALID_CREDENTIALS_MESSAGE, TERMS_NOT_ACCEPTED_MESSAGE};

use threads_core::{SignupInput, UserRecord};

use crate::store::users::UserTable;

/// Authentication service.
///
/// Handles login and account creation.
pub struct AuthService<'a> {
    users: &'a UserTable,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a UserTable) -> Self {
        Self { users }
    }

    /// Check a username and password against the user table.
    ///
    /// Returns the first matching row in table order.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no row matches.
    /// Returns `AuthError::Store` if the table is missing or malformed.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserRecord, AuthError> {
        self.users
            .find_by_credentials(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Create an account from the signup form.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TermsNotAccepted` without touching the table if
    /// `accepted_terms` is false.
    /// Returns `AuthError::Store` if the table cannot be read or rewritten.
    pub async fn register(
        &self,
        input: SignupInput,
        accepted_terms: bool,
    ) -> Result<UserRecord, AuthError> {
        if !accepted_terms {
            return Err(AuthError::TermsNotAccepted);
        }

        let user = UserRecord::from(input);
        self.users.append(user.clone()).await?;
        tracing::info!(username = %user.username, "Account created");
        Ok(user)
    }
}
