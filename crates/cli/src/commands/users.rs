//! User table commands.
//!
//! # Usage
//!
//! ```bash
//! threads-cli users list
//! threads-cli users add -u alice -p pw1 --waist 28.5
//! ```

use thiserror::Error;
use threads_core::{SignupInput, UserRecord};
use threads_web::services::auth::{AuthError, AuthService};
use threads_web::store::StoreError;
use threads_web::store::users::UserTable;
use tracing::info;

use super::TablePaths;

/// Errors that can occur during user commands.
#[derive(Debug, Error)]
pub enum UsersError {
    /// The user table could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The account was refused.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// One output line for an account. The password is never printed.
fn describe(user: &UserRecord) -> String {
    format!(
        "{} (phone: {}, waist: {}, bust: {}, hip: {})",
        user.username, user.phone, user.waist, user.bust, user.hip
    )
}

/// Print every account in table order.
///
/// # Errors
///
/// Returns `UsersError::Store` if the table is missing or malformed.
#[allow(clippy::print_stdout)]
pub async fn list(paths: &TablePaths) -> Result<(), UsersError> {
    let users = UserTable::new(paths.users.clone()).all().await?;
    info!(path = %paths.users.display(), count = users.len(), "Loaded user table");

    for user in &users {
        println!("{}", describe(user));
    }
    Ok(())
}

/// Append an account through the same path as the signup page.
///
/// # Errors
///
/// Returns `UsersError` if the table cannot be read or rewritten.
pub async fn add(paths: &TablePaths, input: SignupInput) -> Result<UserRecord, UsersError> {
    let table = UserTable::new(paths.users.clone());
    let user = AuthService::new(&table).register(input, true).await?;
    info!(username = %user.username, path = %paths.users.display(), "Account added");
    Ok(user)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn paths(dir: &tempfile::TempDir) -> TablePaths {
        TablePaths {
            users: dir.path().join("users.csv"),
            images: dir.path().join("images.csv"),
        }
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths(&dir);

        let input = SignupInput {
            username: "alice".to_string(),
            password: "pw1".to_string(),
            ..SignupInput::default()
        };
        add(&paths, input).await.unwrap();

        let users = UserTable::new(paths.users.clone()).all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(list(&paths).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_without_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = list(&paths(&dir)).await.unwrap_err();
        assert!(matches!(err, UsersError::Store(StoreError::NotFound(_))));
    }

    #[test]
    fn test_describe_hides_password() {
        let user = UserRecord {
            username: "alice".to_string(),
            password: "secret-pw".to_string(),
            phone: "555".to_string(),
            waist: 28.5,
            bust: 34.0,
            hip: 36.0,
        };
        let line = describe(&user);
        assert!(line.starts_with("alice"));
        assert!(!line.contains("secret-pw"));
    }
}
