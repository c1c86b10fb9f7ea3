//! User table access.
//!
//! The user table is `users.csv` with the columns of [`UserRecord`].
//! Rows are only ever appended; nothing updates or deletes an account.

use std::path::{Path, PathBuf};

use threads_core::UserRecord;

use super::{StoreError, append_row, blocking, read_table};

/// Handle to the user table.
#[derive(Debug, Clone)]
pub struct UserTable {
    path: PathBuf,
}

impl UserTable {
    /// Create a handle for the table at `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing CSV file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every account, in file order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the file is missing and
    /// `StoreError::Parse` if it is malformed.
    pub async fn all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let path = self.path.clone();
        blocking(move || read_table(&path)?.deserialize()).await
    }

    /// Find the first account whose username and password both match.
    ///
    /// # Errors
    ///
    /// Returns any `StoreError` from loading the table.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let users = self.all().await?;
        Ok(users.into_iter().find(|u| u.matches(username, password)))
    }

    /// Append an account, rewriting the whole file.
    ///
    /// # Errors
    ///
    /// Returns any `StoreError` from reading or rewriting the table.
    pub async fn append(&self, user: UserRecord) -> Result<(), StoreError> {
        let path = self.path.clone();
        blocking(move || append_row(&path, &user)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use super::*;

    fn user(name: &str, password: &str) -> UserRecord {
        UserRecord {
            username: name.to_string(),
            password: password.to_string(),
            phone: "555-0100".to_string(),
            waist: 28.0,
            bust: 34.5,
            hip: 36.0,
        }
    }

    #[tokio::test]
    async fn test_first_append_writes_user_header() {
        let dir = tempfile::tempdir().unwrap();
        let table = UserTable::new(dir.path().join("users.csv"));

        table.append(user("alice", "pw1")).await.unwrap();

        let contents = fs::read_to_string(table.path()).unwrap();
        assert_eq!(
            contents,
            "Username,Password,Phone Number,Waist Measurement,Bust Measurement,Hip Measurement\n\
             alice,pw1,555-0100,28.0,34.5,36.0\n"
        );
    }

    #[tokio::test]
    async fn test_duplicates_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let table = UserTable::new(dir.path().join("users.csv"));

        table.append(user("alice", "pw1")).await.unwrap();
        table.append(user("alice", "pw2")).await.unwrap();

        let users = table.all().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].password, "pw1");
        assert_eq!(users[1].password, "pw2");
    }

    #[tokio::test]
    async fn test_find_returns_first_match_in_table_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        fs::write(
            &path,
            "Username,Password,Phone Number,Waist Measurement,Bust Measurement,Hip Measurement\n\
             alice,pw1,first,1.0,1.0,1.0\n\
             alice,pw1,second,2.0,2.0,2.0\n",
        )
        .unwrap();
        let table = UserTable::new(&path);

        let found = table.find_by_credentials("alice", "pw1").await.unwrap();
        assert_eq!(found.unwrap().phone, "first");

        let missing = table.find_by_credentials("alice", "wrong").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_missing_table_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let table = UserTable::new(dir.path().join("users.csv"));

        let err = table.all().await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blank_measurements_do_not_block_other_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        fs::write(
            &path,
            "Username,Password,Phone Number,Waist Measurement,Bust Measurement,Hip Measurement\n\
             alice,pw1,555,28.0,34.0,36.0\n\
             bob,pw2,,,,\n",
        )
        .unwrap();
        let table = UserTable::new(&path);

        let alice = table.find_by_credentials("alice", "pw1").await.unwrap();
        assert_eq!(alice.unwrap().phone, "555");

        let bob = table.find_by_credentials("bob", "pw2").await.unwrap().unwrap();
        assert!(bob.waist.is_nan());
        assert!(bob.hip.is_nan());
    }

    #[tokio::test]
    async fn test_append_keeps_blank_cells_blank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        fs::write(
            &path,
            "Username,Password,Phone Number,Waist Measurement,Bust Measurement,Hip Measurement\n\
             bob,pw2,,,,\n",
        )
        .unwrap();
        let table = UserTable::new(&path);

        let mut carol = user("carol", "pw3");
        carol.bust = f64::NAN;
        table.append(carol).await.unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Username,Password,Phone Number,Waist Measurement,Bust Measurement,Hip Measurement\n\
             bob,pw2,,,,\n\
             carol,pw3,555-0100,28.0,,36.0\n"
        );
    }

    #[tokio::test]
    async fn test_non_numeric_measurement_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        fs::write(
            &path,
            "Username,Password,Phone Number,Waist Measurement,Bust Measurement,Hip Measurement\n\
             alice,pw1,555,wide,34.0,36.0\n",
        )
        .unwrap();

        let err = UserTable::new(&path).all().await.unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }
}
