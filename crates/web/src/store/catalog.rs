//! Image catalog access.

use std::path::{Path, PathBuf};

use threads_core::CatalogEntry;

use super::{StoreError, blocking, read_table};

/// Column holding the image reference.
pub const IMAGE_URL_COLUMN: &str = "ImageURL";

/// Handle to the read-only image catalog.
#[derive(Debug, Clone)]
pub struct CatalogTable {
    path: PathBuf,
}

impl CatalogTable {
    /// Create a handle for the catalog at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing CSV file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every catalog row, in file order, including rows without an image.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the file is missing,
    /// `StoreError::MissingColumn` if it has no `ImageURL` column and
    /// `StoreError::Parse` if it is malformed.
    pub async fn entries(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        let path = self.path.clone();
        blocking(move || {
            let table = read_table(&path)?;
            if !table.has_column(IMAGE_URL_COLUMN) {
                return Err(StoreError::MissingColumn(IMAGE_URL_COLUMN));
            }
            table.deserialize()
        })
        .await
    }
}
