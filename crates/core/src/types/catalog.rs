//! Image catalog rows.

use serde::{Deserialize, Serialize};

/// A row of the image catalog.
///
/// Only the `ImageURL` column is read; any other columns in `images.csv` are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CatalogEntry {
    #[serde(rename = "ImageURL", default)]
    pub image_url: Option<String>,
}

impl CatalogEntry {
    /// Returns the image URL if the row has a usable one.
    ///
    /// Empty and whitespace-only cells count as absent.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Returns true if the row can be shown in the grid.
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        self.image().is_some()
    }
}
