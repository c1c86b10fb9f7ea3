//! Catalog layout for the browse page.

use threads_core::{GRID_COLUMNS, partition};

use crate::store::StoreError;
use crate::store::catalog::CatalogTable;

/// A catalog image placed in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Row index in `images.csv`, used to key the item's button.
    pub index: usize,
    pub image_url: String,
}

/// The catalog laid out in rows of [`GRID_COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogGrid {
    pub rows: Vec<Vec<Tile>>,
    /// Rows of the table skipped for lacking an image.
    pub skipped: usize,
}

impl CatalogGrid {
    /// Total number of tiles across all rows.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Number of columns per row.
    #[must_use]
    pub const fn columns(&self) -> usize {
        GRID_COLUMNS
    }
}

/// Load the catalog and lay it out for display.
///
/// # Errors
///
/// Returns any `StoreError` from loading the catalog.
pub async fn load_grid(catalog: &CatalogTable) -> Result<CatalogGrid, StoreError> {
    let entries = catalog.entries().await?;
    let rows: Vec<Vec<Tile>> = partition(&entries)
        .into_iter()
        .map(|row| {
            row.items
                .into_iter()
                .map(|item| Tile {
                    index: item.index,
                    image_url: item.image_url.to_owned(),
                })
                .collect()
        })
        .collect();

    let grid = CatalogGrid {
        skipped: entries.len() - rows.iter().map(Vec::len).sum::<usize>(),
        rows,
    };
    tracing::debug!(
        tiles = grid.tile_count(),
        skipped = grid.skipped,
        "Catalog grid built"
    );
    Ok(grid)
}
