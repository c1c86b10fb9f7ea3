//! Fixed-width grid layout for the catalog.

use crate::types::CatalogEntry;

/// Number of items per grid row.
pub const GRID_COLUMNS: usize = 3;

/// One row of the browse grid.
///
/// Items keep their position in the catalog so the web layer can key the
/// per-item buttons on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow<'a> {
    pub items: Vec<GridItem<'a>>,
}

/// A displayable catalog entry and its index in the unfiltered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridItem<'a> {
    pub index: usize,
    pub image_url: &'a str,
}

/// Filter the catalog to rows with an image and split them into rows of
/// [`GRID_COLUMNS`].
///
/// Order is preserved. For `n` displayable entries the result has
/// `n.div_ceil(GRID_COLUMNS)` rows, all full except possibly the last.
#[must_use]
pub fn partition(entries: &[CatalogEntry]) -> Vec<GridRow<'_>> {
    let items: Vec<GridItem<'_>> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| entry.image().map(|image_url| GridItem { index, image_url }))
        .collect();

    items
        .chunks(GRID_COLUMNS)
        .map(|chunk| GridRow {
            items: chunk.to_vec(),
        })
        .collect()
}
