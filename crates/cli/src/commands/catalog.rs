//! Catalog commands.

use threads_web::services::catalog::{CatalogGrid, load_grid};
use threads_web::store::StoreError;
use threads_web::store::catalog::CatalogTable;
use tracing::info;

use super::TablePaths;

/// Summarize the grid as row sizes, e.g. `[3, 3, 1]`.
fn shape(grid: &CatalogGrid) -> Vec<usize> {
    grid.rows.iter().map(Vec::len).collect()
}

/// Report how the browse page will lay out the catalog.
///
/// # Errors
///
/// Returns `StoreError` if the catalog is missing, malformed or lacks an
/// `ImageURL` column.
#[allow(clippy::print_stdout)]
pub async fn check(paths: &TablePaths) -> Result<CatalogGrid, StoreError> {
    let grid = load_grid(&CatalogTable::new(paths.images.clone())).await?;
    info!(path = %paths.images.display(), "Catalog loaded");

    println!(
        "{} displayable images, {} skipped, {} grid rows {:?}",
        grid.tile_count(),
        grid.skipped,
        grid.rows.len(),
        shape(&grid)
    );
    Ok(grid)
}
