//! Browse page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::Redirect};
use serde::Deserialize;
use threads_core::{BrowseView, Event, NavChoice, Notice, Page, SessionState};

use super::to_current_page;
use crate::error::{Result, clear_sentry_user};
use crate::filters;
use crate::middleware::Navigator;
use crate::services::catalog::{CatalogGrid, load_grid};
use crate::state::AppState;

/// Sidebar navigation form data.
#[derive(Debug, Deserialize)]
pub struct NavForm {
    pub nav: NavChoice,
}

/// One radio button of the sidebar menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Browse page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/browse.html")]
pub struct BrowseTemplate {
    pub notice: Option<Notice>,
    pub logged_in: bool,
    pub username: Option<String>,
    pub menu: Vec<MenuEntry>,
    pub saved_outfits: bool,
    /// `None` when showing saved outfits or when the catalog failed to load.
    pub grid: Option<CatalogGrid>,
}

impl BrowseTemplate {
    /// Label of the per-item button.
    #[must_use]
    pub const fn item_action(&self) -> &'static str {
        if self.logged_in {
            "Save Outfit"
        } else {
            "View Outfit"
        }
    }
}

/// Sidebar entries for the session, with the active one selected.
fn menu(session: &SessionState) -> Vec<MenuEntry> {
    let active = match session.browse_view {
        BrowseView::Catalog => NavChoice::Browse,
        BrowseView::SavedOutfits => NavChoice::SavedOutfits,
    };
    NavChoice::menu(session.logged_in)
        .iter()
        .map(|&choice| MenuEntry {
            value: choice.as_str(),
            label: choice.label(),
            selected: choice == active,
        })
        .collect()
}

/// Build the browse page.
///
/// The catalog is read on every render of the catalog view. If it cannot be
/// read the page shows the error and no grid.
pub async fn render(
    state: &AppState,
    session: &SessionState,
    notice: Option<Notice>,
) -> BrowseTemplate {
    let saved_outfits = session.browse_view == BrowseView::SavedOutfits;

    let (grid, notice) = if saved_outfits {
        (None, notice)
    } else {
        match load_grid(state.catalog()).await {
            Ok(grid) => (Some(grid), notice),
            Err(e) => {
                tracing::warn!(error = %e, path = %state.catalog().path().display(), "Catalog unavailable");
                (None, Some(Notice::error(e.to_string())))
            }
        }
    };

    BrowseTemplate {
        notice,
        logged_in: session.logged_in,
        username: session.username().map(String::from),
        menu: menu(session),
        saved_outfits,
        grid,
    }
}

/// Handle a sidebar menu choice.
pub async fn navigate(mut nav: Navigator, Form(form): Form<NavForm>) -> Result<Redirect> {
    if nav.state().current_page != Page::Browse {
        tracing::debug!(page = %nav.state().current_page, "Ignoring stale browse form");
        return Ok(to_current_page());
    }

    let was_logged_in = nav.state().logged_in;
    nav.dispatch(Event::Navigate(form.nav)).await?;
    if was_logged_in && !nav.state().logged_in {
        tracing::info!("Logged out");
        clear_sentry_user();
    }
    Ok(to_current_page())
}
