//! The pages a session can be on.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown page name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid page: {0}")]
pub struct PageError(pub String);

/// One of the four screens of the site.
///
/// Every session is on exactly one page at a time; the web layer dispatches
/// rendering with an exhaustive `match` on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Landing page with Sign Up / Sign In / View Once.
    #[default]
    Front,
    /// Account creation form.
    Signup,
    /// Username/password form.
    Login,
    /// Catalog grid with the sidebar menu.
    Browse,
}

impl Page {
    /// All pages, in menu order.
    pub const ALL: [Self; 4] = [Self::Front, Self::Signup, Self::Login, Self::Browse];

    /// Returns the page name as used in logs and form values.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Signup => "signup",
            Self::Login => "login",
            Self::Browse => "browse",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Page {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(Self::Front),
            "signup" => Ok(Self::Signup),
            "login" => Ok(Self::Login),
            "browse" => Ok(Self::Browse),
            _ => Err(PageError(s.to_owned())),
        }
    }
}
