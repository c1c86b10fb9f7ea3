//! CLI subcommands.

pub mod catalog;
pub mod users;

use std::path::PathBuf;

use threads_web::config::{ConfigError, WebConfig};

/// Locations of the two CSV tables.
#[derive(Debug, Clone)]
pub struct TablePaths {
    pub users: PathBuf,
    pub images: PathBuf,
}

impl TablePaths {
    /// Use explicit paths where given, the site configuration otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the environment holds invalid values.
    pub fn resolve(users: Option<PathBuf>, images: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = WebConfig::from_env()?;
        Ok(Self {
            users: users.unwrap_or(config.users_csv),
            images: images.unwrap_or(config.images_csv),
        })
    }
}
