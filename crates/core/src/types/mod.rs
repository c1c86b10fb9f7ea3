//! Core types for Threads in the Matrix.
//!
//! This module provides the rows stored in the CSV tables and the closed set
//! of pages the site can show.

pub mod catalog;
pub mod page;
pub mod user;

pub use catalog::CatalogEntry;
pub use page::{Page, PageError};
pub use user::{SignupInput, UserRecord};
