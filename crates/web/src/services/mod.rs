//! Business logic services for the site.
//!
//! # Services
//!
//! - `auth` - Credential checks against the user table and account signup
//! - `catalog` - Loading the catalog and laying it out for the browse page

pub mod auth;
pub mod catalog;
