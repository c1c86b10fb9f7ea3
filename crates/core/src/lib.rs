//! Threads in the Matrix Core - Shared types library.
//!
//! This crate provides the domain model used by every Threads component:
//! - `web` - The outfit browsing site (signup, login, catalog grid)
//! - `cli` - Command-line tools for inspecting and seeding the CSV tables
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no file access,
//! no HTTP. Page navigation is modelled as a state machine over
//! [`SessionState`] so that every transition can be tested without a server.
//!
//! # Modules
//!
//! - [`types`] - User records, catalog entries and the page enum
//! - [`session`] - Per-browser session state and the navigation state machine
//! - [`grid`] - Fixed-width partitioning of catalog entries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod grid;
pub mod session;
pub mod types;

pub use grid::{GRID_COLUMNS, GridItem, GridRow, partition};
pub use session::{BrowseView, Event, NavChoice, Notice, NoticeKind, SessionState};
pub use types::*;
