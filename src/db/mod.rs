//! Database module for Loomi
//!
//! SQLite through SQLx: accounts and saved playlists.

pub(crate) mod engine;
mod migrations;
pub mod tables;

pub use engine::{setup_sqlite, DbEngine};
pub use migrations::run_migrations;
pub use tables::*;
