//! Configuration module for Loomi
//!
//! This module contains the application configuration structures and path management.

mod paths;
mod user_config;

pub use paths::Paths;
pub use user_config::{
    GeneratorConfig, GeneratorMode, LlmConfig, SearchConfig, SpotifyConfig, UserConfig,
};

/// Number of songs a generated playlist aims for
pub const PLAYLIST_TARGET_SIZE: usize = 25;

/// Fewest songs a generated playlist may hold
pub const PLAYLIST_MIN_SIZE: usize = 20;

/// Upper bound on seed strings accepted by the generator endpoint
pub const MAX_SEED_SONGS: usize = 50;

/// Hard cap on catalog search results
pub const MAX_SEARCH_LIMIT: usize = 50;
