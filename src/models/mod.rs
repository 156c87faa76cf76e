//! Data models for Loomi
//!
//! This module contains all the core data structures used throughout the application.

mod cart;
mod enums;
mod playlist;
mod song;
mod track;
mod user;

pub use cart::{CartSummary, PlaylistCart};
pub use enums::{Category, ConsentState, Genre, Language};
pub use playlist::{GeneratedPlaylist, PlaylistSession, SavedPlaylist, SavedPlaylistCard};
pub use song::{Song, SongRef};
pub use track::EnrichedTrack;
pub use user::{PublicUser, User};
