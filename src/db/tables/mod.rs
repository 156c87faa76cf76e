//! Database table operations

mod saved_playlist_table;
mod user_table;

pub use saved_playlist_table::{NewSavedPlaylist, SavedPlaylistTable};
pub use user_table::UserTable;
