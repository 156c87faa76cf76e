//! Enriched track model

use serde::{Deserialize, Serialize};

use super::SongRef;

pub const PLACEHOLDER_ARTWORK: &str = "https://via.placeholder.com/300x300";
pub const PLACEHOLDER_DURATION_MS: u64 = 180_000;

/// Display metadata for one "Artist - Title" entry of a playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    /// Album artwork, largest first
    pub images: Vec<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    pub duration_ms: u64,
    pub external_url: String,
    /// The song ref this track was looked up for
    pub query: String,
    /// True when no streaming-service match was found
    #[serde(default)]
    pub placeholder: bool,
}

impl EnrichedTrack {
    /// Stand-in used whenever a lookup is impossible or fails
    pub fn placeholder(song: &SongRef) -> Self {
        let query = song.to_string();
        let id = format!("placeholder-{}", crate::utils::hashing::short_hash(&query));
        let search = format!(
            "https://open.spotify.com/search/{}",
            crate::utils::parsers::url_encode(&query)
        );

        Self {
            id,
            name: song.title.clone(),
            artists: vec![song
                .artist
                .clone()
                .unwrap_or_else(|| "Unknown Artist".to_string())],
            album: "Unknown Album".to_string(),
            images: vec![PLACEHOLDER_ARTWORK.to_string()],
            preview_url: None,
            duration_ms: PLACEHOLDER_DURATION_MS,
            external_url: search,
            query,
            placeholder: true,
        }
    }

    /// Comma-joined artist names
    pub fn artist(&self) -> String {
        self.artists.join(", ")
    }
}
