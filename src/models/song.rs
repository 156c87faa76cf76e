//! Song model
//!
//! Field names follow the iTunes Search wire format so search results can be
//! handed straight back to clients and into the cart.

use serde::{Deserialize, Serialize};

/// A catalog search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub track_id: i64,
    pub track_name: String,
    pub artist_name: String,
    /// Album
    #[serde(default)]
    pub collection_name: String,
    #[serde(default)]
    pub artwork_url100: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub track_time_millis: u64,
    #[serde(default)]
    pub primary_genre_name: String,
}

impl Song {
    /// "Artist - Title" seed string
    pub fn liked_ref(&self) -> String {
        SongRef::new(Some(self.artist_name.clone()), self.track_name.clone()).to_string()
    }
}

/// Parsed "Artist - Title" string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRef {
    pub artist: Option<String>,
    pub title: String,
}

impl SongRef {
    pub fn new(artist: Option<String>, title: String) -> Self {
        Self { artist, title }
    }

    /// Split on the first `" - "`. Without a separator the whole string is the title.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.split_once(" - ") {
            Some((artist, title)) if !artist.trim().is_empty() => Self {
                artist: Some(artist.trim().to_string()),
                title: title.trim().to_string(),
            },
            Some((_, title)) => Self {
                artist: None,
                title: title.trim().to_string(),
            },
            None => Self {
                artist: None,
                title: raw.to_string(),
            },
        }
    }

    pub fn artist_or_empty(&self) -> &str {
        self.artist.as_deref().unwrap_or("")
    }
}

impl std::fmt::Display for SongRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.artist {
            Some(artist) => write!(f, "{} - {}", artist, self.title),
            None => f.write_str(&self.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_artist() {
        let r = SongRef::parse("Arctic Monkeys - Do I Wanna Know?");
        assert_eq!(r.artist.as_deref(), Some("Arctic Monkeys"));
        assert_eq!(r.title, "Do I Wanna Know?");
    }

    #[test]
    fn test_parse_splits_on_first_separator() {
        let r = SongRef::parse("Fall Out Boy - Sugar - We're Goin Down");
        assert_eq!(r.artist.as_deref(), Some("Fall Out Boy"));
        assert_eq!(r.title, "Sugar - We're Goin Down");
    }

    #[test]
    fn test_parse_without_artist() {
        let r = SongRef::parse("Hoppípolla");
        assert_eq!(r.artist, None);
        assert_eq!(r.title, "Hoppípolla");
        assert_eq!(r.to_string(), "Hoppípolla");
    }

    #[test]
    fn test_song_from_itunes_json() {
        let json = r#"{
            "wrapperType": "track",
            "trackId": 1440818839,
            "trackName": "Kesariya",
            "artistName": "Arijit Singh",
            "collectionName": "Brahmastra",
            "artworkUrl100": "https://example.com/100x100bb.jpg",
            "trackTimeMillis": 268000,
            "primaryGenreName": "Bollywood"
        }"#;
        let song: Song = serde_json::from_str(json).unwrap();
        assert_eq!(song.track_id, 1440818839);
        assert_eq!(song.preview_url, None);
        assert_eq!(song.liked_ref(), "Arijit Singh - Kesariya");
    }
}
