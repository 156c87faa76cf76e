//! Playlist models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// A playlist produced by a generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlaylist {
    pub category: Category,
    /// Ordered "Artist - Title" strings
    pub songs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl GeneratedPlaylist {
    pub fn new(category: Category, songs: Vec<String>) -> Self {
        Self {
            category,
            songs,
            description: Some(category.description().to_string()),
            generated_at: None,
            id: None,
        }
    }

    /// Stamp the playlist with its generation run
    pub fn stamped(mut self, generation_id: i64, index: usize, at: DateTime<Utc>) -> Self {
        self.id = Some(format!("{}-{}-{}", self.category.slug(), generation_id, index));
        self.generated_at = Some(at);
        self
    }
}

/// A generated playlist persisted for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlaylist {
    /// Database ID
    pub id: i64,
    pub user_id: i64,
    pub category: Category,
    pub songs: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SavedPlaylist {
    /// First songs shown on a saved playlist card
    pub fn preview(&self, count: usize) -> &[String] {
        &self.songs[..self.songs.len().min(count)]
    }

    /// Songs hidden behind "+N more"
    pub fn remaining(&self, count: usize) -> usize {
        self.songs.len().saturating_sub(count)
    }
}

/// Saved playlists of one generation session, grouped by day
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSession {
    /// e.g. "Fri Oct 16 2026"
    pub date: String,
    /// e.g. "2 hours ago"
    pub relative: String,
    pub playlists: Vec<SavedPlaylistCard>,
}

/// Compact view of a saved playlist
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlaylistCard {
    pub id: i64,
    pub category: Category,
    pub song_count: usize,
    pub preview: Vec<String>,
    pub more: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&SavedPlaylist> for SavedPlaylistCard {
    fn from(playlist: &SavedPlaylist) -> Self {
        Self {
            id: playlist.id,
            category: playlist.category,
            song_count: playlist.songs.len(),
            preview: playlist.preview(3).to_vec(),
            more: playlist.remaining(3),
            created_at: playlist.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamped_id_format() {
        let at = Utc::now();
        let playlist = GeneratedPlaylist::new(Category::Workout, vec![]).stamped(1700000000000, 4, at);
        assert_eq!(playlist.id.as_deref(), Some("workout-1700000000000-4"));
        assert_eq!(playlist.generated_at, Some(at));
        assert_eq!(playlist.description.as_deref(), Some("High-energy exercise music"));
    }

    #[test]
    fn test_generated_playlist_wire_format() {
        let json = r#"{"category":"Focus","songs":["Tycho - A Walk"]}"#;
        let playlist: GeneratedPlaylist = serde_json::from_str(json).unwrap();
        assert_eq!(playlist.category, Category::Focus);
        assert!(playlist.id.is_none());

        let out = serde_json::to_value(&playlist).unwrap();
        assert!(out.get("generatedAt").is_none());
        assert_eq!(out["songs"][0], "Tycho - A Walk");
    }

    #[test]
    fn test_card_preview() {
        let saved = SavedPlaylist {
            id: 1,
            user_id: 1,
            category: Category::Mix,
            songs: (0..5).map(|i| format!("A - {}", i)).collect(),
            generated_at: Utc::now(),
            created_at: Utc::now(),
        };
        let card = SavedPlaylistCard::from(&saved);
        assert_eq!(card.preview.len(), 3);
        assert_eq!(card.more, 2);
        assert_eq!(card.song_count, 5);
    }
}
