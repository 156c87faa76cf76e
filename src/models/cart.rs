//! Playlist cart model: the seed songs a user has picked

use serde::{Deserialize, Serialize};

use super::Song;
use crate::error::{LoomiError, Result};
use crate::utils::dates::{format_duration, format_total_duration};

fn default_capacity() -> usize {
    10
}

/// Ordered list of liked songs, unique by track id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistCart {
    songs: Vec<Song>,
    #[serde(skip, default = "default_capacity")]
    capacity: usize,
}

impl Default for PlaylistCart {
    fn default() -> Self {
        Self::with_capacity(default_capacity())
    }
}

impl PlaylistCart {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            songs: Vec::new(),
            capacity,
        }
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    /// Add a song. Returns false when it is already in the cart.
    pub fn add(&mut self, song: Song) -> Result<bool> {
        if self.contains(song.track_id) {
            return Ok(false);
        }
        if self.songs.len() >= self.capacity {
            return Err(LoomiError::CartFull(self.capacity));
        }
        self.songs.push(song);
        Ok(true)
    }

    /// Remove a song by track id. Returns false when it was not there.
    pub fn remove(&mut self, track_id: i64) -> bool {
        let before = self.songs.len();
        self.songs.retain(|s| s.track_id != track_id);
        self.songs.len() != before
    }

    pub fn contains(&self, track_id: i64) -> bool {
        self.songs.iter().any(|s| s.track_id == track_id)
    }

    pub fn clear(&mut self) {
        self.songs.clear();
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Seed strings handed to the generator
    pub fn liked_songs(&self) -> Vec<String> {
        self.songs.iter().map(Song::liked_ref).collect()
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.songs.iter().map(|s| s.track_time_millis).sum()
    }

    /// Between `min` songs and the cart's capacity
    pub fn ready_for_generation(&self, min: usize) -> bool {
        (min..=self.capacity).contains(&self.songs.len())
    }

    /// Seed list, or `NotEnoughSeeds` when the cart is below `min`
    pub fn seeds_for_generation(&self, min: usize) -> Result<Vec<String>> {
        if !self.ready_for_generation(min) {
            return Err(LoomiError::NotEnoughSeeds {
                required: min,
                have: self.songs.len(),
            });
        }
        Ok(self.liked_songs())
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            songs: self
                .songs
                .iter()
                .map(|s| CartEntry {
                    duration: format_duration(s.track_time_millis),
                    song: s.clone(),
                })
                .collect(),
            count: self.songs.len(),
            capacity: self.capacity,
            total_duration: format_total_duration(self.total_duration_ms()),
        }
    }
}

/// API view of a cart
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub songs: Vec<CartEntry>,
    pub count: usize,
    pub capacity: usize,
    pub total_duration: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub song: Song,
    pub duration: String,
}
