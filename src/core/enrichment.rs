//! Track enrichment: artwork, album and links for generated songs

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::config::SpotifyConfig;
use crate::models::{EnrichedTrack, SongRef};
use crate::plugins::spotify::{SpotifyPlugin, TrackLookup};
use crate::utils::parsers::remove_featured;

pub struct EnrichmentLib {
    lookup: Arc<dyn TrackLookup>,
    cache: Mutex<LruCache<String, EnrichedTrack>>,
    delay: Duration,
}

fn cache_key(song_ref: &str) -> String {
    song_ref.trim().to_lowercase()
}

impl EnrichmentLib {
    pub fn new(lookup: Arc<dyn TrackLookup>, cache_size: usize, delay: Duration) -> Self {
        let size = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            lookup,
            cache: Mutex::new(LruCache::new(size)),
            delay,
        }
    }

    pub fn from_config(config: &SpotifyConfig) -> anyhow::Result<Self> {
        let plugin = SpotifyPlugin::new(config)?;
        if !plugin.enabled() {
            debug!("No Spotify credentials, enrichment will return placeholders");
        }
        Ok(Self::new(
            Arc::new(plugin),
            config.cache_size,
            Duration::from_millis(config.lookup_delay_ms),
        ))
    }

    fn cached(&self, key: &str) -> Option<EnrichedTrack> {
        self.cache.lock().get(key).cloned()
    }

    /// Look up one "Artist - Title" string. Never fails: misses and errors
    /// produce a placeholder track.
    pub async fn enrich(&self, song_ref: &str) -> EnrichedTrack {
        self.enrich_inner(song_ref).await.0
    }

    /// Returns the track and whether the remote service was asked
    async fn enrich_inner(&self, song_ref: &str) -> (EnrichedTrack, bool) {
        let key = cache_key(song_ref);
        if let Some(track) = self.cached(&key) {
            return (track, false);
        }

        let song = SongRef::parse(song_ref);
        let search = SongRef::new(song.artist.clone(), remove_featured(&song.title));

        let track = match self.lookup.lookup(&search).await {
            Ok(Some(mut track)) => {
                debug!("Matched {:?} to {} by {}", song_ref, track.name, track.artist());
                track.query = song.to_string();
                track
            }
            Ok(None) => EnrichedTrack::placeholder(&song),
            Err(e) => {
                // not cached, a later call may succeed
                warn!("Track lookup failed for {:?}: {}", song_ref, e);
                return (EnrichedTrack::placeholder(&song), true);
            }
        };

        self.cache.lock().put(key, track.clone());
        (track, true)
    }

    /// Enrich a whole playlist, sequentially, pausing between remote lookups
    pub async fn enrich_many(&self, song_refs: &[String]) -> Vec<EnrichedTrack> {
        let mut tracks = Vec::with_capacity(song_refs.len());
        let mut pause = false;

        for song_ref in song_refs {
            if pause && !self.delay.is_zero() && self.cached(&cache_key(song_ref)).is_none() {
                tokio::time::sleep(self.delay).await;
            }
            let (track, remote) = self.enrich_inner(song_ref).await;
            pause = remote;
            tracks.push(track);
        }

        tracks
    }
}
