//! Spotify Web API client (client-credentials flow)

use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::SpotifyConfig;
use crate::models::{EnrichedTrack, SongRef};

const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_SEARCH_URL: &str = "https://api.spotify.com/v1/search";

/// Refresh this long before the token actually expires
const TOKEN_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
struct SpotifyTrack {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<SpotifyArtist>,
    album: Option<SpotifyAlbum>,
    preview_url: Option<String>,
    #[serde(default)]
    duration_ms: u64,
    #[serde(default)]
    external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
struct SpotifyArtist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SpotifyAlbum {
    name: String,
    #[serde(default)]
    images: Vec<SpotifyImage>,
}

#[derive(Debug, Deserialize)]
struct SpotifyImage {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

impl SpotifyTrack {
    fn into_enriched(self, query: &str) -> EnrichedTrack {
        let (album, images) = match self.album {
            Some(album) => (album.name, album.images.into_iter().map(|i| i.url).collect()),
            None => (String::new(), Vec::new()),
        };
        let external_url = self
            .external_urls
            .spotify
            .unwrap_or_else(|| format!("https://open.spotify.com/track/{}", self.id));

        EnrichedTrack {
            id: self.id,
            name: self.name,
            artists: self.artists.into_iter().map(|a| a.name).collect(),
            album,
            images,
            preview_url: self.preview_url,
            duration_ms: self.duration_ms,
            external_url,
            query: query.to_string(),
            placeholder: false,
        }
    }
}

/// Finds streaming metadata for one song
#[async_trait]
pub trait TrackLookup: Send + Sync {
    /// `Ok(None)` when the service has no match
    async fn lookup(&self, song: &SongRef) -> Result<Option<EnrichedTrack>>;
}

pub struct SpotifyPlugin {
    client: Client,
    client_id: String,
    client_secret: String,
    token: RwLock<Option<CachedToken>>,
}

impl SpotifyPlugin {
    pub fn new(config: &SpotifyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("Failed to build Spotify http client")?;

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token: RwLock::new(None),
        })
    }

    pub fn enabled(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// Cached access token, fetched again shortly before expiry
    async fn access_token(&self) -> Result<String> {
        {
            let cached = self.token.read().await;
            if let Some(token) = cached.as_ref() {
                if Instant::now() < token.expires_at {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.token.write().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.token.clone());
            }
        }

        debug!("Requesting Spotify access token");
        let response = self
            .client
            .post(SPOTIFY_TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .context("Spotify token request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("Spotify token request returned {}", response.status()));
        }

        let body: TokenResponse = response
            .json()
            .await
            .context("Failed to decode Spotify token")?;

        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(TOKEN_MARGIN);
        *cached = Some(CachedToken {
            token: body.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(body.access_token)
    }
}

/// `track:{title} artist:{artist}` search expression
pub fn search_query(song: &SongRef) -> String {
    match &song.artist {
        Some(artist) => format!("track:{} artist:{}", song.title, artist),
        None => format!("track:{}", song.title),
    }
}

#[async_trait]
impl TrackLookup for SpotifyPlugin {
    async fn lookup(&self, song: &SongRef) -> Result<Option<EnrichedTrack>> {
        if !self.enabled() {
            return Ok(None);
        }

        let token = self.access_token().await?;
        let response = self
            .client
            .get(SPOTIFY_SEARCH_URL)
            .bearer_auth(token)
            .query(&[
                ("q", search_query(song).as_str()),
                ("type", "track"),
                ("limit", "1"),
            ])
            .send()
            .await
            .context("Spotify search failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("Spotify search returned {}", response.status()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .context("Failed to decode Spotify search")?;

        let query = song.to_string();
        Ok(body
            .tracks
            .and_then(|page| page.items.into_iter().next())
            .map(|track| track.into_enriched(&query)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query() {
        assert_eq!(
            search_query(&SongRef::parse("Daft Punk - One More Time")),
            "track:One More Time artist:Daft Punk"
        );
        assert_eq!(search_query(&SongRef::parse("Intro")), "track:Intro");
    }

    #[test]
    fn test_track_mapping() {
        let raw = r#"{"tracks":{"items":[{
            "id":"abc","name":"Kesariya",
            "artists":[{"name":"Arijit Singh"},{"name":"Pritam"}],
            "album":{"name":"Brahmastra","images":[{"url":"https://i/640"},{"url":"https://i/300"}]},
            "preview_url":null,"duration_ms":268000,
            "external_urls":{"spotify":"https://open.spotify.com/track/abc"}
        }]}}"#;
        let body: SearchResponse = serde_json::from_str(raw).unwrap();
        let track = body.tracks.unwrap().items.into_iter().next().unwrap();
        let enriched = track.into_enriched("Arijit Singh - Kesariya");
        assert_eq!(enriched.artist(), "Arijit Singh, Pritam");
        assert_eq!(enriched.images[0], "https://i/640");
        assert!(!enriched.placeholder);
        assert_eq!(enriched.external_url, "https://open.spotify.com/track/abc");
    }

    #[tokio::test]
    async fn test_disabled_lookup_finds_nothing() {
        let plugin = SpotifyPlugin::new(&SpotifyConfig::default()).unwrap();
        let found = plugin.lookup(&SongRef::parse("A - B")).await.unwrap();
        assert!(found.is_none());
    }
}
