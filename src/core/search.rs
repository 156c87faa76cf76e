//! Song search against the iTunes catalog

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{SearchConfig, MAX_SEARCH_LIMIT};
use crate::error::{LoomiError, Result};
use crate::models::Song;

/// Raw iTunes result; entries without a track id are not songs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItunesTrack {
    track_id: Option<i64>,
    #[serde(default)]
    track_name: String,
    #[serde(default)]
    artist_name: String,
    #[serde(default)]
    collection_name: String,
    #[serde(default)]
    artwork_url100: String,
    preview_url: Option<String>,
    #[serde(default)]
    track_time_millis: u64,
    #[serde(default)]
    primary_genre_name: String,
}

impl ItunesTrack {
    fn into_song(self) -> Option<Song> {
        Some(Song {
            track_id: self.track_id?,
            track_name: self.track_name,
            artist_name: self.artist_name,
            collection_name: self.collection_name,
            artwork_url100: self.artwork_url100,
            preview_url: self.preview_url,
            track_time_millis: self.track_time_millis,
            primary_genre_name: self.primary_genre_name,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItunesResponse {
    #[serde(default)]
    results: Vec<ItunesTrack>,
}

/// Search response as served by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub result_count: usize,
    pub results: Vec<Song>,
}

impl From<Vec<Song>> for SearchResults {
    fn from(results: Vec<Song>) -> Self {
        Self {
            result_count: results.len(),
            results,
        }
    }
}

pub struct SearchLib {
    client: Client,
    url: String,
    default_limit: usize,
}

impl SearchLib {
    pub fn new(config: &SearchConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            url: config.itunes_url.clone(),
            default_limit: config.limit,
        })
    }

    /// Clamp a requested limit to 1..=MAX_SEARCH_LIMIT
    pub fn effective_limit(&self, limit: Option<usize>) -> usize {
        limit
            .unwrap_or(self.default_limit)
            .clamp(1, MAX_SEARCH_LIMIT)
    }

    pub async fn search(&self, term: &str, limit: Option<usize>) -> Result<Vec<Song>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(LoomiError::InvalidQuery("search term is empty".to_string()));
        }
        let limit = self.effective_limit(limit);

        debug!("Searching iTunes for {:?} (limit {})", term, limit);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("term", term),
                ("media", "music"),
                ("entity", "song"),
                ("limit", limit.to_string().as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoomiError::Upstream(format!("iTunes search returned {}", status)));
        }

        let body: ItunesResponse = response.json().await?;
        Ok(parse_results(body))
    }
}

fn parse_results(body: ItunesResponse) -> Vec<Song> {
    body.results
        .into_iter()
        .filter_map(ItunesTrack::into_song)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_without_track_id_are_skipped() {
        let raw = r#"{
            "resultCount": 2,
            "results": [
                {"wrapperType":"track","trackId":42,"trackName":"Kesariya","artistName":"Arijit Singh",
                 "collectionName":"Brahmastra","artworkUrl100":"https://x/100.jpg",
                 "previewUrl":"https://x/p.m4a","trackTimeMillis":268000,"primaryGenreName":"Bollywood"},
                {"wrapperType":"collection","collectionName":"Some Album"}
            ]
        }"#;
        let body: ItunesResponse = serde_json::from_str(raw).unwrap();
        let songs = parse_results(body);
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].track_id, 42);
        assert_eq!(songs[0].liked_ref(), "Arijit Singh - Kesariya");
        assert_eq!(songs[0].track_time_millis, 268_000);
    }

    #[test]
    fn test_limit_is_clamped() {
        let lib = SearchLib::new(&SearchConfig::default()).unwrap();
        assert_eq!(lib.effective_limit(None), 20);
        assert_eq!(lib.effective_limit(Some(0)), 1);
        assert_eq!(lib.effective_limit(Some(500)), MAX_SEARCH_LIMIT);
    }

    #[tokio::test]
    async fn test_blank_term_is_rejected_without_a_request() {
        let lib = SearchLib::new(&SearchConfig::default()).unwrap();
        let err = lib.search("   ", None).await.unwrap_err();
        assert!(matches!(err, LoomiError::InvalidQuery(_)));
    }

    #[test]
    fn test_search_results_count() {
        let results = SearchResults::from(Vec::new());
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["resultCount"], 0);
    }
}
