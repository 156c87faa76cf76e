//! Playlist generation
//!
//! Two backends produce the five category playlists from a list of seed
//! songs: a catalog heuristic that works offline, and an LLM backend that
//! asks a chat model and repairs its answer. `GeneratorService` picks one
//! from config and falls back to the heuristic when the model fails.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::analysis::TasteProfile;
use super::catalog;
use crate::config::{
    GeneratorConfig, GeneratorMode, UserConfig, MAX_SEED_SONGS, PLAYLIST_MIN_SIZE,
    PLAYLIST_TARGET_SIZE,
};
use crate::error::{LoomiError, Result};
use crate::models::{Category, GeneratedPlaylist, Genre, Language};
use crate::plugins::openai::{playlist_prompt, ChatModel, OpenAiPlugin};
use crate::utils::dates::generation_id;
use crate::utils::hashing::song_key;
use crate::utils::parsers::extract_json_object;

pub const EMPTY_SEEDS_MESSAGE: &str = "Invalid or empty likedSongs array";

/// Share of the target reserved for the primary language of a multilingual user
const PRIMARY_SHARE: f64 = 0.75;
/// Most songs one genre may contribute during the primary phase
const MAX_PER_GENRE: usize = 8;
/// Most songs one genre of a secondary language may contribute
const MAX_PER_SECONDARY_GENRE: usize = 3;

#[async_trait]
pub trait PlaylistGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    /// One playlist per category, in `Category::ALL` order
    async fn generate(&self, seeds: &[String]) -> Result<Vec<GeneratedPlaylist>>;
}

/// Trim seeds and drop blank entries
pub fn validate_seeds(seeds: &[String]) -> Result<Vec<String>> {
    let cleaned: Vec<String> = seeds
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if cleaned.is_empty() {
        return Err(LoomiError::InvalidSeeds(EMPTY_SEEDS_MESSAGE.to_string()));
    }
    if cleaned.len() > MAX_SEED_SONGS {
        return Err(LoomiError::InvalidSeeds(format!(
            "At most {} liked songs are accepted, got {}",
            MAX_SEED_SONGS,
            cleaned.len()
        )));
    }

    Ok(cleaned)
}

/// Songs of one playlist under construction, unique by `song_key`
struct PlaylistBuilder {
    songs: Vec<String>,
    seen: HashSet<String>,
    target: usize,
}

impl PlaylistBuilder {
    fn new(target: usize) -> Self {
        Self {
            songs: Vec::with_capacity(target),
            seen: HashSet::new(),
            target,
        }
    }

    fn is_full(&self) -> bool {
        self.songs.len() >= self.target
    }

    fn remaining(&self) -> usize {
        self.target.saturating_sub(self.songs.len())
    }

    fn push(&mut self, song: &str) -> bool {
        if self.is_full() || !self.seen.insert(song_key(song)) {
            return false;
        }
        self.songs.push(song.to_string());
        true
    }

    /// Take up to `limit` unseen songs from `pool` in its current order
    fn take_from(&mut self, pool: &[&str], limit: usize) -> usize {
        let mut added = 0;
        for song in pool {
            if added >= limit || self.is_full() {
                break;
            }
            if self.push(song) {
                added += 1;
            }
        }
        added
    }
}

/// First occurrence of each song, by `song_key`, at most `limit` of them.
/// Blank entries are dropped and the rest trimmed.
pub fn distinct_songs<S: AsRef<str>>(songs: &[S], limit: usize) -> Vec<String> {
    let mut builder = PlaylistBuilder::new(limit.min(songs.len()));
    for song in songs {
        let song = song.as_ref().trim();
        if !song.is_empty() {
            builder.push(song);
        }
    }
    builder.songs
}

/// Offline generator sampling the curated catalog
pub struct HeuristicGenerator {
    rng: Mutex<StdRng>,
}

impl Default for HeuristicGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic shuffles, for tests and reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generate the five playlists synchronously
    pub fn build_all(&self, seeds: &[String]) -> Result<Vec<GeneratedPlaylist>> {
        let seeds = validate_seeds(seeds)?;
        let profile = TasteProfile::from_seeds(&seeds);
        let now = Utc::now();
        let run_id = generation_id(now);

        debug!(
            "Heuristic generation: {} seeds from {} artists, primary language {}, dominant genre {}, multilingual {}",
            profile.total(),
            profile.artist_count(),
            profile.primary_language().as_str(),
            profile.dominant_genre().as_str(),
            profile.is_multilingual()
        );

        let mut rng = self.rng.lock();
        let playlists = Category::ALL
            .iter()
            .enumerate()
            .map(|(index, category)| {
                let songs = build_category(&profile, *category, &mut *rng);
                GeneratedPlaylist::new(*category, songs).stamped(run_id, index, now)
            })
            .collect();

        Ok(playlists)
    }

    /// Songs for a single category
    pub fn songs_for(&self, profile: &TasteProfile, category: Category) -> Vec<String> {
        let mut rng = self.rng.lock();
        build_category(profile, category, &mut *rng)
    }
}

#[async_trait]
impl PlaylistGenerator for HeuristicGenerator {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn generate(&self, seeds: &[String]) -> Result<Vec<GeneratedPlaylist>> {
        self.build_all(seeds)
    }
}

/// Genres to draw from for a category, most wanted first.
///
/// Genres the user already listens to that exist in the primary language's
/// table lead, heaviest first, followed by the category's own preferences.
/// Only genres present in the primary language are returned.
fn ordered_genres(profile: &TasteProfile, category: Category, primary: Language) -> Vec<Genre> {
    let mut genres: Vec<Genre> = Vec::new();

    let user_genres = profile.genres_by_weight().into_iter().map(|(g, _)| g);
    for genre in user_genres.chain(category.preferred_genres().iter().copied()) {
        if catalog::has_genre(primary, genre) && !genres.contains(&genre) {
            genres.push(genre);
        }
    }

    genres
}

fn shuffled<R: Rng + ?Sized>(songs: &[&'static str], rng: &mut R) -> Vec<&'static str> {
    let mut pool = songs.to_vec();
    pool.shuffle(rng);
    pool
}

/// Split `slots` across languages proportionally to their weight, at least one each
fn split_slots(languages: &[(Language, usize)], slots: usize) -> Vec<(Language, usize)> {
    let total: usize = languages.iter().map(|(_, n)| n).sum();
    let mut left = slots;

    languages
        .iter()
        .map(|&(language, weight)| {
            let share = if total == 0 { 0 } else { slots * weight / total };
            let share = share.max(1).min(left);
            left -= share;
            (language, share)
        })
        .collect()
}

fn build_category<R: Rng + ?Sized>(
    profile: &TasteProfile,
    category: Category,
    rng: &mut R,
) -> Vec<String> {
    let primary = profile.primary_language();
    let multilingual = profile.is_multilingual();
    let mut playlist = PlaylistBuilder::new(PLAYLIST_TARGET_SIZE);

    // primary language, genre by genre
    let quota = if multilingual {
        (PLAYLIST_TARGET_SIZE as f64 * PRIMARY_SHARE).floor() as usize
    } else {
        PLAYLIST_TARGET_SIZE
    };
    let genres = ordered_genres(profile, category, primary);
    if !genres.is_empty() {
        let per_genre = MAX_PER_GENRE.min(quota / genres.len()).max(1);
        for genre in &genres {
            let room = quota.saturating_sub(playlist.songs.len());
            if room == 0 {
                break;
            }
            let pool = shuffled(catalog::songs(primary, *genre), rng);
            playlist.take_from(&pool, per_genre.min(room));
        }
    }

    // the user's other languages
    if multilingual {
        let others: Vec<(Language, usize)> = profile
            .languages_by_weight()
            .into_iter()
            .filter(|(l, _)| *l != primary)
            .collect();

        for (language, slots) in split_slots(&others, playlist.remaining()) {
            let mut lang_genres = catalog::genres(language);
            lang_genres.shuffle(rng);

            let mut added = 0;
            for genre in lang_genres {
                if added >= slots {
                    break;
                }
                let pool = shuffled(catalog::songs(language, genre), rng);
                added += playlist.take_from(&pool, MAX_PER_SECONDARY_GENRE.min(slots - added));
            }
        }
    }

    // top up: primary first, then everything else
    if !playlist.is_full() {
        let pool = shuffled(&catalog::all_songs(primary), rng);
        playlist.take_from(&pool, usize::MAX);
    }
    for language in catalog::languages().filter(|l| *l != primary) {
        if playlist.is_full() {
            break;
        }
        let pool = shuffled(&catalog::all_songs(language), rng);
        playlist.take_from(&pool, usize::MAX);
    }

    let mut songs = playlist.songs;
    songs.shuffle(rng);
    songs
}

/// Reply shape asked of the model
#[derive(Debug, Deserialize)]
struct LlmReply {
    playlists: Vec<LlmPlaylist>,
}

#[derive(Debug, Deserialize)]
struct LlmPlaylist {
    category: String,
    #[serde(default)]
    songs: Vec<String>,
}

/// Turn a raw model reply into one song list per category.
///
/// Unknown categories are dropped, songs are de-duplicated and truncated to
/// the target. A category that is missing or repeated fails the reply.
pub fn parse_llm_reply(reply: &str) -> Result<Vec<(Category, Vec<String>)>> {
    let json = extract_json_object(reply)
        .ok_or_else(|| LoomiError::MalformedReply("no JSON object in reply".to_string()))?;

    let parsed: LlmReply =
        serde_json::from_str(json).map_err(|e| LoomiError::MalformedReply(e.to_string()))?;

    let mut found: Vec<(Category, Vec<String>)> = Vec::new();
    for playlist in parsed.playlists {
        let Some(category) = Category::from_str(&playlist.category) else {
            debug!("Dropping unknown category {:?}", playlist.category);
            continue;
        };
        if found.iter().any(|(c, _)| *c == category) {
            return Err(LoomiError::MalformedReply(format!(
                "category {} appears twice",
                category
            )));
        }

        found.push((category, distinct_songs(&playlist.songs, PLAYLIST_TARGET_SIZE)));
    }

    Category::ALL
        .iter()
        .map(|category| {
            found
                .iter()
                .position(|(c, _)| c == category)
                .map(|i| found.swap_remove(i))
                .ok_or_else(|| {
                    LoomiError::MalformedReply(format!("category {} is missing", category))
                })
        })
        .collect()
}

/// Generator backed by a chat model
pub struct LlmGenerator {
    model: Arc<dyn ChatModel>,
    heuristic: Arc<HeuristicGenerator>,
}

impl LlmGenerator {
    pub fn new(model: Arc<dyn ChatModel>, heuristic: Arc<HeuristicGenerator>) -> Self {
        Self { model, heuristic }
    }
}

#[async_trait]
impl PlaylistGenerator for LlmGenerator {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn generate(&self, seeds: &[String]) -> Result<Vec<GeneratedPlaylist>> {
        let seeds = validate_seeds(seeds)?;
        let messages = playlist_prompt(&seeds, PLAYLIST_TARGET_SIZE);

        let reply = self
            .model
            .complete(&messages)
            .await
            .map_err(|e| LoomiError::Upstream(e.to_string()))?;
        let lists = parse_llm_reply(&reply)?;

        let profile = TasteProfile::from_seeds(&seeds);
        let now = Utc::now();
        let run_id = generation_id(now);

        let playlists = lists
            .into_iter()
            .enumerate()
            .map(|(index, (category, songs))| {
                let songs = if songs.len() < PLAYLIST_MIN_SIZE {
                    debug!(
                        "{} came back with {} songs, topping up from the catalog",
                        category,
                        songs.len()
                    );
                    let mut builder = PlaylistBuilder::new(PLAYLIST_TARGET_SIZE);
                    for song in &songs {
                        builder.push(song);
                    }
                    let extra = self.heuristic.songs_for(&profile, category);
                    for song in &extra {
                        builder.push(song);
                    }
                    builder.songs
                } else {
                    songs
                };
                GeneratedPlaylist::new(category, songs).stamped(run_id, index, now)
            })
            .collect();

        Ok(playlists)
    }
}

/// Picks the configured backend and applies the heuristic fallback
pub struct GeneratorService {
    heuristic: Arc<HeuristicGenerator>,
    llm: Option<LlmGenerator>,
    fallback: bool,
}

impl GeneratorService {
    pub fn new(heuristic: Arc<HeuristicGenerator>, llm: Option<LlmGenerator>, fallback: bool) -> Self {
        Self {
            heuristic,
            llm,
            fallback,
        }
    }

    /// Build from the current settings
    pub fn from_config(config: &UserConfig) -> anyhow::Result<Self> {
        let heuristic = Arc::new(HeuristicGenerator::new());
        let GeneratorConfig {
            mode,
            fallback_to_heuristic,
            ..
        } = config.generator;

        let llm = match mode {
            GeneratorMode::Heuristic => None,
            GeneratorMode::Llm => {
                let plugin = OpenAiPlugin::new(&config.llm)?;
                if !plugin.enabled() {
                    warn!("Generator mode is llm but no api key is set; requests will fall back");
                }
                Some(LlmGenerator::new(Arc::new(plugin), heuristic.clone()))
            }
        };

        Ok(Self::new(heuristic, llm, fallback_to_heuristic))
    }

    pub fn backend_name(&self) -> &'static str {
        match &self.llm {
            Some(llm) => llm.name(),
            None => self.heuristic.name(),
        }
    }

    pub async fn generate(&self, seeds: &[String]) -> Result<Vec<GeneratedPlaylist>> {
        let seeds = validate_seeds(seeds)?;

        let Some(llm) = &self.llm else {
            return self.heuristic.generate(&seeds).await;
        };

        match llm.generate(&seeds).await {
            Ok(playlists) => {
                info!("Generated {} playlists with the llm backend", playlists.len());
                Ok(playlists)
            }
            Err(e) if self.fallback => {
                warn!("LLM generation failed, using heuristic: {}", e);
                self.heuristic.generate(&seeds).await
            }
            Err(e) => Err(e),
        }
    }
}
