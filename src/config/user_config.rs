//! User configuration for Loomi
//!
//! Settings live in `settings.json` inside the config directory and can be
//! overridden with `LOOMI_*` environment variables, e.g.
//! `LOOMI_LLM__API_KEY` or `LOOMI_GENERATOR__MODE=llm`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Paths;

/// Which backend builds the playlists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorMode {
    #[default]
    Heuristic,
    Llm,
}

/// Catalog search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_itunes_url")]
    pub itunes_url: String,
    /// Results per search when the caller does not ask for a limit
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            itunes_url: default_itunes_url(),
            limit: default_search_limit(),
        }
    }
}

/// Playlist generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub mode: GeneratorMode,
    /// Use the heuristic when the LLM call or its reply fails
    #[serde(default = "default_true")]
    pub fallback_to_heuristic: bool,
    /// Smallest cart that may be turned into playlists
    #[serde(default = "default_min_seeds")]
    pub min_cart_songs: usize,
    /// Largest cart a user may build
    #[serde(default = "default_max_seeds")]
    pub max_cart_songs: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            mode: GeneratorMode::Heuristic,
            fallback_to_heuristic: true,
            min_cart_songs: default_min_seeds(),
            max_cart_songs: default_max_seeds(),
        }
    }
}

/// Hosted chat-completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: default_llm_url(),
            api_key: String::new(),
            model: default_llm_model(),
            temperature: default_temperature(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Spotify credentials for track enrichment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    /// Pause between consecutive lookups
    #[serde(default = "default_lookup_delay")]
    pub lookup_delay_ms: u64,
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            lookup_delay_ms: default_lookup_delay(),
            cache_size: default_cache_size(),
        }
    }
}

impl SpotifyConfig {
    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

/// User configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Server ID used for the JWT secret and password salt
    #[serde(default)]
    pub server_id: String,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub spotify: SpotifyConfig,
}

impl UserConfig {
    /// Load configuration from file, layered with environment overrides
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        Self::load_from(&paths.settings_path())
    }

    pub(crate) fn load_from(settings_path: &Path) -> Result<Self> {
        if !settings_path.exists() {
            // first start: persist defaults and a fresh server id, never env secrets
            let config = Self {
                server_id: uuid::Uuid::new_v4().to_string(),
                ..Self::default()
            };
            config.save_to(settings_path)?;
        }

        let layered = config::Config::builder()
            .add_source(
                config::File::from(settings_path)
                    .format(config::FileFormat::Json)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("LOOMI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read settings")?;

        let config: UserConfig = layered
            .try_deserialize()
            .context("Failed to parse settings file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let paths = Paths::get()?;
        self.save_to(&paths.settings_path())
    }

    fn save_to(&self, settings_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(settings_path, content).context("Failed to write settings file")?;
        Ok(())
    }
}

// Default value functions for serde

fn default_true() -> bool {
    true
}

fn default_itunes_url() -> String {
    "https://itunes.apple.com/search".to_string()
}

fn default_search_limit() -> usize {
    20
}

fn default_min_seeds() -> usize {
    5
}

fn default_max_seeds() -> usize {
    10
}

fn default_llm_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_llm_timeout() -> u64 {
    60
}

fn default_lookup_delay() -> u64 {
    100
}

fn default_cache_size() -> usize {
    512
}
