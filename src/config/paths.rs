//! Path management for Loomi
//!
//! Everything Loomi writes lives under a single config directory.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static PATHS: OnceCell<Arc<Paths>> = OnceCell::new();

/// Manages all filesystem paths for the application
#[derive(Debug, Clone)]
pub struct Paths {
    /// Config directory path
    config_dir: PathBuf,
}

impl Paths {
    /// Initialize the paths singleton
    pub fn init(config: Option<PathBuf>) -> Result<Arc<Paths>> {
        let paths = PATHS.get_or_try_init(|| {
            let paths = Self::new(config)?;
            Ok::<_, anyhow::Error>(Arc::new(paths))
        })?;
        Ok(Arc::clone(paths))
    }

    /// Get the global paths instance
    pub fn get() -> Result<Arc<Paths>> {
        PATHS.get().map(Arc::clone).context("Paths not initialized")
    }

    /// Resolve the config directory and make sure it exists.
    ///
    /// An explicit parent gets a `loomi/` child, or `.loomi/` when the
    /// parent is the user's home directory.
    pub(crate) fn new(parent: Option<PathBuf>) -> Result<Self> {
        let config_dir = match parent {
            Some(dir) if is_home_dir(&dir) => dir.join(".loomi"),
            Some(dir) => dir.join("loomi"),
            None => directories::ProjectDirs::from("", "", "loomi")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("loomi")),
        };

        for dir in [config_dir.clone(), config_dir.join("carts")] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// SQLite database file
    pub fn app_db_path(&self) -> PathBuf {
        self.config_dir.join("loomi.db")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Directory holding consented, locally persisted carts
    pub fn carts_dir(&self) -> PathBuf {
        self.config_dir.join("carts")
    }
}

fn is_home_dir(path: &Path) -> bool {
    directories::UserDirs::new()
        .map(|dirs| path == dirs.home_dir())
        .unwrap_or(false)
}
