//! Cart store - in-memory playlist carts, persisted only with consent

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{PlaylistCart, Song, User};

/// Per-user carts keyed by user id
pub struct CartStore {
    carts: DashMap<i64, PlaylistCart>,
    /// Directory for `{userid}.json`; `None` keeps carts in memory only
    dir: Option<PathBuf>,
    capacity: usize,
}

impl CartStore {
    pub fn new(dir: Option<PathBuf>, capacity: usize) -> Self {
        Self {
            carts: DashMap::new(),
            dir,
            capacity,
        }
    }

    fn file_for(&self, user_id: i64) -> Option<PathBuf> {
        self.dir.as_ref().map(|d| d.join(format!("{}.json", user_id)))
    }

    /// Read a persisted cart; a missing or unreadable file yields an empty cart
    fn load_from_disk(&self, user: &User) -> PlaylistCart {
        let mut cart = PlaylistCart::with_capacity(self.capacity);
        if !user.allows_local_storage() {
            return cart;
        }
        let Some(path) = self.file_for(user.id) else {
            return cart;
        };
        if !path.exists() {
            return cart;
        }

        match fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|raw| serde_json::from_str::<PlaylistCart>(&raw).map_err(Into::into))
        {
            Ok(mut stored) => {
                stored.set_capacity(self.capacity);
                debug!("Restored cart for user {} ({} songs)", user.id, stored.len());
                cart = stored;
            }
            Err(e) => warn!("Ignoring unreadable cart file {:?}: {}", path, e),
        }
        cart
    }

    fn persist(&self, user: &User, cart: &PlaylistCart) -> Result<()> {
        if !user.allows_local_storage() {
            return Ok(());
        }
        let Some(path) = self.file_for(user.id) else {
            return Ok(());
        };

        let content = serde_json::to_string(cart).context("Failed to serialize cart")?;
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(())
    }

    /// Run `f` on a copy of the user's cart, loading it first when cold.
    /// The copy replaces the stored cart only once it has been persisted.
    fn with_cart<T>(&self, user: &User, f: impl FnOnce(&mut PlaylistCart) -> Result<T>) -> Result<T> {
        let mut entry = self
            .carts
            .entry(user.id)
            .or_insert_with(|| self.load_from_disk(user));
        let mut cart = entry.value().clone();
        let result = f(&mut cart)?;
        self.persist(user, &cart)?;
        *entry.value_mut() = cart;
        Ok(result)
    }

    /// Snapshot of the user's cart
    pub fn get(&self, user: &User) -> PlaylistCart {
        self.carts
            .entry(user.id)
            .or_insert_with(|| self.load_from_disk(user))
            .clone()
    }

    /// Add a song; false when it was already in the cart
    pub fn add(&self, user: &User, song: Song) -> Result<bool> {
        self.with_cart(user, |cart| cart.add(song))
    }

    /// Remove a song; false when it was not in the cart
    pub fn remove(&self, user: &User, track_id: i64) -> Result<bool> {
        self.with_cart(user, |cart| Ok(cart.remove(track_id)))
    }

    pub fn clear(&self, user: &User) -> Result<()> {
        self.with_cart(user, |cart| {
            cart.clear();
            Ok(())
        })
    }

    /// React to a consent change: accepting writes the current cart out,
    /// declining deletes any stored copy.
    pub fn apply_consent(&self, user: &User) -> Result<()> {
        let Some(path) = self.file_for(user.id) else {
            return Ok(());
        };

        if user.allows_local_storage() {
            let cart = self
                .carts
                .get(&user.id)
                .map(|c| c.clone())
                .unwrap_or_else(|| PlaylistCart::with_capacity(self.capacity));
            self.persist(user, &cart)
        } else {
            if path.exists() {
                fs::remove_file(&path).with_context(|| format!("Failed to remove {:?}", path))?;
                debug!("Deleted stored cart for user {}", user.id);
            }
            Ok(())
        }
    }
}
