//! Saved playlist table operations

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::warn;

use crate::models::{Category, SavedPlaylist};

#[derive(Debug, FromRow)]
struct SavedPlaylistRow {
    id: i64,
    user_id: i64,
    category: String,
    songs: String,
    generated_at: i64,
    created_at: i64,
}

fn from_millis(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).single().unwrap_or_default()
}

impl SavedPlaylistRow {
    fn into_saved(self) -> Option<SavedPlaylist> {
        let Some(category) = Category::from_str(&self.category) else {
            warn!("Skipping saved playlist {} with unknown category {:?}", self.id, self.category);
            return None;
        };

        Some(SavedPlaylist {
            id: self.id,
            user_id: self.user_id,
            category,
            songs: serde_json::from_str(&self.songs).unwrap_or_default(),
            generated_at: from_millis(self.generated_at),
            created_at: from_millis(self.created_at),
        })
    }
}

/// Row to insert
pub struct NewSavedPlaylist<'a> {
    pub category: Category,
    pub songs: &'a [String],
    pub generated_at: DateTime<Utc>,
}

pub struct SavedPlaylistTable;

impl SavedPlaylistTable {
    /// Insert a batch in one transaction, returning the new ids in order
    pub async fn insert_many(
        pool: &SqlitePool,
        user_id: i64,
        playlists: &[NewSavedPlaylist<'_>],
        created_at: DateTime<Utc>,
    ) -> Result<Vec<i64>> {
        let mut tx = pool.begin().await?;
        let mut ids = Vec::with_capacity(playlists.len());

        for playlist in playlists {
            let songs = serde_json::to_string(playlist.songs)?;
            let result = sqlx::query(
                "INSERT INTO saved_playlists (user_id, category, songs, generated_at, created_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(user_id)
            .bind(playlist.category.as_str())
            .bind(&songs)
            .bind(playlist.generated_at.timestamp_millis())
            .bind(created_at.timestamp_millis())
            .execute(&mut *tx)
            .await?;

            ids.push(result.last_insert_rowid());
        }

        tx.commit().await?;
        Ok(ids)
    }

    /// All playlists of a user, newest first
    pub async fn get_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<SavedPlaylist>> {
        let rows: Vec<SavedPlaylistRow> = sqlx::query_as(
            "SELECT * FROM saved_playlists WHERE user_id = ? ORDER BY created_at DESC, id ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().filter_map(|r| r.into_saved()).collect())
    }

    pub async fn get_by_ids(pool: &SqlitePool, user_id: i64, ids: &[i64]) -> Result<Vec<SavedPlaylist>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT * FROM saved_playlists WHERE user_id = ? AND id IN ({}) ORDER BY id ASC",
            placeholders
        );

        let mut query = sqlx::query_as::<_, SavedPlaylistRow>(&sql).bind(user_id);
        for id in ids {
            query = query.bind(*id);
        }

        let rows = query.fetch_all(pool).await?;
        Ok(rows.into_iter().filter_map(|r| r.into_saved()).collect())
    }

    /// Delete one of the user's playlists. False when no such row is theirs.
    pub async fn delete(pool: &SqlitePool, user_id: i64, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM saved_playlists WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::engine::test_pool;
    use crate::db::UserTable;
    use crate::models::User;
    use chrono::Duration;

    async fn user(pool: &SqlitePool, name: &str) -> i64 {
        UserTable::insert(pool, &User::new(name.into(), "h".into()))
            .await
            .unwrap()
    }

    fn songs(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Artist - Song {}", i)).collect()
    }

    #[tokio::test]
    async fn test_insert_and_list_newest_first() {
        let pool = test_pool().await;
        let uid = user(&pool, "mira").await;
        let list = songs(4);
        let earlier = Utc::now() - Duration::days(1);
        let now = Utc::now();

        SavedPlaylistTable::insert_many(
            &pool,
            uid,
            &[NewSavedPlaylist { category: Category::Focus, songs: &list, generated_at: earlier }],
            earlier,
        )
        .await
        .unwrap();
        let ids = SavedPlaylistTable::insert_many(
            &pool,
            uid,
            &[
                NewSavedPlaylist { category: Category::Mix, songs: &list, generated_at: now },
                NewSavedPlaylist { category: Category::Workout, songs: &list, generated_at: now },
            ],
            now,
        )
        .await
        .unwrap();
        assert_eq!(ids.len(), 2);

        let saved = SavedPlaylistTable::get_by_user(&pool, uid).await.unwrap();
        let categories: Vec<Category> = saved.iter().map(|p| p.category).collect();
        assert_eq!(categories, vec![Category::Mix, Category::Workout, Category::Focus]);
        assert_eq!(saved[0].songs, list);

        let fetched = SavedPlaylistTable::get_by_ids(&pool, uid, &ids).await.unwrap();
        assert_eq!(fetched.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_is_owner_only() {
        let pool = test_pool().await;
        let owner = user(&pool, "mira").await;
        let other = user(&pool, "otto").await;
        let list = songs(2);
        let ids = SavedPlaylistTable::insert_many(
            &pool,
            owner,
            &[NewSavedPlaylist { category: Category::Mix, songs: &list, generated_at: Utc::now() }],
            Utc::now(),
        )
        .await
        .unwrap();

        assert!(!SavedPlaylistTable::delete(&pool, other, ids[0]).await.unwrap());
        assert!(SavedPlaylistTable::delete(&pool, owner, ids[0]).await.unwrap());
        assert!(!SavedPlaylistTable::delete(&pool, owner, ids[0]).await.unwrap());
        assert!(SavedPlaylistTable::get_by_user(&pool, owner).await.unwrap().is_empty());
    }
}
