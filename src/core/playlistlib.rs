//! Saved playlist library functions

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::core::generator::distinct_songs;
use crate::db::{NewSavedPlaylist, SavedPlaylistTable};
use crate::error::{LoomiError, Result};
use crate::models::{GeneratedPlaylist, PlaylistSession, SavedPlaylist, SavedPlaylistCard};
use crate::utils::dates::{day_label, day_of, timestamp_to_relative};

/// Saved playlist library functions
pub struct PlaylistLib;

impl PlaylistLib {
    /// Persist a generation run for a user; one row per playlist
    pub async fn save_all(
        pool: &SqlitePool,
        user_id: i64,
        playlists: &[GeneratedPlaylist],
    ) -> Result<Vec<SavedPlaylist>> {
        if playlists.is_empty() {
            return Err(LoomiError::InvalidInput("No playlists to save".to_string()));
        }

        let now = Utc::now();
        let songs: Vec<Vec<String>> = playlists
            .iter()
            .map(|p| distinct_songs(&p.songs, p.songs.len()))
            .collect();
        let rows: Vec<NewSavedPlaylist> = playlists
            .iter()
            .zip(&songs)
            .map(|(p, songs)| NewSavedPlaylist {
                category: p.category,
                songs,
                generated_at: p.generated_at.unwrap_or(now),
            })
            .collect();

        let ids = SavedPlaylistTable::insert_many(pool, user_id, &rows, now).await?;
        info!("Saved {} playlists for user {}", ids.len(), user_id);

        Ok(SavedPlaylistTable::get_by_ids(pool, user_id, &ids).await?)
    }

    /// A user's saved playlists, newest first
    pub async fn list(pool: &SqlitePool, user_id: i64) -> Result<Vec<SavedPlaylist>> {
        Ok(SavedPlaylistTable::get_by_user(pool, user_id).await?)
    }

    pub async fn delete(pool: &SqlitePool, user_id: i64, id: i64) -> Result<()> {
        if !SavedPlaylistTable::delete(pool, user_id, id).await? {
            return Err(LoomiError::NotFound(format!("saved playlist {}", id)));
        }
        Ok(())
    }

    /// Group playlists by the day they were saved, newest day first.
    ///
    /// Input order is kept within a day.
    pub fn group_by_day(playlists: &[SavedPlaylist]) -> Vec<PlaylistSession> {
        let mut days: Vec<(NaiveDate, Vec<&SavedPlaylist>)> = Vec::new();

        for playlist in playlists {
            let day = day_of(playlist.created_at);
            match days.iter_mut().find(|(d, _)| *d == day) {
                Some((_, group)) => group.push(playlist),
                None => days.push((day, vec![playlist])),
            }
        }

        days.sort_by(|a, b| b.0.cmp(&a.0));

        days.into_iter()
            .map(|(day, group)| {
                let latest = group.iter().map(|p| p.created_at).max().unwrap_or_else(Utc::now);
                PlaylistSession {
                    date: day_label(day),
                    relative: timestamp_to_relative(latest),
                    playlists: group.into_iter().map(SavedPlaylistCard::from).collect(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::engine::test_pool;
    use crate::db::UserTable;
    use crate::models::{Category, User};
    use chrono::{Duration, TimeZone};

    fn saved(id: i64, category: Category, created_at: chrono::DateTime<Utc>, songs: usize) -> SavedPlaylist {
        SavedPlaylist {
            id,
            user_id: 1,
            category,
            songs: (0..songs).map(|i| format!("A - {}", i)).collect(),
            generated_at: created_at,
            created_at,
        }
    }

    #[test]
    fn test_group_by_day() {
        let monday = Utc.with_ymd_and_hms(2026, 10, 12, 9, 0, 0).unwrap();
        let tuesday = Utc.with_ymd_and_hms(2026, 10, 13, 18, 30, 0).unwrap();
        let list = vec![
            saved(1, Category::Mix, monday, 25),
            saved(2, Category::Focus, tuesday, 2),
            saved(3, Category::Workout, monday, 25),
        ];

        let sessions = PlaylistLib::group_by_day(&list);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].date, "Tue Oct 13 2026");
        assert_eq!(sessions[0].playlists.len(), 1);
        assert_eq!(sessions[0].playlists[0].more, 0);
        assert_eq!(sessions[1].date, "Mon Oct 12 2026");
        let ids: Vec<i64> = sessions[1].playlists.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(sessions[1].playlists[0].preview.len(), 3);
        assert_eq!(sessions[1].playlists[0].more, 22);
    }

    #[test]
    fn test_group_empty() {
        assert!(PlaylistLib::group_by_day(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_save_list_delete() {
        let pool = test_pool().await;
        let uid = UserTable::insert(&pool, &User::new("mira".into(), "h".into()))
            .await
            .unwrap();

        let at = Utc::now() - Duration::minutes(5);
        let generated: Vec<GeneratedPlaylist> = Category::ALL
            .iter()
            .enumerate()
            .map(|(i, c)| {
                GeneratedPlaylist::new(*c, vec![format!("A - {}", i)]).stamped(1, i, at)
            })
            .collect();

        let saved = PlaylistLib::save_all(&pool, uid, &generated).await.unwrap();
        assert_eq!(saved.len(), 5);
        assert_eq!(saved[0].category, Category::Mix);
        assert_eq!(saved[0].generated_at.timestamp_millis(), at.timestamp_millis());

        let listed = PlaylistLib::list(&pool, uid).await.unwrap();
        assert_eq!(listed.len(), 5);

        PlaylistLib::delete(&pool, uid, saved[0].id).await.unwrap();
        let err = PlaylistLib::delete(&pool, uid, saved[0].id).await.unwrap_err();
        assert!(matches!(err, LoomiError::NotFound(_)));
        assert_eq!(PlaylistLib::list(&pool, uid).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_save_drops_repeated_songs() {
        let pool = test_pool().await;
        let uid = UserTable::insert(&pool, &User::new("ines".into(), "h".into()))
            .await
            .unwrap();

        let playlist = GeneratedPlaylist::new(
            Category::Focus,
            vec!["A - B".into(), "A - B".into(), "a - b".into(), "C - D".into()],
        );
        let saved = PlaylistLib::save_all(&pool, uid, &[playlist]).await.unwrap();
        assert_eq!(saved[0].songs, vec!["A - B", "C - D"]);

        let listed = PlaylistLib::list(&pool, uid).await.unwrap();
        assert_eq!(listed[0].songs, vec!["A - B", "C - D"]);
    }

    #[tokio::test]
    async fn test_save_nothing_is_rejected() {
        let pool = test_pool().await;
        assert!(PlaylistLib::save_all(&pool, 1, &[]).await.is_err());
    }
}
