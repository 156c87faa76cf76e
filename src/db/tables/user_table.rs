//! User table operations

use anyhow::Result;
use chrono::{TimeZone, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::models::{ConsentState, User};

/// Database row for user table
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    consent: Option<String>,
    created_at: i64,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            password: self.password,
            consent: self.consent.as_deref().and_then(ConsentState::from_str),
            created_at: Utc
                .timestamp_millis_opt(self.created_at)
                .single()
                .unwrap_or_default(),
        }
    }
}

const SELECT_USER: &str = "SELECT id, username, password, consent, created_at FROM user";

/// User table operations
pub struct UserTable;

impl UserTable {
    /// Get user by ID
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_USER))
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|r| r.into_user()))
    }

    /// Get user by username
    pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("{} WHERE username = ?", SELECT_USER))
                .bind(username)
                .fetch_optional(pool)
                .await?;

        Ok(row.map(|r| r.into_user()))
    }

    /// Insert a user, returning its id
    pub async fn insert(pool: &SqlitePool, user: &User) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO user (username, password, consent, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.consent.map(|c| c.as_str()))
        .bind(user.created_at.timestamp_millis())
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Record the user's cookie consent decision
    pub async fn set_consent(pool: &SqlitePool, id: i64, consent: ConsentState) -> Result<bool> {
        let result = sqlx::query("UPDATE user SET consent = ? WHERE id = ?")
            .bind(consent.as_str())
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn username_taken(pool: &SqlitePool, username: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user WHERE username = ?")
            .bind(username)
            .fetch_one(pool)
            .await?;

        Ok(count > 0)
    }
}
