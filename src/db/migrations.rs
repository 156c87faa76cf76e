//! Database migrations

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Current migration version
const CURRENT_VERSION: i32 = 1;

/// Bring the schema up to `CURRENT_VERSION`
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let row: (i32,) = sqlx::query_as("SELECT version FROM dbmigration WHERE id = 1")
        .fetch_one(pool)
        .await?;
    let current_version = row.0;

    if current_version >= CURRENT_VERSION {
        info!("Database is up to date (version {})", current_version);
        return Ok(());
    }

    info!(
        "Running migrations from version {} to {}",
        current_version, CURRENT_VERSION
    );

    for version in (current_version + 1)..=CURRENT_VERSION {
        run_migration(pool, version).await?;

        sqlx::query("UPDATE dbmigration SET version = ? WHERE id = 1")
            .bind(version)
            .execute(pool)
            .await?;

        info!("Applied migration {}", version);
    }

    Ok(())
}

async fn run_migration(_pool: &SqlitePool, version: i32) -> Result<()> {
    match version {
        1 => {
            // schema is created in setup_sqlite
        }
        _ => {
            tracing::warn!("Unknown migration version: {}", version);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::engine::test_pool;

    async fn version(pool: &SqlitePool) -> i32 {
        sqlx::query_scalar("SELECT version FROM dbmigration WHERE id = 1")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_migrations_reach_current_version() {
        let pool = test_pool().await;
        assert_eq!(version(&pool).await, 0);
        run_migrations(&pool).await.unwrap();
        assert_eq!(version(&pool).await, CURRENT_VERSION);
        // idempotent
        run_migrations(&pool).await.unwrap();
        assert_eq!(version(&pool).await, CURRENT_VERSION);
    }

    #[tokio::test]
    async fn test_fresh_schema_has_consent_column() {
        let pool = test_pool().await;
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pragma_table_info('user') WHERE name = 'consent'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }
}
