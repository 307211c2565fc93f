//! Status Check Repository

use super::{RepoError, RepoResult};
use shared::models::StatusCheck;
use sqlx::SqlitePool;

pub async fn create(pool: &SqlitePool, client_name: &str, now: i64) -> RepoResult<StatusCheck> {
    let id = shared::util::new_id();
    sqlx::query("INSERT INTO status_check (id, client_name, timestamp) VALUES (?1, ?2, ?3)")
        .bind(&id)
        .bind(client_name)
        .bind(now)
        .execute(pool)
        .await?;
    sqlx::query_as::<_, StatusCheck>(
        "SELECT id, client_name, timestamp FROM status_check WHERE id = ?",
    )
    .bind(&id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::Database("Failed to create status check".into()))
}

/// Most recent first, capped at `limit`
pub async fn find_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<StatusCheck>> {
    let rows = sqlx::query_as::<_, StatusCheck>(
        "SELECT id, client_name, timestamp FROM status_check ORDER BY timestamp DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_db;

    #[tokio::test]
    async fn test_create_and_list() {
        let (db, _dir) = test_db().await;
        create(&db.pool, "frontend", 1_000).await.unwrap();
        let second = create(&db.pool, "monitor", 2_000).await.unwrap();
        assert_eq!(second.client_name, "monitor");

        let recent = find_recent(&db.pool, 10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, second.id);

        assert_eq!(find_recent(&db.pool, 1).await.unwrap().len(), 1);
    }
}
