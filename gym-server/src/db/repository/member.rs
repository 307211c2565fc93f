//! Member Repository

use super::{RepoError, RepoResult};
use shared::models::{Member, MemberCreate, MemberUpdate, MembershipStatus};
use sqlx::{Sqlite, SqlitePool};

const MEMBER_SELECT: &str = "SELECT id, name, phone, email, membership_type, monthly_fee, status, joining_date, created_at, updated_at FROM member";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Member>> {
    let sql = format!("{MEMBER_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Member>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a new member; status starts Inactive until a payment exists
pub async fn create(pool: &SqlitePool, data: MemberCreate, now: i64) -> RepoResult<Member> {
    let id = shared::util::new_id();
    let joining_date = data.joining_date.unwrap_or(now);
    sqlx::query(
        "INSERT INTO member (id, name, phone, email, membership_type, monthly_fee, status, joining_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(&id)
    .bind(data.name.trim())
    .bind(data.phone.trim())
    .bind(&data.email)
    .bind(data.membership_type.trim())
    .bind(data.monthly_fee)
    .bind(MembershipStatus::Inactive)
    .bind(joining_date)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create member".into()))
}

/// Partial update: absent fields keep their stored value
pub async fn update(pool: &SqlitePool, id: &str, data: MemberUpdate, now: i64) -> RepoResult<Member> {
    let rows = sqlx::query(
        "UPDATE member SET name = COALESCE(?1, name), phone = COALESCE(?2, phone), email = COALESCE(?3, email), membership_type = COALESCE(?4, membership_type), monthly_fee = COALESCE(?5, monthly_fee), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.phone.as_deref().map(str::trim))
    .bind(&data.email)
    .bind(data.membership_type.as_deref().map(str::trim))
    .bind(data.monthly_fee)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id}")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Member {id}")))
}

/// Status write-back; runs on the pool or inside a transaction
pub async fn update_status(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    id: &str,
    status: MembershipStatus,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE member SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Hard delete of the member row only (payments are removed by the caller)
pub async fn delete(conn: impl sqlx::Executor<'_, Database = Sqlite>, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM member WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member")
        .fetch_one(pool)
        .await?;
    Ok(total)
}
