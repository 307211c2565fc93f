//! Payment Repository
//!
//! Payments are insert-only; they disappear only with their member.

use super::{RepoError, RepoResult};
use shared::models::{Payment, PaymentType};
use sqlx::{Sqlite, SqlitePool};

const PAYMENT_SELECT: &str = "SELECT id, member_id, member_name, amount, payment_type, payment_date, valid_until, notes, created_at FROM payment";

/// Fully resolved payment row, ready to insert
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub member_id: String,
    pub member_name: String,
    pub amount: f64,
    pub payment_type: PaymentType,
    pub payment_date: i64,
    pub valid_until: i64,
    pub notes: Option<String>,
}

/// All payments, newest `payment_date` first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Payment>> {
    let sql = format!("{PAYMENT_SELECT} ORDER BY payment_date DESC, created_at DESC");
    let rows = sqlx::query_as::<_, Payment>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Payments of one member, newest `payment_date` first
pub async fn find_by_member(pool: &SqlitePool, member_id: &str) -> RepoResult<Vec<Payment>> {
    let sql = format!(
        "{PAYMENT_SELECT} WHERE member_id = ? ORDER BY payment_date DESC, created_at DESC"
    );
    let rows = sqlx::query_as::<_, Payment>(&sql)
        .bind(member_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Payment>> {
    let sql = format!("{PAYMENT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Payment>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Latest payment of a member (greatest `payment_date`, then `created_at`)
pub async fn find_latest_by_member(
    pool: &SqlitePool,
    member_id: &str,
) -> RepoResult<Option<Payment>> {
    let sql = format!(
        "{PAYMENT_SELECT} WHERE member_id = ? ORDER BY payment_date DESC, created_at DESC LIMIT 1"
    );
    let row = sqlx::query_as::<_, Payment>(&sql)
        .bind(member_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Payments dated at or after `since`
pub async fn find_since(pool: &SqlitePool, since: i64) -> RepoResult<Vec<Payment>> {
    let sql = format!("{PAYMENT_SELECT} WHERE payment_date >= ? ORDER BY payment_date DESC");
    let rows = sqlx::query_as::<_, Payment>(&sql)
        .bind(since)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: NewPayment, now: i64) -> RepoResult<Payment> {
    let id = shared::util::new_id();
    sqlx::query(
        "INSERT INTO payment (id, member_id, member_name, amount, payment_type, payment_date, valid_until, notes, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(&id)
    .bind(&data.member_id)
    .bind(&data.member_name)
    .bind(data.amount)
    .bind(data.payment_type)
    .bind(data.payment_date)
    .bind(data.valid_until)
    .bind(&data.notes)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create payment".into()))
}

/// Remove every payment of a member, returning how many were deleted
pub async fn delete_by_member(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    member_id: &str,
) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM payment WHERE member_id = ?")
        .bind(member_id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payment")
        .fetch_one(pool)
        .await?;
    Ok(total)
}
