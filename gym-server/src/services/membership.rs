//! Membership service
//!
//! Reading a member is not side-effect free: every read (single or list) and
//! every update recomputes the status from the payment trail and writes it
//! back together with `updated_at`. The write-back is unconditional and
//! idempotent.

use std::collections::HashMap;

use shared::models::{Member, MemberCreate, MemberStatusSummary, MemberUpdate, Payment};
use sqlx::SqlitePool;

use crate::db::repository::{RepoError, member, payment};
use crate::membership::{derive_status, latest_payment, summarize};
use crate::utils::money::{MAX_MONTHLY_FEE, validate_amount};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Latest payment per member id
pub(crate) fn latest_by_member(payments: &[Payment]) -> HashMap<&str, &Payment> {
    let mut grouped: HashMap<&str, Vec<&Payment>> = HashMap::new();
    for p in payments {
        grouped.entry(p.member_id.as_str()).or_default().push(p);
    }
    grouped
        .into_iter()
        .filter_map(|(id, list)| latest_payment(list).map(|p| (id, p)))
        .collect()
}

/// Recompute and write back the status of one member
pub async fn refresh_member(pool: &SqlitePool, member: Member, now: i64) -> AppResult<Member> {
    let latest = payment::find_latest_by_member(pool, &member.id).await?;
    let status = derive_status(latest.map(|p| p.valid_until), now);

    member::update_status(pool, &member.id, status, now).await?;
    tracing::debug!(member_id = %member.id, status = %status, "Member status written back");

    Ok(Member {
        status,
        updated_at: now,
        ..member
    })
}

/// Recompute every member's status with one payment scan and one write transaction
pub async fn refresh_all(pool: &SqlitePool, now: i64) -> AppResult<Vec<Member>> {
    let members = member::find_all(pool).await?;
    let payments = payment::find_all(pool).await?;
    let latest = latest_by_member(&payments);

    let mut tx = pool.begin().await.map_err(RepoError::from)?;
    let mut refreshed = Vec::with_capacity(members.len());
    for m in members {
        let status = derive_status(latest.get(m.id.as_str()).map(|p| p.valid_until), now);
        member::update_status(&mut *tx, &m.id, status, now).await?;
        refreshed.push(Member {
            status,
            updated_at: now,
            ..m
        });
    }
    tx.commit().await.map_err(RepoError::from)?;

    tracing::debug!(count = refreshed.len(), "Member statuses written back");
    Ok(refreshed)
}

/// Fetch one member with a freshly derived status
pub async fn get_member(pool: &SqlitePool, id: &str, now: i64) -> AppResult<Member> {
    let found = member::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::member_not_found(id))?;
    refresh_member(pool, found, now).await
}

/// Status summary of one member (also writes the status back)
pub async fn status_summary(
    pool: &SqlitePool,
    member_id: &str,
    now: i64,
) -> AppResult<MemberStatusSummary> {
    if member::find_by_id(pool, member_id).await?.is_none() {
        return Err(AppError::member_not_found(member_id));
    }

    let latest = payment::find_latest_by_member(pool, member_id).await?;
    let summary = summarize(member_id, latest.as_ref(), now);

    member::update_status(pool, member_id, summary.status, now).await?;
    Ok(summary)
}

pub async fn create_member(pool: &SqlitePool, data: MemberCreate, now: i64) -> AppResult<Member> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&data.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_email(&data.email)?;
    validate_required_text(&data.membership_type, "membership_type", MAX_NAME_LEN)?;
    validate_amount(data.monthly_fee, "monthly_fee", MAX_MONTHLY_FEE)?;

    let created = member::create(pool, data, now).await?;
    tracing::info!(member_id = %created.id, name = %created.name, "Member created");
    Ok(created)
}

/// Partial update followed by a status refresh
///
/// A payload without any field is rejected as a bad request.
pub async fn update_member(
    pool: &SqlitePool,
    id: &str,
    data: MemberUpdate,
    now: i64,
) -> AppResult<Member> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(phone) = &data.phone {
        validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    }
    validate_email(&data.email)?;
    if let Some(tier) = &data.membership_type {
        validate_required_text(tier, "membership_type", MAX_NAME_LEN)?;
    }
    if let Some(fee) = data.monthly_fee {
        validate_amount(fee, "monthly_fee", MAX_MONTHLY_FEE)?;
    }
    if data.is_empty() {
        return Err(AppError::invalid_request("No fields to update"));
    }

    let updated = member::update(pool, id, data, now)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::member_not_found(id),
            other => other.into(),
        })?;
    tracing::info!(member_id = %id, "Member updated");
    refresh_member(pool, updated, now).await
}

/// Delete a member and all of its payments in one transaction
///
/// Returns the number of payments removed.
pub async fn delete_member(pool: &SqlitePool, id: &str) -> AppResult<u64> {
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let deleted_payments = payment::delete_by_member(&mut *tx, id).await?;
    if !member::delete(&mut *tx, id).await? {
        // dropping `tx` rolls back the payment delete
        return Err(AppError::member_not_found(id));
    }
    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(member_id = %id, deleted_payments, "Member deleted");
    Ok(deleted_payments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::payment::NewPayment;
    use crate::db::repository::test_support::test_db;
    use crate::membership::valid_until;
    use shared::ErrorCode;
    use shared::models::{MembershipStatus, PaymentType};
    use shared::util::DAY_MILLIS;

    const NOW: i64 = 1_718_000_000_000;

    fn new_member(name: &str) -> MemberCreate {
        MemberCreate {
            name: name.into(),
            phone: "9876543210".into(),
            email: None,
            membership_type: "Premium".into(),
            monthly_fee: 2500.0,
            joining_date: None,
        }
    }

    async fn pay(pool: &SqlitePool, m: &Member, payment_type: PaymentType, days_ago: i64) {
        let payment_date = NOW - days_ago * DAY_MILLIS;
        payment::create(
            pool,
            NewPayment {
                member_id: m.id.clone(),
                member_name: m.name.clone(),
                amount: 2500.0,
                payment_type,
                payment_date,
                valid_until: valid_until(payment_type, payment_date),
                notes: None,
            },
            payment_date,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_read_writes_status_back() {
        let (db, _dir) = test_db().await;
        let m = create_member(&db.pool, new_member("Rahul Sharma"), NOW).await.unwrap();
        pay(&db.pool, &m, PaymentType::Monthly, 5).await;

        let fresh = get_member(&db.pool, &m.id, NOW).await.unwrap();
        assert_eq!(fresh.status, MembershipStatus::Active);

        // stored row carries the derived status too
        let stored = member::find_by_id(&db.pool, &m.id).await.unwrap().unwrap();
        assert_eq!(stored.status, MembershipStatus::Active);
        assert_eq!(stored.updated_at, NOW);
    }

    #[tokio::test]
    async fn test_refresh_all() {
        let (db, _dir) = test_db().await;
        let active = create_member(&db.pool, new_member("Active"), NOW).await.unwrap();
        let lapsed = create_member(&db.pool, new_member("Lapsed"), NOW).await.unwrap();
        let gone = create_member(&db.pool, new_member("Gone"), NOW).await.unwrap();
        let never = create_member(&db.pool, new_member("Never"), NOW).await.unwrap();

        pay(&db.pool, &active, PaymentType::Yearly, 200).await;
        pay(&db.pool, &lapsed, PaymentType::Monthly, 31).await;
        pay(&db.pool, &gone, PaymentType::Monthly, 125).await;

        let all = refresh_all(&db.pool, NOW).await.unwrap();
        let status_of = |id: &str| all.iter().find(|m| m.id == id).unwrap().status;
        assert_eq!(status_of(&active.id), MembershipStatus::Active);
        assert_eq!(status_of(&lapsed.id), MembershipStatus::Inactive);
        assert_eq!(status_of(&gone.id), MembershipStatus::Deactivated);
        assert_eq!(status_of(&never.id), MembershipStatus::Inactive);

        let stored = member::find_by_id(&db.pool, &gone.id).await.unwrap().unwrap();
        assert_eq!(stored.status, MembershipStatus::Deactivated);
    }

    #[tokio::test]
    async fn test_status_summary() {
        let (db, _dir) = test_db().await;
        let m = create_member(&db.pool, new_member("Rahul Sharma"), NOW).await.unwrap();

        let summary = status_summary(&db.pool, &m.id, NOW).await.unwrap();
        assert_eq!(summary.status, MembershipStatus::Inactive);
        assert_eq!(summary.days_overdue, None);

        pay(&db.pool, &m, PaymentType::Monthly, 31).await;
        let summary = status_summary(&db.pool, &m.id, NOW).await.unwrap();
        assert_eq!(summary.status, MembershipStatus::Inactive);
        assert_eq!(summary.days_overdue, Some(1));

        let err = status_summary(&db.pool, "missing", NOW).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MemberNotFound);
    }

    #[tokio::test]
    async fn test_create_validation() {
        let (db, _dir) = test_db().await;

        let mut bad = new_member("  ");
        let err = create_member(&db.pool, bad.clone(), NOW).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        bad.name = "Rahul".into();
        bad.monthly_fee = -10.0;
        let err = create_member(&db.pool, bad, NOW).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);

        assert_eq!(member::count(&db.pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_unknown_member() {
        let (db, _dir) = test_db().await;
        let data = MemberUpdate {
            phone: Some("9876500000".into()),
            ..Default::default()
        };
        let err = update_member(&db.pool, "missing", data, NOW).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MemberNotFound);
    }

    #[tokio::test]
    async fn test_empty_update_is_bad_request() {
        let (db, _dir) = test_db().await;
        let m = create_member(&db.pool, new_member("Rahul Sharma"), NOW).await.unwrap();

        let err = update_member(&db.pool, &m.id, MemberUpdate::default(), NOW + DAY_MILLIS)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);

        let stored = member::find_by_id(&db.pool, &m.id).await.unwrap().unwrap();
        assert_eq!(stored.updated_at, m.updated_at);
    }

    #[tokio::test]
    async fn test_delete_cascades_payments() {
        let (db, _dir) = test_db().await;
        let m = create_member(&db.pool, new_member("Rahul Sharma"), NOW).await.unwrap();
        let other = create_member(&db.pool, new_member("Priya Patel"), NOW).await.unwrap();
        pay(&db.pool, &m, PaymentType::Monthly, 40).await;
        pay(&db.pool, &m, PaymentType::Monthly, 10).await;
        pay(&db.pool, &other, PaymentType::Monthly, 10).await;

        assert_eq!(delete_member(&db.pool, &m.id).await.unwrap(), 2);
        assert!(member::find_by_id(&db.pool, &m.id).await.unwrap().is_none());
        assert!(payment::find_by_member(&db.pool, &m.id).await.unwrap().is_empty());
        assert_eq!(payment::count(&db.pool).await.unwrap(), 1);

        let err = delete_member(&db.pool, &m.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MemberNotFound);
    }
}
