//! Fee service: collection, revenue summary, dashboard counters

use rust_decimal::Decimal;
use shared::models::{
    DashboardStats, FeeSummary, MembershipStatus, Payment, PaymentCreate, PaymentType,
};
use sqlx::SqlitePool;

use super::membership::{latest_by_member, refresh_all, refresh_member};
use crate::db::repository::payment::NewPayment;
use crate::db::repository::{member, payment};
use crate::membership::window::trailing_window_start;
use crate::membership::{aggregate, derive_status, valid_until};
use crate::utils::money::{MAX_PAYMENT_AMOUNT, to_decimal, to_f64, validate_amount};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Clock skew tolerated on client-supplied payment dates
pub const PAYMENT_DATE_SKEW_MS: i64 = 60_000;

/// Earliest accepted payment date (Unix epoch)
pub const PAYMENT_DATE_FLOOR_MS: i64 = 0;

/// Trailing window counted as "recent" on the dashboard
pub const RECENT_COLLECTION_DAYS: i64 = 30;

/// Parse a payment type tag, defaulting to monthly when absent
pub fn parse_payment_type(raw: Option<&str>) -> AppResult<PaymentType> {
    match raw {
        None => Ok(PaymentType::default()),
        Some(tag) => tag.parse().map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidPaymentType,
                format!("Unknown payment type '{tag}', expected monthly, quarterly or yearly"),
            )
            .with_detail("payment_type", tag)
        }),
    }
}

/// Record a fee payment and refresh the member's status
///
/// An unknown member is rejected before anything is written.
pub async fn collect_fee(pool: &SqlitePool, data: PaymentCreate, now: i64) -> AppResult<Payment> {
    validate_amount(data.amount, "amount", MAX_PAYMENT_AMOUNT)?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    let payment_type = parse_payment_type(data.payment_type.as_deref())?;

    let payment_date = data.payment_date.unwrap_or(now);
    if payment_date < PAYMENT_DATE_FLOOR_MS
        || chrono::DateTime::from_timestamp_millis(payment_date).is_none()
    {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "payment_date must not be before 1970-01-01",
        )
        .with_detail("field", "payment_date")
        .with_detail("payment_date", payment_date));
    }
    if payment_date > now.saturating_add(PAYMENT_DATE_SKEW_MS) {
        return Err(AppError::new(ErrorCode::PaymentDateInFuture)
            .with_detail("payment_date", payment_date));
    }

    let owner = member::find_by_id(pool, &data.member_id)
        .await?
        .ok_or_else(|| AppError::member_not_found(&data.member_id))?;

    let created = payment::create(
        pool,
        NewPayment {
            member_id: owner.id.clone(),
            member_name: owner.name.clone(),
            amount: data.amount,
            payment_type,
            payment_date,
            valid_until: valid_until(payment_type, payment_date),
            notes: data.notes,
        },
        now,
    )
    .await?;

    tracing::info!(
        payment_id = %created.id,
        member_id = %created.member_id,
        amount = created.amount,
        payment_type = %created.payment_type,
        "Fee collected"
    );

    refresh_member(pool, owner, now).await?;
    Ok(created)
}

/// List payments, optionally for one member, newest first
pub async fn list_payments(pool: &SqlitePool, member_id: Option<&str>) -> AppResult<Vec<Payment>> {
    let payments = match member_id {
        Some(id) => payment::find_by_member(pool, id).await?,
        None => payment::find_all(pool).await?,
    };
    Ok(payments)
}

pub async fn get_payment(pool: &SqlitePool, id: &str) -> AppResult<Payment> {
    payment::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::payment_not_found(id))
}

/// Nested month / quarter / year revenue plus member and payment counts
pub async fn fee_summary(pool: &SqlitePool, now: i64) -> AppResult<FeeSummary> {
    let payments = payment::find_all(pool).await?;
    let total_members = member::count(pool).await?;

    let totals = aggregate(&payments, now);
    let active_members = latest_by_member(&payments)
        .values()
        .filter(|p| derive_status(Some(p.valid_until), now).is_active())
        .count() as i64;

    Ok(FeeSummary {
        monthly_total: totals.monthly,
        quarterly_total: totals.quarterly,
        yearly_total: totals.yearly,
        total_members,
        active_members,
        total_payments: payments.len() as i64,
    })
}

/// Dashboard counters; refreshes every member's status first
pub async fn dashboard_stats(pool: &SqlitePool, now: i64) -> AppResult<DashboardStats> {
    let members = refresh_all(pool, now).await?;
    let count_of = |status: MembershipStatus| {
        members.iter().filter(|m| m.status == status).count() as i64
    };

    let recent = payment::find_since(pool, trailing_window_start(now, RECENT_COLLECTION_DAYS)).await?;
    let recent_total: Decimal = recent.iter().map(|p| to_decimal(p.amount)).sum();

    Ok(DashboardStats {
        total_members: members.len() as i64,
        active_members: count_of(MembershipStatus::Active),
        inactive_members: count_of(MembershipStatus::Inactive),
        deactivated_members: count_of(MembershipStatus::Deactivated),
        recent_collections: recent.len() as i64,
        recent_collections_total: to_f64(recent_total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_db;
    use crate::services::membership::create_member;
    use shared::models::{Member, MemberCreate};
    use shared::util::DAY_MILLIS;

    // 2024-08-15T12:00:00Z
    const NOW: i64 = 1_723_723_200_000;

    async fn seed_member(pool: &SqlitePool, name: &str) -> Member {
        create_member(
            pool,
            MemberCreate {
                name: name.into(),
                phone: "9876543210".into(),
                email: None,
                membership_type: "Basic".into(),
                monthly_fee: 1500.0,
                joining_date: None,
            },
            NOW - 400 * DAY_MILLIS,
        )
        .await
        .unwrap()
    }

    fn fee(member_id: &str, amount: f64, payment_type: Option<&str>, days_ago: i64) -> PaymentCreate {
        PaymentCreate {
            member_id: member_id.into(),
            amount,
            payment_type: payment_type.map(Into::into),
            payment_date: Some(NOW - days_ago * DAY_MILLIS),
            notes: None,
        }
    }

    #[test]
    fn test_parse_payment_type() {
        assert_eq!(parse_payment_type(None).unwrap(), PaymentType::Monthly);
        assert_eq!(parse_payment_type(Some("Yearly")).unwrap(), PaymentType::Yearly);
        let err = parse_payment_type(Some("weekly")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPaymentType);
    }

    #[tokio::test]
    async fn test_collect_fee_sets_valid_until_and_status() {
        let (db, _dir) = test_db().await;
        let m = seed_member(&db.pool, "Rahul Sharma").await;

        let p = collect_fee(&db.pool, fee(&m.id, 1500.0, Some("Monthly"), 0), NOW)
            .await
            .unwrap();
        assert_eq!(p.payment_type, PaymentType::Monthly);
        assert_eq!(p.valid_until, NOW + 30 * DAY_MILLIS);
        assert_eq!(p.member_name, "Rahul Sharma");

        let stored = member::find_by_id(&db.pool, &m.id).await.unwrap().unwrap();
        assert_eq!(stored.status, MembershipStatus::Active);
    }

    #[tokio::test]
    async fn test_collect_fee_defaults() {
        let (db, _dir) = test_db().await;
        let m = seed_member(&db.pool, "Rahul Sharma").await;

        let data = PaymentCreate {
            member_id: m.id.clone(),
            amount: 1500.0,
            payment_type: None,
            payment_date: None,
            notes: Some("cash".into()),
        };
        let p = collect_fee(&db.pool, data, NOW).await.unwrap();
        assert_eq!(p.payment_type, PaymentType::Monthly);
        assert_eq!(p.payment_date, NOW);
        assert_eq!(p.created_at, NOW);
        assert_eq!(p.notes.as_deref(), Some("cash"));
    }

    #[tokio::test]
    async fn test_collect_fee_unknown_member_writes_nothing() {
        let (db, _dir) = test_db().await;
        let err = collect_fee(&db.pool, fee("missing", 1500.0, None, 0), NOW)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MemberNotFound);
        assert_eq!(payment::count(&db.pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_collect_fee_rejections() {
        let (db, _dir) = test_db().await;
        let m = seed_member(&db.pool, "Rahul Sharma").await;

        let err = collect_fee(&db.pool, fee(&m.id, -5.0, None, 0), NOW).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);

        let err = collect_fee(&db.pool, fee(&m.id, 5.0, Some("weekly"), 0), NOW)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPaymentType);

        let mut future = fee(&m.id, 5.0, None, 0);
        future.payment_date = Some(NOW + DAY_MILLIS);
        let err = collect_fee(&db.pool, future, NOW).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentDateInFuture);

        // within skew tolerance
        let mut skewed = fee(&m.id, 5.0, None, 0);
        skewed.payment_date = Some(NOW + 30_000);
        assert!(collect_fee(&db.pool, skewed, NOW).await.is_ok());

        assert_eq!(payment::count(&db.pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_collect_fee_rejects_pre_epoch_date() {
        let (db, _dir) = test_db().await;
        let m = seed_member(&db.pool, "Rahul Sharma").await;

        for date in [i64::MIN, -1] {
            let mut ancient = fee(&m.id, 1500.0, Some("monthly"), 0);
            ancient.payment_date = Some(date);
            let err = collect_fee(&db.pool, ancient, NOW).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValueOutOfRange);
            assert_eq!(err.http_status(), http::StatusCode::UNPROCESSABLE_ENTITY);
        }
        assert_eq!(payment::count(&db.pool).await.unwrap(), 0);

        // reads stay healthy afterwards
        let summary = crate::services::membership::status_summary(&db.pool, &m.id, NOW)
            .await
            .unwrap();
        assert_eq!(summary.status, MembershipStatus::Inactive);
        assert!(dashboard_stats(&db.pool, NOW).await.is_ok());

        // the epoch itself is accepted
        let mut epoch = fee(&m.id, 1500.0, Some("monthly"), 0);
        epoch.payment_date = Some(PAYMENT_DATE_FLOOR_MS);
        let p = collect_fee(&db.pool, epoch, NOW).await.unwrap();
        assert_eq!(p.payment_date, 0);
        let refreshed = crate::services::membership::get_member(&db.pool, &m.id, NOW)
            .await
            .unwrap();
        assert_eq!(refreshed.status, MembershipStatus::Deactivated);
    }

    #[tokio::test]
    async fn test_fee_summary_scenario() {
        let (db, _dir) = test_db().await;
        let a = seed_member(&db.pool, "A").await;
        let b = seed_member(&db.pool, "B").await;
        seed_member(&db.pool, "C").await;

        // Aug 2024: month from Aug 1, quarter from Apr 1, year from Jan 1
        collect_fee(&db.pool, fee(&a.id, 100.0, Some("monthly"), 5), NOW).await.unwrap();
        collect_fee(&db.pool, fee(&b.id, 200.0, Some("monthly"), 90), NOW).await.unwrap();
        collect_fee(&db.pool, fee(&b.id, 300.0, Some("yearly"), 190), NOW).await.unwrap();

        let summary = fee_summary(&db.pool, NOW).await.unwrap();
        assert_eq!(summary.monthly_total, 100.0);
        assert_eq!(summary.quarterly_total, 300.0);
        assert_eq!(summary.yearly_total, 600.0);
        assert_eq!(summary.total_members, 3);
        // b's latest payment is the lapsed monthly one
        assert_eq!(summary.active_members, 1);
        assert_eq!(summary.total_payments, 3);
    }

    #[tokio::test]
    async fn test_fee_summary_empty() {
        let (db, _dir) = test_db().await;
        let summary = fee_summary(&db.pool, NOW).await.unwrap();
        assert_eq!(summary.monthly_total, 0.0);
        assert_eq!(summary.quarterly_total, 0.0);
        assert_eq!(summary.yearly_total, 0.0);
        assert_eq!(summary.total_payments, 0);
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let (db, _dir) = test_db().await;
        let a = seed_member(&db.pool, "A").await;
        let b = seed_member(&db.pool, "B").await;
        let c = seed_member(&db.pool, "C").await;
        seed_member(&db.pool, "D").await;

        collect_fee(&db.pool, fee(&a.id, 100.25, None, 3), NOW).await.unwrap();
        collect_fee(&db.pool, fee(&b.id, 200.5, None, 31), NOW).await.unwrap();
        collect_fee(&db.pool, fee(&c.id, 300.0, None, 125), NOW).await.unwrap();

        let stats = dashboard_stats(&db.pool, NOW).await.unwrap();
        assert_eq!(stats.total_members, 4);
        assert_eq!(stats.active_members, 1);
        assert_eq!(stats.inactive_members, 2);
        assert_eq!(stats.deactivated_members, 1);
        assert_eq!(stats.recent_collections, 1);
        assert_eq!(stats.recent_collections_total, 100.25);
    }
}
