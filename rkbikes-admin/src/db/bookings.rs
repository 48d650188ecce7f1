//! Booking queries: listing, status lifecycle writes, watermark snapshots
//!
//! The three variants live in separate tables with per-variant columns; the
//! SELECTs below alias them into the unified [`Booking`] shape (bike model,
//! service type and bike name all land in `subject`).

use rkbikes_common::db::models::{Booking, BookingStatusTotals, StatusBuckets, WatermarkSnapshot};
use rkbikes_common::{BookingStatus, BookingVariant, Result};
use sqlx::SqlitePool;
use tracing::debug;

/// Full-table SELECT in the unified booking shape, newest first
fn select_sql(variant: BookingVariant) -> &'static str {
    match variant {
        BookingVariant::TestDrive => {
            "SELECT booking_id, full_name, email, phone, bike_model AS subject, \
             preferred_date, NULL AS created_at, status \
             FROM testdrive_bookings ORDER BY booking_id DESC"
        }
        BookingVariant::Service => {
            "SELECT booking_id, full_name, email, phone, service_type AS subject, \
             preferred_date, NULL AS created_at, status \
             FROM service_bookings ORDER BY booking_id DESC"
        }
        BookingVariant::BikePurchase => {
            "SELECT booking_id, full_name, email, phone, bike_name AS subject, \
             NULL AS preferred_date, created_at, status \
             FROM bookings ORDER BY booking_id DESC"
        }
    }
}

/// All bookings of a variant, ordered by descending booking id
pub async fn list(pool: &SqlitePool, variant: BookingVariant) -> Result<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(select_sql(variant))
        .fetch_all(pool)
        .await?;
    Ok(bookings)
}

/// All bookings of a variant, partitioned into the four status buckets.
///
/// Buckets inherit the descending-id fetch order; every bucket is present
/// even when empty.
pub async fn list_by_status(pool: &SqlitePool, variant: BookingVariant) -> Result<StatusBuckets> {
    let mut buckets = StatusBuckets::default();
    for booking in list(pool, variant).await? {
        buckets.push(booking);
    }
    Ok(buckets)
}

/// Write a booking's status unconditionally (last write wins).
///
/// The status value is validated by the caller before it reaches this point;
/// no legal-transition check is applied. A write matching zero rows still
/// reports success, matching the observed behavior of the admin console.
pub async fn set_status(
    pool: &SqlitePool,
    variant: BookingVariant,
    booking_id: i64,
    status: BookingStatus,
) -> Result<()> {
    let sql = format!(
        "UPDATE {} SET status = ? WHERE booking_id = ?",
        variant.table()
    );
    let result = sqlx::query(&sql)
        .bind(status.as_str())
        .bind(booking_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        debug!(
            "Status update matched no rows: {} booking #{}",
            variant.slug(),
            booking_id
        );
    }
    Ok(())
}

/// Highest booking id of one variant (0 when the table is empty)
pub async fn max_id(pool: &SqlitePool, variant: BookingVariant) -> Result<i64> {
    let sql = format!(
        "SELECT COALESCE(MAX(booking_id), 0) FROM {}",
        variant.table()
    );
    let max: i64 = sqlx::query_scalar(&sql).fetch_one(pool).await?;
    Ok(max)
}

/// Current MAX(booking_id) triple across all three variants.
///
/// Three independent point reads; no cross-variant transaction is needed.
pub async fn max_ids(pool: &SqlitePool) -> Result<WatermarkSnapshot> {
    Ok(WatermarkSnapshot {
        test_drive: max_id(pool, BookingVariant::TestDrive).await?,
        service: max_id(pool, BookingVariant::Service).await?,
        bike_purchase: max_id(pool, BookingVariant::BikePurchase).await?,
    })
}

/// Newest test drive bookings for the dashboard
pub async fn recent_testdrives(pool: &SqlitePool, limit: i64) -> Result<Vec<Booking>> {
    let sql = format!(
        "SELECT booking_id, full_name, email, phone, bike_model AS subject, \
         preferred_date, NULL AS created_at, status \
         FROM testdrive_bookings ORDER BY booking_id DESC LIMIT {}",
        limit
    );
    let bookings = sqlx::query_as::<_, Booking>(&sql).fetch_all(pool).await?;
    Ok(bookings)
}

/// Booking counts per status, summed across all three variants
pub async fn status_totals(pool: &SqlitePool) -> Result<BookingStatusTotals> {
    let mut totals = BookingStatusTotals::default();
    for variant in BookingVariant::ALL {
        let sql = format!(
            "SELECT status, COUNT(*) FROM {} GROUP BY status",
            variant.table()
        );
        let rows: Vec<(String, i64)> = sqlx::query_as(&sql).fetch_all(pool).await?;
        for (status, count) in rows {
            // CHECK constraint keeps status within the four values; anything
            // else would predate the constraint and is ignored
            if let Ok(status) = status.parse::<BookingStatus>() {
                totals.add(status, count);
            }
        }
    }
    Ok(totals)
}

/// Total bookings of one variant
pub async fn count(pool: &SqlitePool, variant: BookingVariant) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", variant.table());
    let total: i64 = sqlx::query_scalar(&sql).fetch_one(pool).await?;
    Ok(total)
}
