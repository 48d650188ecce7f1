//! Booking endpoints: listing, status lifecycle, watermark seed and the
//! polled notification channel

use axum::extract::{Path, State};
use axum::Json;
use rkbikes_common::db::models::{Booking, StatusBuckets, WatermarkSnapshot};
use rkbikes_common::events::AdminEvent;
use rkbikes_common::{BookingStatus, BookingVariant, Error};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::db;
use crate::monitor::NewBookingNotification;
use crate::AppState;

/// Number of rows returned by the recent test drives endpoint
const RECENT_TESTDRIVE_LIMIT: i64 = 5;

fn parse_variant(slug: &str) -> Result<BookingVariant, Error> {
    slug.parse::<BookingVariant>()
}

/// GET /api/bookings/:variant
///
/// Flat list of the variant's bookings, descending booking id.
pub async fn list_bookings(
    State(state): State<AppState>,
    Path(variant): Path<String>,
) -> Result<Json<Vec<Booking>>, Error> {
    let variant = parse_variant(&variant)?;
    let bookings = db::bookings::list(&state.db, variant).await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/:variant/by-status
///
/// The variant's bookings partitioned into the four status buckets; every
/// bucket is present even when empty, so a consumer can clear-and-redraw all
/// of them.
pub async fn list_bookings_by_status(
    State(state): State<AppState>,
    Path(variant): Path<String>,
) -> Result<Json<StatusBuckets>, Error> {
    let variant = parse_variant(&variant)?;
    let buckets = db::bookings::list_by_status(&state.db, variant).await?;
    Ok(Json(buckets))
}

/// PUT /api/bookings/:variant/:id body
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// PUT /api/bookings/:variant/:id
///
/// Validates the status value against the four recognized states, then writes
/// unconditionally (last write wins, no transition-graph check).
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path((variant, booking_id)): Path<(String, i64)>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<Value>, Error> {
    let variant = parse_variant(&variant)?;
    let status: BookingStatus = body.status.parse()?;

    db::bookings::set_status(&state.db, variant, booking_id, status).await?;

    let event = AdminEvent::BookingStatusChanged {
        variant,
        booking_id,
        status,
        timestamp: chrono::Utc::now(),
    };
    if state.event_bus.emit(event).is_err() {
        debug!("No event subscribers for status change");
    }

    Ok(Json(json!({ "success": true })))
}

/// GET /api/booking-watermark
///
/// Current MAX(booking_id) triple read live from storage. Used by a UI to
/// seed its own local watermark at startup; this copy is independent of the
/// monitor task's watermark and the two may diverge across restarts.
pub async fn get_watermark(
    State(state): State<AppState>,
) -> Result<Json<WatermarkSnapshot>, Error> {
    let snapshot = db::bookings::max_ids(&state.db).await?;
    Ok(Json(snapshot))
}

/// GET /api/notifications
///
/// Polled notification channel: drains and returns the pending aggregated
/// new-booking notification, or null when none was raised since the last
/// poll. Zero-or-one per poll by construction.
pub async fn poll_notifications(
    State(state): State<AppState>,
) -> Json<Option<NewBookingNotification>> {
    let pending = state
        .pending_notification
        .lock()
        .expect("pending notification lock poisoned")
        .take();
    Json(pending)
}

/// GET /api/recent-testdrives
///
/// Newest five test drive bookings, for the dashboard.
pub async fn recent_testdrives(
    State(state): State<AppState>,
) -> Result<Json<Vec<Booking>>, Error> {
    let bookings =
        db::bookings::recent_testdrives(&state.db, RECENT_TESTDRIVE_LIMIT).await?;
    Ok(Json(bookings))
}
