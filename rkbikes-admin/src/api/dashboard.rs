//! Dashboard aggregate endpoints

use axum::extract::State;
use axum::Json;
use rkbikes_common::db::models::{BookingStatusTotals, DashboardCounts};
use rkbikes_common::{BookingVariant, Error};

use crate::db;
use crate::AppState;

/// GET /api/dashboard
///
/// Entity totals for the dashboard cards.
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardCounts>, Error> {
    let counts = DashboardCounts {
        users: db::users::count(&state.db).await?,
        bikes: db::bikes::count(&state.db).await?,
        test_drives: db::bookings::count(&state.db, BookingVariant::TestDrive).await?,
        service_bookings: db::bookings::count(&state.db, BookingVariant::Service).await?,
        bike_bookings: db::bookings::count(&state.db, BookingVariant::BikePurchase).await?,
        contacts: db::contacts::count(&state.db).await?,
    };
    Ok(Json(counts))
}

/// GET /api/booking-stats
///
/// Booking counts per status, summed across all three variants.
pub async fn get_booking_stats(
    State(state): State<AppState>,
) -> Result<Json<BookingStatusTotals>, Error> {
    let totals = db::bookings::status_totals(&state.db).await?;
    Ok(Json(totals))
}
