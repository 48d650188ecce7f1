//! Database models

use serde::{Deserialize, Serialize};

use crate::bookings::{BookingStatus, BookingVariant};

/// Registered user (created by the public site, managed here)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub role: String,
    pub created_at: Option<String>,
}

/// Bike category
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Bike listing row, joined with its category name.
///
/// `features` is the comma-joined feature list, filled in after a separate
/// per-bike query (not part of the main SELECT).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bike {
    pub id: i64,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub name: String,
    pub price: Option<f64>,
    pub engine: Option<String>,
    pub mileage: Option<String>,
    pub thumbnail: Option<String>,
    #[sqlx(default)]
    pub features: String,
}

/// Contact form message
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: Option<String>,
}

/// Unified booking model across the three variants.
///
/// `subject` is the variant-specific column (bike model, service type or bike
/// name), aliased in SQL. `preferred_date` is present for test drive and
/// service bookings; `created_at` for bike purchases.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub booking_id: i64,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub preferred_date: Option<String>,
    pub created_at: Option<String>,
    pub status: BookingStatus,
}

/// Bookings of one variant partitioned by status.
///
/// All four buckets are always present (empty vectors, never missing keys) so
/// a consumer can clear-and-redraw every bucket. Within a bucket, bookings
/// keep the fetch order (descending booking id, newest first).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusBuckets {
    pub pending: Vec<Booking>,
    pub confirmed: Vec<Booking>,
    pub completed: Vec<Booking>,
    pub cancelled: Vec<Booking>,
}

impl StatusBuckets {
    /// Place a booking into the bucket matching its current status
    pub fn push(&mut self, booking: Booking) {
        match booking.status {
            BookingStatus::Pending => self.pending.push(booking),
            BookingStatus::Confirmed => self.confirmed.push(booking),
            BookingStatus::Completed => self.completed.push(booking),
            BookingStatus::Cancelled => self.cancelled.push(booking),
        }
    }

    /// Total bookings across all four buckets
    pub fn total(&self) -> usize {
        self.pending.len() + self.confirmed.len() + self.completed.len() + self.cancelled.len()
    }
}

/// Aggregate booking counts per status, summed across all three variants
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BookingStatusTotals {
    pub pending: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub cancelled: i64,
}

impl BookingStatusTotals {
    pub fn add(&mut self, status: BookingStatus, count: i64) {
        match status {
            BookingStatus::Pending => self.pending += count,
            BookingStatus::Confirmed => self.confirmed += count,
            BookingStatus::Completed => self.completed += count,
            BookingStatus::Cancelled => self.cancelled += count,
        }
    }
}

/// Entity totals shown on the dashboard
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub users: i64,
    pub bikes: i64,
    pub test_drives: i64,
    pub service_bookings: i64,
    pub bike_bookings: i64,
    pub contacts: i64,
}

/// One tick's worth of observed MAX(booking_id) values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkSnapshot {
    pub test_drive: i64,
    pub service: i64,
    pub bike_purchase: i64,
}

impl WatermarkSnapshot {
    pub fn get(&self, variant: BookingVariant) -> i64 {
        match variant {
            BookingVariant::TestDrive => self.test_drive,
            BookingVariant::Service => self.service,
            BookingVariant::BikePurchase => self.bike_purchase,
        }
    }
}
