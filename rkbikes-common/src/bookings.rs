//! Booking domain types shared across the admin service
//!
//! Three independent booking variants (test drive, service, bike purchase)
//! share a four-state status lifecycle. Booking ids are unique only within a
//! variant's own table, never across variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Booking status lifecycle states.
///
/// `Pending` is the initial state, set by the public booking form at creation.
/// The transition graph is fully permissive: any state may be written over any
/// other. Only membership in this set is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// All recognized statuses, in bucket display order
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(Error::InvalidInput(format!(
                "status: unrecognized value '{}' (expected pending, confirmed, completed or cancelled)",
                other
            ))),
        }
    }
}

/// The three booking variants, each backed by its own table.
///
/// `ALL` fixes the evaluation order used by the watermark monitor:
/// test drive, then service, then bike purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingVariant {
    #[serde(rename = "testdrive")]
    TestDrive,
    Service,
    #[serde(rename = "bike")]
    BikePurchase,
}

impl BookingVariant {
    /// Fixed evaluation order for watermark checks
    pub const ALL: [BookingVariant; 3] = [
        BookingVariant::TestDrive,
        BookingVariant::Service,
        BookingVariant::BikePurchase,
    ];

    /// Backing table name
    pub fn table(&self) -> &'static str {
        match self {
            BookingVariant::TestDrive => "testdrive_bookings",
            BookingVariant::Service => "service_bookings",
            BookingVariant::BikePurchase => "bookings",
        }
    }

    /// URL path slug, as used in `/api/bookings/:variant`
    pub fn slug(&self) -> &'static str {
        match self {
            BookingVariant::TestDrive => "testdrive",
            BookingVariant::Service => "service",
            BookingVariant::BikePurchase => "bike",
        }
    }

    /// Human-readable label for notification messages
    pub fn label(&self) -> &'static str {
        match self {
            BookingVariant::TestDrive => "test drive",
            BookingVariant::Service => "service",
            BookingVariant::BikePurchase => "bike purchase",
        }
    }
}

impl FromStr for BookingVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "testdrive" => Ok(BookingVariant::TestDrive),
            "service" => Ok(BookingVariant::Service),
            "bike" => Ok(BookingVariant::BikePurchase),
            other => Err(Error::InvalidInput(format!(
                "variant: unrecognized value '{}' (expected testdrive, service or bike)",
                other
            ))),
        }
    }
}

/// Highest booking id observed per variant.
///
/// Owned by the monitor task, never persisted. Re-seeded from the current
/// MAX(booking_id) values on every process start, so bookings created before
/// the first observation are never flagged as new. Values never decrease for
/// the lifetime of the process (bookings are never deleted through this
/// service).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWatermark {
    pub test_drive: i64,
    pub service: i64,
    pub bike_purchase: i64,
}

impl BookingWatermark {
    pub fn get(&self, variant: BookingVariant) -> i64 {
        match variant {
            BookingVariant::TestDrive => self.test_drive,
            BookingVariant::Service => self.service,
            BookingVariant::BikePurchase => self.bike_purchase,
        }
    }

    pub fn set(&mut self, variant: BookingVariant, value: i64) {
        match variant {
            BookingVariant::TestDrive => self.test_drive = value,
            BookingVariant::Service => self.service = value,
            BookingVariant::BikePurchase => self.bike_purchase = value,
        }
    }
}
