//! # RK Bikes Common Library
//!
//! Shared code for the RK Bikes admin service:
//! - Booking domain types (status lifecycle, variants, watermark)
//! - Database models, initialization and schema migrations
//! - Event types (AdminEvent enum) and EventBus
//! - Configuration resolution
//! - Error types

pub mod bookings;
pub mod config;
pub mod db;
pub mod error;
pub mod events;

pub use bookings::{BookingStatus, BookingVariant, BookingWatermark};
pub use error::{Error, Result};
