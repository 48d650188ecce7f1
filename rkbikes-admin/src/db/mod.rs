//! Query layer for the admin service, one module per table concern

pub mod bikes;
pub mod bookings;
pub mod categories;
pub mod contacts;
pub mod users;
