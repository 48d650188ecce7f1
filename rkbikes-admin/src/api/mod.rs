//! HTTP API handlers for rkbikes-admin

pub mod bikes;
pub mod bookings;
pub mod categories;
pub mod contacts;
pub mod dashboard;
pub mod health;
pub mod users;

pub use bikes::{add_bike_images, create_bike, delete_bike, list_bikes, update_bike};
pub use bookings::{
    get_watermark, list_bookings, list_bookings_by_status, poll_notifications, recent_testdrives,
    update_booking_status,
};
pub use categories::{create_category, list_categories};
pub use contacts::list_contact_messages;
pub use dashboard::{get_booking_stats, get_dashboard};
pub use health::health_routes;
pub use users::{delete_user, list_users};
