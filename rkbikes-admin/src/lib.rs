//! rkbikes-admin library - REST backend for the RK Bikes admin console
//!
//! JSON-only API over SQLite plus the new-booking watermark monitor. HTML
//! rendering, file upload storage and authentication are external
//! collaborators and not part of this service.

use std::sync::{Arc, Mutex};

use axum::routing::{delete, get, post, put};
use axum::Router;
use rkbikes_common::events::EventBus;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod monitor;

use monitor::PendingNotification;

/// Application state shared across HTTP handlers and the monitor task
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// In-process event bus
    pub event_bus: Arc<EventBus>,
    /// One-slot cell drained by the polled notification channel
    pub pending_notification: PendingNotification,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, event_bus: Arc<EventBus>) -> Self {
        Self {
            db,
            event_bus,
            pending_notification: Arc::new(Mutex::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Dashboard aggregates
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/booking-stats", get(api::get_booking_stats))
        .route("/api/recent-testdrives", get(api::recent_testdrives))
        // Bookings: lifecycle, watermark seed, polled notifications
        .route("/api/bookings/:variant", get(api::list_bookings))
        .route(
            "/api/bookings/:variant/by-status",
            get(api::list_bookings_by_status),
        )
        .route("/api/bookings/:variant/:id", put(api::update_booking_status))
        .route("/api/booking-watermark", get(api::get_watermark))
        .route("/api/notifications", get(api::poll_notifications))
        // CRUD gateway
        .route("/api/users", get(api::list_users))
        .route("/api/users/:id", delete(api::delete_user))
        .route(
            "/api/categories",
            get(api::list_categories).post(api::create_category),
        )
        .route("/api/bikes", get(api::list_bikes).post(api::create_bike))
        .route(
            "/api/bikes/:id",
            put(api::update_bike).delete(api::delete_bike),
        )
        .route("/api/bike-images", post(api::add_bike_images))
        .route("/api/contact-messages", get(api::list_contact_messages))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
