//! New-booking watermark monitor
//!
//! A single periodic task keeps the highest booking id observed per variant
//! and raises one aggregated notification per tick when any variant's maximum
//! advances. The watermark is process-scoped and never persisted: it is
//! seeded from the live MAX(booking_id) values on the first successful tick,
//! so bookings that predate startup are never flagged as new.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rkbikes_common::db::models::WatermarkSnapshot;
use rkbikes_common::events::{AdminEvent, EventBus};
use rkbikes_common::{BookingVariant, BookingWatermark};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::db;

/// Aggregated new-booking notification, at most one per tick.
///
/// `message` names the last variant (in evaluation order) that advanced this
/// tick; `advanced` lists every advancing variant so consumers can refresh
/// aggregate counters once and a visible detail view selectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookingNotification {
    pub variant: BookingVariant,
    pub message: String,
    pub advanced: Vec<BookingVariant>,
}

/// One-slot cell holding the most recent undelivered notification.
///
/// The HTTP notification channel polls this; an unpolled notification is
/// overwritten by the next one (newest wins).
pub type PendingNotification = Arc<Mutex<Option<NewBookingNotification>>>;

/// Watermark state machine: Uninitialized until the first successful
/// observation, Armed afterwards.
#[derive(Debug, Default)]
pub struct WatermarkTracker {
    watermark: Option<BookingWatermark>,
}

impl WatermarkTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current watermark, or None while uninitialized
    pub fn watermark(&self) -> Option<BookingWatermark> {
        self.watermark
    }

    /// Feed one observed MAX(booking_id) triple into the tracker.
    ///
    /// The first observation seeds the watermark and produces no
    /// notification. Afterwards, variants are evaluated in the fixed order
    /// (test drive, service, bike purchase); each observed maximum above the
    /// stored watermark raises it. Observed decreases are ignored: the
    /// watermark never goes down. Returns a notification when at least one
    /// variant advanced.
    pub fn observe(&mut self, snapshot: WatermarkSnapshot) -> Option<NewBookingNotification> {
        let watermark = match &mut self.watermark {
            None => {
                self.watermark = Some(BookingWatermark {
                    test_drive: snapshot.test_drive,
                    service: snapshot.service,
                    bike_purchase: snapshot.bike_purchase,
                });
                return None;
            }
            Some(watermark) => watermark,
        };

        let mut advanced = Vec::new();
        for variant in BookingVariant::ALL {
            let observed = snapshot.get(variant);
            if observed > watermark.get(variant) {
                watermark.set(variant, observed);
                advanced.push(variant);
            }
        }

        // Last advancing variant in evaluation order names the message
        let last = *advanced.last()?;
        Some(NewBookingNotification {
            variant: last,
            message: format!("New {} booking received!", last.label()),
            advanced,
        })
    }
}

/// The periodic monitor task. Owns the watermark; nothing else mutates it.
pub struct BookingMonitor {
    db: SqlitePool,
    event_bus: Arc<EventBus>,
    pending: PendingNotification,
    period: Duration,
    tracker: WatermarkTracker,
}

impl BookingMonitor {
    pub fn new(
        db: SqlitePool,
        event_bus: Arc<EventBus>,
        pending: PendingNotification,
        period: Duration,
    ) -> Self {
        Self {
            db,
            event_bus,
            pending,
            period,
            tracker: WatermarkTracker::new(),
        }
    }

    /// Current watermark, or None until the first successful tick
    pub fn watermark(&self) -> Option<BookingWatermark> {
        self.tracker.watermark()
    }

    /// Run one check: fetch the MAX(booking_id) triple and feed the tracker.
    ///
    /// A failed fetch is logged and swallowed; the watermark is untouched and
    /// the next tick retries with no backoff. A missed tick is absorbed: the
    /// next successful one compares against the same stale watermark and
    /// still detects the full delta.
    pub async fn tick(&mut self) {
        let was_armed = self.tracker.watermark().is_some();

        let snapshot = match db::bookings::max_ids(&self.db).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Booking check failed (will retry next tick): {}", e);
                return;
            }
        };

        match self.tracker.observe(snapshot) {
            Some(notification) => {
                info!(
                    "New bookings detected: {:?} (message: {})",
                    notification.advanced, notification.message
                );
                let event = AdminEvent::NewBookings {
                    variant: notification.variant,
                    message: notification.message.clone(),
                    advanced: notification.advanced.clone(),
                    timestamp: chrono::Utc::now(),
                };
                if self.event_bus.emit(event).is_err() {
                    debug!("No event subscribers; notification held for polling only");
                }
                *self.pending.lock().expect("pending notification lock poisoned") =
                    Some(notification);
            }
            None if !was_armed => {
                info!(
                    "Booking watermark seeded: {:?}",
                    self.tracker.watermark().unwrap_or_default()
                );
            }
            None => debug!("No new bookings"),
        }
    }

    /// Main monitor loop: one tick per period, sequential by construction (a
    /// slow tick delays the next, ticks never overlap). Runs until the host
    /// process ends.
    pub async fn run(mut self) {
        let mut tick = interval(self.period);
        loop {
            tick.tick().await;
            self.tick().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(test_drive: i64, service: i64, bike_purchase: i64) -> WatermarkSnapshot {
        WatermarkSnapshot {
            test_drive,
            service,
            bike_purchase,
        }
    }

    #[test]
    fn first_observation_seeds_without_notification() {
        let mut tracker = WatermarkTracker::new();
        assert_eq!(tracker.watermark(), None);

        let notification = tracker.observe(snapshot(3, 1, 7));
        assert_eq!(notification, None);
        assert_eq!(
            tracker.watermark(),
            Some(BookingWatermark {
                test_drive: 3,
                service: 1,
                bike_purchase: 7
            })
        );
    }

    #[test]
    fn single_variant_advance_notifies_that_variant() {
        let mut tracker = WatermarkTracker::new();
        tracker.observe(snapshot(3, 1, 7));

        let notification = tracker.observe(snapshot(3, 2, 7)).unwrap();
        assert_eq!(notification.variant, BookingVariant::Service);
        assert_eq!(notification.advanced, vec![BookingVariant::Service]);
        assert_eq!(notification.message, "New service booking received!");
        assert_eq!(
            tracker.watermark(),
            Some(BookingWatermark {
                test_drive: 3,
                service: 2,
                bike_purchase: 7
            })
        );
    }

    #[test]
    fn multi_variant_advance_message_names_last_evaluated() {
        let mut tracker = WatermarkTracker::new();
        tracker.observe(snapshot(3, 2, 7));

        // Test drive and bike purchase both advance; bike purchase is
        // evaluated last, so it names the message
        let notification = tracker.observe(snapshot(5, 2, 9)).unwrap();
        assert_eq!(notification.variant, BookingVariant::BikePurchase);
        assert_eq!(
            notification.advanced,
            vec![BookingVariant::TestDrive, BookingVariant::BikePurchase]
        );
        assert_eq!(notification.message, "New bike purchase booking received!");
    }

    #[test]
    fn quiet_observation_is_idempotent() {
        let mut tracker = WatermarkTracker::new();
        tracker.observe(snapshot(3, 1, 7));
        let before = tracker.watermark();

        assert_eq!(tracker.observe(snapshot(3, 1, 7)), None);
        assert_eq!(tracker.watermark(), before);
    }

    #[test]
    fn gap_between_observations_is_absorbed() {
        let mut tracker = WatermarkTracker::new();
        tracker.observe(snapshot(5, 0, 0));

        // An intermediate insert was never observed (a tick failed); the next
        // successful observation still reports the full advance
        assert_eq!(tracker.observe(snapshot(5, 0, 0)), None);
        let notification = tracker.observe(snapshot(9, 0, 0)).unwrap();
        assert_eq!(notification.variant, BookingVariant::TestDrive);
        assert_eq!(tracker.watermark().unwrap().test_drive, 9);
    }

    #[test]
    fn watermark_never_decreases() {
        let mut tracker = WatermarkTracker::new();
        tracker.observe(snapshot(5, 5, 5));

        assert_eq!(tracker.observe(snapshot(2, 5, 5)), None);
        assert_eq!(
            tracker.watermark(),
            Some(BookingWatermark {
                test_drive: 5,
                service: 5,
                bike_purchase: 5
            })
        );

        // Later advances are still measured against the undisturbed watermark
        let notification = tracker.observe(snapshot(6, 5, 5)).unwrap();
        assert_eq!(notification.variant, BookingVariant::TestDrive);
    }
}
