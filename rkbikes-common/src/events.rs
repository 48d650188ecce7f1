//! Event types and EventBus for the admin service
//!
//! Events are broadcast in-process via the EventBus; the new-booking
//! notification additionally lands in a polled one-slot cell owned by the
//! HTTP layer (the notification channel is polled, not pushed).

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::bookings::{BookingStatus, BookingVariant};

/// Admin service event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AdminEvent {
    /// One or more new bookings were detected by the watermark monitor.
    ///
    /// Emitted at most once per monitor tick. `message` reflects the last
    /// advancing variant in the monitor's fixed evaluation order; `advanced`
    /// carries every variant that advanced this tick so consumers can refresh
    /// aggregate counters once and detail views selectively.
    NewBookings {
        /// Variant the human-readable message refers to
        variant: BookingVariant,
        /// Human-readable notification text
        message: String,
        /// All variants whose watermark advanced this tick, in evaluation order
        advanced: Vec<BookingVariant>,
        /// When the advance was observed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A booking's status was updated through the admin API
    BookingStatusChanged {
        /// Variant the booking belongs to
        variant: BookingVariant,
        /// Booking id within the variant's namespace
        booking_id: i64,
        /// Status after the write
        status: BookingStatus,
        /// When the write was performed
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// In-process event bus backed by `tokio::sync::broadcast`.
///
/// Subscribers receive events emitted after subscription; slow subscribers
/// lose the oldest buffered events once `capacity` is exceeded.
pub struct EventBus {
    tx: broadcast::Sender<AdminEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<AdminEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers.
    ///
    /// Returns the subscriber count, or an error when nobody is listening.
    /// Having no subscribers is normal for this service (the notification
    /// channel is polled); callers log and move on.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: AdminEvent,
    ) -> Result<usize, broadcast::error::SendError<AdminEvent>> {
        self.tx.send(event)
    }

    /// Channel capacity this bus was created with
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_emitted_event() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.emit(AdminEvent::BookingStatusChanged {
            variant: BookingVariant::Service,
            booking_id: 7,
            status: BookingStatus::Confirmed,
            timestamp: chrono::Utc::now(),
        })
        .unwrap();

        match rx.recv().await.unwrap() {
            AdminEvent::BookingStatusChanged {
                variant,
                booking_id,
                status,
                ..
            } => {
                assert_eq!(variant, BookingVariant::Service);
                assert_eq!(booking_id, 7);
                assert_eq!(status, BookingStatus::Confirmed);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn emit_without_subscribers_is_an_error() {
        let bus = EventBus::new(16);
        let result = bus.emit(AdminEvent::NewBookings {
            variant: BookingVariant::TestDrive,
            message: "New test drive booking received!".to_string(),
            advanced: vec![BookingVariant::TestDrive],
            timestamp: chrono::Utc::now(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn new_bookings_event_serializes_with_type_tag() {
        let event = AdminEvent::NewBookings {
            variant: BookingVariant::BikePurchase,
            message: "New bike booking received!".to_string(),
            advanced: vec![BookingVariant::Service, BookingVariant::BikePurchase],
            timestamp: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "NewBookings");
        assert_eq!(json["variant"], "bike");
        assert_eq!(json["advanced"][0], "service");
    }
}
