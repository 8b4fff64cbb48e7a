//! Service layer: orchestration between the REST/WS surface, the pure
//! domain computations, and the document store.
//!
//! Every service follows the same pattern: fetch → pure domain reduce →
//! persist → emit events. Permission-denied writes are mirrored onto the
//! event bus (for UI-level toast reporting) before the error is re-thrown
//! to the caller.

pub mod entry_service;
pub mod leaderboard_service;
pub mod ledger_service;
pub mod participation_service;

pub use entry_service::EntryService;
pub use leaderboard_service::LeaderboardService;
pub use ledger_service::LedgerService;
pub use participation_service::ParticipationService;

use chrono::Utc;

use crate::domain::{EventBus, PlatformEvent};
use crate::error::GatewayError;

/// Mirrors a permission-denied store error onto the event bus so the UI
/// can surface it, leaving all other errors untouched. The error itself
/// is always re-thrown by the caller.
pub(crate) fn mirror_write_rejection(bus: &EventBus, collection: &str, err: &GatewayError) {
    if let GatewayError::PermissionDenied(reason) = err {
        let _ = bus.publish(PlatformEvent::WriteRejected {
            collection: collection.to_string(),
            reason: reason.clone(),
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn permission_denied_is_mirrored() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let err = GatewayError::PermissionDenied("write blocked".to_string());

        mirror_write_rejection(&bus, "point_transactions", &err);

        let event = rx.recv().await;
        let Ok(event) = event else {
            panic!("expected a write_rejected event");
        };
        assert_eq!(event.event_type_str(), "write_rejected");
    }

    #[tokio::test]
    async fn other_errors_are_not_mirrored() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let err = GatewayError::PersistenceError("connection reset".to_string());

        mirror_write_rejection(&bus, "leaderboards", &err);

        // Publish a marker; it must be the first event the subscriber sees.
        let _ = bus.publish(PlatformEvent::WriteRejected {
            collection: "marker".to_string(),
            reason: String::new(),
            timestamp: Utc::now(),
        });
        let event = rx.recv().await;
        let Ok(PlatformEvent::WriteRejected { collection, .. }) = event else {
            panic!("expected the marker event");
        };
        assert_eq!(collection, "marker");
    }
}
