//! Domain events reflecting platform state changes.
//!
//! Every write path emits a [`PlatformEvent`] through the [`super::EventBus`].
//! Events are broadcast to WebSocket subscribers so the UI can react
//! without polling; `write_rejected` is the channel the UI uses to toast
//! permission-denied writes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::CampaignId;

/// Domain event emitted after a state change (or a rejected write).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PlatformEvent {
    /// Emitted after a point transaction is appended to the ledger.
    PointsRecorded {
        /// The user whose balance moved.
        user_id: uuid::Uuid,
        /// Transaction type string (e.g. `"quiz_completed"`).
        tx_type: String,
        /// Signed point delta.
        amount: i64,
        /// Balance after the transaction.
        balance_after: i64,
        /// Campaign tag from the transaction metadata, when present.
        campaign_id: Option<CampaignId>,
        /// Append timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a leaderboard snapshot is overwritten.
    LeaderboardUpdated {
        /// Campaign the leaderboard belongs to.
        campaign_id: CampaignId,
        /// Document key (`type` or `type_movieId`).
        board_key: String,
        /// Number of ranked entries in the new snapshot.
        entry_count: usize,
        /// Snapshot timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a campaign entry is recorded.
    EntryRecorded {
        /// Campaign the entry belongs to.
        campaign_id: CampaignId,
        /// The entering user.
        user_id: uuid::Uuid,
        /// Initial payment status string.
        payment_status: String,
        /// Signup timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after an entry's payment status transitions.
    PaymentUpdated {
        /// Campaign the entry belongs to.
        campaign_id: CampaignId,
        /// The affected entry.
        entry_id: uuid::Uuid,
        /// New payment status string.
        payment_status: String,
        /// Transition timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when the document store rejects a write for lack of
    /// permission, before the error is re-thrown to the caller.
    WriteRejected {
        /// The collection the write targeted.
        collection: String,
        /// Store-reported reason.
        reason: String,
        /// Rejection timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl PlatformEvent {
    /// Returns the campaign this event is associated with, if any.
    ///
    /// Events without a campaign association (ledger writes with no
    /// campaign tag, rejected writes) are delivered to wildcard
    /// subscribers only.
    #[must_use]
    pub const fn campaign_id(&self) -> Option<CampaignId> {
        match self {
            Self::PointsRecorded { campaign_id, .. } => *campaign_id,
            Self::LeaderboardUpdated { campaign_id, .. }
            | Self::EntryRecorded { campaign_id, .. }
            | Self::PaymentUpdated { campaign_id, .. } => Some(*campaign_id),
            Self::WriteRejected { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::PointsRecorded { .. } => "points_recorded",
            Self::LeaderboardUpdated { .. } => "leaderboard_updated",
            Self::EntryRecorded { .. } => "entry_recorded",
            Self::PaymentUpdated { .. } => "payment_updated",
            Self::WriteRejected { .. } => "write_rejected",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn leaderboard_event_carries_campaign() {
        let id = CampaignId::new();
        let event = PlatformEvent::LeaderboardUpdated {
            campaign_id: id,
            board_key: "overall".to_string(),
            entry_count: 3,
            timestamp: Utc::now(),
        };
        assert_eq!(event.campaign_id(), Some(id));
        assert_eq!(event.event_type_str(), "leaderboard_updated");
    }

    #[test]
    fn write_rejected_has_no_campaign() {
        let event = PlatformEvent::WriteRejected {
            collection: "point_transactions".to_string(),
            reason: "permission denied".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(event.campaign_id(), None);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = PlatformEvent::PointsRecorded {
            user_id: uuid::Uuid::new_v4(),
            tx_type: "bonus".to_string(),
            amount: 100,
            balance_after: 100,
            campaign_id: None,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("points_recorded"));
        assert!(json.contains("\"amount\":100"));
    }
}
