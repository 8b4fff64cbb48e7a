//! Entry service: campaign entry lifecycle and revenue aggregation.

use chrono::Utc;

use crate::domain::campaign_entry::{
    CampaignEntry, EntryStats, NewCampaignEntry, PaymentMethod, PaymentStatus, aggregate_entries,
};
use crate::domain::{CampaignId, EventBus, PlatformEvent};
use crate::error::GatewayError;
use crate::persistence::PostgresStore;
use crate::service::mirror_write_rejection;

/// Orchestration layer for campaign entries.
#[derive(Debug, Clone)]
pub struct EntryService {
    store: PostgresStore,
    event_bus: EventBus,
}

impl EntryService {
    /// Creates a new `EntryService`.
    #[must_use]
    pub fn new(store: PostgresStore, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Records a new campaign entry at signup time.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::InvalidRequest`] on a negative fee, or a
    /// [`GatewayError`] if the write fails. Permission-denied writes are
    /// mirrored onto the event bus before being re-thrown.
    pub async fn record_entry(
        &self,
        entry: &NewCampaignEntry,
    ) -> Result<CampaignEntry, GatewayError> {
        if let Some(fee) = entry.entry_fee
            && fee < 0.0
        {
            return Err(GatewayError::InvalidRequest(
                "entry fee must be non-negative".to_string(),
            ));
        }

        let stored = self
            .store
            .insert_entry(entry)
            .await
            .inspect_err(|err| mirror_write_rejection(&self.event_bus, "campaign_entries", err))?;

        let _ = self.event_bus.publish(PlatformEvent::EntryRecorded {
            campaign_id: stored.campaign_id,
            user_id: *stored.user_id.as_uuid(),
            payment_status: stored.payment_status.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(entry_id = %stored.id, campaign_id = %stored.campaign_id, "entry recorded");
        Ok(stored)
    }

    /// Transitions an entry's payment status: Pending→Paid or
    /// Pending→Refunded only.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EntryNotFound`] for an unknown entry,
    /// [`GatewayError::InvalidPaymentTransition`] when the entry is no
    /// longer Pending (or the target is Pending), or a [`GatewayError`]
    /// on store failure.
    pub async fn update_payment(
        &self,
        entry_id: uuid::Uuid,
        to: PaymentStatus,
        method: Option<PaymentMethod>,
    ) -> Result<CampaignEntry, GatewayError> {
        if to == PaymentStatus::Pending {
            return Err(GatewayError::InvalidRequest(
                "target status must be paid or refunded".to_string(),
            ));
        }

        let settled = self
            .store
            .settle_entry_payment(entry_id, to, method)
            .await
            .inspect_err(|err| mirror_write_rejection(&self.event_bus, "campaign_entries", err))?;

        let Some(entry) = settled else {
            // The conditional update matched nothing: either the entry is
            // unknown or it already left Pending.
            let current = self.store.get_entry(entry_id).await?;
            return match current {
                None => Err(GatewayError::EntryNotFound(entry_id)),
                Some(existing) => Err(GatewayError::InvalidPaymentTransition {
                    from: existing.payment_status.to_string(),
                    to: to.to_string(),
                }),
            };
        };

        let _ = self.event_bus.publish(PlatformEvent::PaymentUpdated {
            campaign_id: entry.campaign_id,
            entry_id: entry.id,
            payment_status: entry.payment_status.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(entry_id = %entry.id, status = %entry.payment_status, "payment updated");
        Ok(entry)
    }

    /// Aggregates entries into revenue/segmentation statistics.
    ///
    /// An absent campaign means platform-wide. Zero entries yield the
    /// canonical empty aggregation, never an error.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the fetch fails.
    pub async fn entry_stats(
        &self,
        campaign: Option<CampaignId>,
    ) -> Result<EntryStats, GatewayError> {
        let entries = self.store.entries(campaign).await?;
        Ok(aggregate_entries(&entries))
    }
}
