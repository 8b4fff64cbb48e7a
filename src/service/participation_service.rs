//! Participation service: aggregation over campaign and tournament
//! participation records, plus the scoring sync write path.

use futures_util::future::join_all;

use crate::domain::EventBus;
use crate::domain::participation::{
    Participation, ParticipationStats, aggregate_participations,
};
use crate::domain::ParentRef;
use crate::error::GatewayError;
use crate::persistence::PostgresStore;
use crate::service::mirror_write_rejection;

/// Orchestration layer for participation reads and the scoring sync.
///
/// Aggregation is a pure read-reduce-return: fetch every record under the
/// parent, reduce in memory, return. No caching layer of its own.
#[derive(Debug, Clone)]
pub struct ParticipationService {
    store: PostgresStore,
    event_bus: EventBus,
    top_limit: usize,
}

impl ParticipationService {
    /// Creates a new `ParticipationService`.
    ///
    /// `top_limit` bounds the top-participants listing in every
    /// aggregation (default 10 via config).
    #[must_use]
    pub fn new(store: PostgresStore, event_bus: EventBus, top_limit: usize) -> Self {
        Self {
            store,
            event_bus,
            top_limit,
        }
    }

    /// Aggregates all participation records under one parent.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the fetch fails.
    pub async fn participation_stats(
        &self,
        parent: &ParentRef,
    ) -> Result<ParticipationStats, GatewayError> {
        let records = self.store.participations_for(parent).await?;
        Ok(aggregate_participations(&records, self.top_limit))
    }

    /// Aggregates several parents concurrently.
    ///
    /// The per-parent fetches fire concurrently and are joined
    /// all-settled style: a failed parent yields the all-zero empty
    /// aggregation with a logged warning instead of aborting the batch.
    pub async fn batch_participation_stats(
        &self,
        parents: &[ParentRef],
    ) -> Vec<(ParentRef, ParticipationStats)> {
        let results = join_all(
            parents
                .iter()
                .map(|parent| self.participation_stats(parent)),
        )
        .await;

        parents
            .iter()
            .copied()
            .zip(results)
            .map(|(parent, result)| (parent, stats_or_empty(&parent, result)))
            .collect()
    }

    /// Creates or replaces a user's participation record under a parent.
    /// This is the write path used by the scoring logic.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the write fails; permission-denied
    /// writes are mirrored onto the event bus before being re-thrown.
    pub async fn sync_participation(
        &self,
        parent: &ParentRef,
        participation: &Participation,
    ) -> Result<(), GatewayError> {
        self.store
            .upsert_participation(parent, participation)
            .await
            .inspect_err(|err| mirror_write_rejection(&self.event_bus, "participations", err))
    }
}

/// Folds a per-parent aggregation result into the batch: failures become
/// the empty aggregation, logged but never propagated.
fn stats_or_empty(
    parent: &ParentRef,
    result: Result<ParticipationStats, GatewayError>,
) -> ParticipationStats {
    match result {
        Ok(stats) => stats,
        Err(err) => {
            tracing::warn!(%parent, error = %err, "participation aggregation failed; substituting empty stats");
            ParticipationStats::empty()
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::CampaignId;

    #[test]
    fn failed_parent_folds_to_empty_stats() {
        let parent = ParentRef::campaign(CampaignId::new());
        let stats = stats_or_empty(
            &parent,
            Err(GatewayError::PersistenceError("timeout".to_string())),
        );
        assert_eq!(stats, ParticipationStats::empty());
    }

    #[test]
    fn successful_parent_passes_through() {
        let parent = ParentRef::campaign(CampaignId::new());
        let mut stats = ParticipationStats::empty();
        stats.total_participants = 7;
        let folded = stats_or_empty(&parent, Ok(stats.clone()));
        assert_eq!(folded, stats);
    }
}
