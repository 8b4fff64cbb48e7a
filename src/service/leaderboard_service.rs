//! Leaderboard service: full-replace snapshot writes and verbatim reads.

use chrono::Utc;

use crate::domain::leaderboard::{CampaignLeaderboard, LeaderboardScore, rank_entries};
use crate::domain::{CampaignId, EventBus, MovieId, PlatformEvent};
use crate::error::GatewayError;
use crate::persistence::PostgresStore;
use crate::service::mirror_write_rejection;

/// Orchestration layer for leaderboard snapshots.
///
/// Updates are full replaces: every recomputation re-derives the entire
/// snapshot from the caller-supplied scores and overwrites the previous
/// document, last write wins.
#[derive(Debug, Clone)]
pub struct LeaderboardService {
    store: PostgresStore,
    event_bus: EventBus,
}

impl LeaderboardService {
    /// Creates a new `LeaderboardService`.
    #[must_use]
    pub fn new(store: PostgresStore, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Ranks the supplied scores and overwrites the snapshot for
    /// `(campaign, type, movie?)`.
    ///
    /// Callers are expected to have already gathered all relevant
    /// participation records; this is not an incremental update.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::InvalidRequest`] on an empty board type,
    /// or a [`GatewayError`] if the write fails. Permission-denied writes
    /// are mirrored onto the event bus before being re-thrown.
    pub async fn update(
        &self,
        campaign_id: CampaignId,
        board_type: &str,
        movie_id: Option<MovieId>,
        scores: Vec<LeaderboardScore>,
    ) -> Result<CampaignLeaderboard, GatewayError> {
        if board_type.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "board type must not be empty".to_string(),
            ));
        }

        let board = CampaignLeaderboard {
            campaign_id,
            board_type: board_type.to_string(),
            movie_id,
            entries: rank_entries(scores),
            last_updated: Utc::now(),
        };

        self.store
            .upsert_leaderboard(&board)
            .await
            .inspect_err(|err| mirror_write_rejection(&self.event_bus, "leaderboards", err))?;

        let _ = self.event_bus.publish(PlatformEvent::LeaderboardUpdated {
            campaign_id,
            board_key: board.board_key(),
            entry_count: board.entries.len(),
            timestamp: Utc::now(),
        });

        tracing::info!(
            %campaign_id,
            board_key = %board.board_key(),
            entries = board.entries.len(),
            "leaderboard updated"
        );
        Ok(board)
    }

    /// Reads the snapshot for `(campaign, type, movie?)` verbatim;
    /// `None` if never computed.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the fetch fails.
    pub async fn get(
        &self,
        campaign_id: CampaignId,
        board_type: &str,
        movie_id: Option<MovieId>,
    ) -> Result<Option<CampaignLeaderboard>, GatewayError> {
        self.store
            .get_leaderboard(campaign_id, board_type, movie_id)
            .await
    }
}
