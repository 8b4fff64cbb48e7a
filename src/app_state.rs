//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::{EntryService, LeaderboardService, LedgerService, ParticipationService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Participation aggregation and scoring sync.
    pub participation_service: Arc<ParticipationService>,
    /// Campaign entry lifecycle and revenue aggregation.
    pub entry_service: Arc<EntryService>,
    /// Append-only point ledger.
    pub ledger_service: Arc<LedgerService>,
    /// Leaderboard snapshots.
    pub leaderboard_service: Arc<LeaderboardService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}
