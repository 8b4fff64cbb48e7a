//! REST endpoint handlers organized by resource.

pub mod entries;
pub mod leaderboard;
pub mod ledger;
pub mod prizes;
pub mod stats;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(stats::routes())
        .merge(entries::routes())
        .merge(prizes::routes())
        .merge(ledger::routes())
        .merge(leaderboard::routes())
}
