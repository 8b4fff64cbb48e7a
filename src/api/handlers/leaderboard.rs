//! Leaderboard handlers: snapshot update and read.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{LeaderboardResponse, MovieScopeParams, UpdateLeaderboardRequest};
use crate::app_state::AppState;
use crate::domain::leaderboard::{LeaderboardScore, board_key};
use crate::domain::{CampaignId, MovieId};
use crate::error::{ErrorResponse, GatewayError};

/// `PUT /campaigns/:id/leaderboards/:board_type` — Recompute a snapshot.
///
/// Full replace: the supplied scores are ranked and overwrite the
/// previous snapshot for the key, last write wins.
///
/// # Errors
///
/// Returns [`GatewayError`] on an empty board type or a store failure.
#[utoipa::path(
    put,
    path = "/api/v1/campaigns/{id}/leaderboards/{board_type}",
    tag = "Leaderboards",
    summary = "Overwrite a leaderboard snapshot",
    description = "Sorts the supplied scores descending by points, assigns 1-based consecutive ranks (stable for ties), and replaces the snapshot for (campaign, type, movie?).",
    params(
        ("id" = uuid::Uuid, Path, description = "Campaign UUID"),
        ("board_type" = String, Path, description = "Leaderboard type label"),
    ),
    request_body = UpdateLeaderboardRequest,
    responses(
        (status = 200, description = "The stored snapshot", body = LeaderboardResponse),
        (status = 403, description = "Write rejected by the store", body = ErrorResponse),
    )
)]
pub async fn update_leaderboard(
    State(state): State<AppState>,
    Path((id, board_type)): Path<(uuid::Uuid, String)>,
    Json(req): Json<UpdateLeaderboardRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let scores: Vec<LeaderboardScore> =
        req.entries.into_iter().map(LeaderboardScore::from).collect();

    let board = state
        .leaderboard_service
        .update(
            CampaignId::from_uuid(id),
            &board_type,
            req.movie_id.map(MovieId::from_uuid),
            scores,
        )
        .await?;

    Ok(Json(LeaderboardResponse::from(board)))
}

/// `GET /campaigns/:id/leaderboards/:board_type` — Read a snapshot.
///
/// # Errors
///
/// Returns [`GatewayError::LeaderboardNotFound`] if the snapshot was
/// never computed.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns/{id}/leaderboards/{board_type}",
    tag = "Leaderboards",
    summary = "Read a leaderboard snapshot",
    description = "Returns the stored snapshot verbatim for (campaign, type, movie?).",
    params(
        ("id" = uuid::Uuid, Path, description = "Campaign UUID"),
        ("board_type" = String, Path, description = "Leaderboard type label"),
        MovieScopeParams,
    ),
    responses(
        (status = 200, description = "The stored snapshot", body = LeaderboardResponse),
        (status = 404, description = "Snapshot never computed", body = ErrorResponse),
    )
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path((id, board_type)): Path<(uuid::Uuid, String)>,
    Query(params): Query<MovieScopeParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let campaign_id = CampaignId::from_uuid(id);
    let movie_id = params.movie_id.map(MovieId::from_uuid);

    let board = state
        .leaderboard_service
        .get(campaign_id, &board_type, movie_id)
        .await?
        .ok_or_else(|| GatewayError::LeaderboardNotFound {
            campaign_id: id,
            board_key: board_key(&board_type, movie_id),
        })?;

    Ok(Json(LeaderboardResponse::from(board)))
}

/// Leaderboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/campaigns/{id}/leaderboards/{board_type}",
        get(get_leaderboard).put(update_leaderboard),
    )
}
