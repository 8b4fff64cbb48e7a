//! Participation aggregation handlers: per-parent, batch, and scoring sync.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    BatchStatsItem, BatchStatsRequest, BatchStatsResponse, ParticipationStatsResponse,
    SyncParticipationRequest,
};
use crate::app_state::AppState;
use crate::domain::participation::Participation;
use crate::domain::{CampaignId, ParentRef, UserId};
use crate::error::{ErrorResponse, GatewayError};

/// `GET /campaigns/:id/participation-stats` — Aggregate one campaign.
///
/// # Errors
///
/// Returns [`GatewayError`] if the fetch fails.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns/{id}/participation-stats",
    tag = "Stats",
    summary = "Aggregate campaign participation",
    description = "Reduces every participation record under the campaign into totals, guarded averages, accuracy, and a top-N ranking.",
    params(
        ("id" = uuid::Uuid, Path, description = "Campaign UUID"),
    ),
    responses(
        (status = 200, description = "Participation aggregation", body = ParticipationStatsResponse),
        (status = 500, description = "Fetch failed", body = ErrorResponse),
    )
)]
pub async fn campaign_stats(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let parent = ParentRef::campaign(CampaignId::from_uuid(id));
    let stats = state
        .participation_service
        .participation_stats(&parent)
        .await?;
    Ok(Json(ParticipationStatsResponse::from(stats)))
}

/// `GET /tournaments/:id/participation-stats` — Aggregate one tournament.
///
/// # Errors
///
/// Returns [`GatewayError`] if the fetch fails.
#[utoipa::path(
    get,
    path = "/api/v1/tournaments/{id}/participation-stats",
    tag = "Stats",
    summary = "Aggregate tournament participation",
    description = "Reduces every participation record under the cricket tournament into totals, guarded averages, accuracy, and a top-N ranking.",
    params(
        ("id" = uuid::Uuid, Path, description = "Tournament UUID"),
    ),
    responses(
        (status = 200, description = "Participation aggregation", body = ParticipationStatsResponse),
        (status = 500, description = "Fetch failed", body = ErrorResponse),
    )
)]
pub async fn tournament_stats(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let parent = ParentRef::tournament(id);
    let stats = state
        .participation_service
        .participation_stats(&parent)
        .await?;
    Ok(Json(ParticipationStatsResponse::from(stats)))
}

/// `POST /stats/participation` — Aggregate several parents in one call.
///
/// Per-target fetches run concurrently; a failed target comes back as the
/// all-zero aggregation rather than failing the batch.
#[utoipa::path(
    post,
    path = "/api/v1/stats/participation",
    tag = "Stats",
    summary = "Batch participation aggregation",
    description = "Aggregates several campaigns/tournaments concurrently. A failed target yields the all-zero aggregation instead of aborting the batch.",
    request_body = BatchStatsRequest,
    responses(
        (status = 200, description = "Per-target aggregations in request order", body = BatchStatsResponse),
    )
)]
pub async fn batch_stats(
    State(state): State<AppState>,
    Json(req): Json<BatchStatsRequest>,
) -> impl IntoResponse {
    let parents: Vec<ParentRef> = req.targets.into_iter().map(ParentRef::from).collect();
    let results = state
        .participation_service
        .batch_participation_stats(&parents)
        .await;

    let results = results
        .into_iter()
        .map(|(parent, stats)| BatchStatsItem {
            kind: parent.kind.as_str().to_string(),
            id: parent.id,
            stats: ParticipationStatsResponse::from(stats),
        })
        .collect();

    Json(BatchStatsResponse { results })
}

/// `POST /participations` — Scoring sync: create-or-replace one
/// participation record.
///
/// # Errors
///
/// Returns [`GatewayError`] if the write fails.
#[utoipa::path(
    post,
    path = "/api/v1/participations",
    tag = "Stats",
    summary = "Upsert a participation record",
    description = "Write path used by the scoring logic: creates or replaces a user's participation record under a campaign or tournament.",
    request_body = SyncParticipationRequest,
    responses(
        (status = 204, description = "Participation stored"),
        (status = 403, description = "Write rejected by the store", body = ErrorResponse),
    )
)]
pub async fn sync_participation(
    State(state): State<AppState>,
    Json(req): Json<SyncParticipationRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let parent = ParentRef {
        kind: req.kind,
        id: req.parent_id,
    };
    let participation = Participation {
        user_id: UserId::from_uuid(req.user_id),
        total_points: req.total_points,
        predictions_count: req.predictions_count,
        correct_predictions: req.correct_predictions,
    };
    state
        .participation_service
        .sync_participation(&parent, &participation)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Participation aggregation and scoring sync routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats/participation", post(batch_stats))
        .route(
            "/campaigns/{id}/participation-stats",
            get(campaign_stats),
        )
        .route(
            "/tournaments/{id}/participation-stats",
            get(tournament_stats),
        )
        .route("/participations", post(sync_participation))
}
