//! Prize tier resolution handler.

use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{ApplicableTierDto, ApplicableTiersRequest, ApplicableTiersResponse};
use crate::app_state::AppState;
use crate::domain::prize::applicable_tiers;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /prize-tiers/applicable` — Resolve the active prize tiers.
///
/// Pure computation over the supplied distribution and participant
/// count; nothing is read from or written to the store.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] on a malformed tier.
#[utoipa::path(
    post,
    path = "/api/v1/prize-tiers/applicable",
    tag = "Prizes",
    summary = "Resolve active prize tiers",
    description = "Filters the distribution to tiers whose min_participants gate is satisfied and renders each tier's display rank range.",
    request_body = ApplicableTiersRequest,
    responses(
        (status = 200, description = "Active tiers in authored order", body = ApplicableTiersResponse),
        (status = 400, description = "Malformed tier", body = ErrorResponse),
    )
)]
pub async fn resolve_applicable_tiers(
    Json(req): Json<ApplicableTiersRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let (distribution, participant_count) = req.into_distribution()?;
    let active = applicable_tiers(&distribution, participant_count);

    Ok(Json(ApplicableTiersResponse {
        applicable_tiers: active.into_iter().map(ApplicableTierDto::from).collect(),
    }))
}

/// Prize resolution routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/prize-tiers/applicable", post(resolve_applicable_tiers))
}
