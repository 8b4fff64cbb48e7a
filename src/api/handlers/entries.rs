//! Campaign entry handlers: signup, payment settlement, revenue stats.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::api::dto::{
    CampaignScopeParams, CreateEntryRequest, EntryResponse, EntryStatsResponse,
    UpdatePaymentRequest,
};
use crate::app_state::AppState;
use crate::domain::CampaignId;
use crate::domain::campaign_entry::{NewCampaignEntry, PaymentMethod, PaymentStatus};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /entries` — Record a campaign entry at signup time.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid status/method strings, a negative
/// fee, or a store failure.
#[utoipa::path(
    post,
    path = "/api/v1/entries",
    tag = "Entries",
    summary = "Record a campaign entry",
    description = "Creates an entry with Pending payment status unless an explicit initial status is supplied.",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry recorded", body = EntryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_entry(
    State(state): State<AppState>,
    Json(req): Json<CreateEntryRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let entry = NewCampaignEntry::try_from(req)?;
    let stored = state.entry_service.record_entry(&entry).await?;
    Ok((StatusCode::CREATED, Json(EntryResponse::from(stored))))
}

/// `PATCH /entries/:id/payment` — Settle or refund a pending entry.
///
/// # Errors
///
/// Returns [`GatewayError::EntryNotFound`] for an unknown entry and
/// [`GatewayError::InvalidPaymentTransition`] when the entry already left
/// Pending.
#[utoipa::path(
    patch,
    path = "/api/v1/entries/{id}/payment",
    tag = "Entries",
    summary = "Transition an entry's payment status",
    description = "Applies Pending→Paid or Pending→Refunded. Any other transition is rejected with a conflict.",
    params(
        ("id" = uuid::Uuid, Path, description = "Entry UUID"),
    ),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Updated entry", body = EntryResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse),
        (status = 409, description = "Illegal transition", body = ErrorResponse),
    )
)]
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdatePaymentRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let to = PaymentStatus::parse(&req.status).ok_or_else(|| {
        GatewayError::InvalidRequest(format!("unknown payment status: {}", req.status))
    })?;
    let method = req
        .method
        .as_deref()
        .map(|method| {
            PaymentMethod::parse(method).ok_or_else(|| {
                GatewayError::InvalidRequest(format!("unknown payment method: {method}"))
            })
        })
        .transpose()?;

    let entry = state.entry_service.update_payment(id, to, method).await?;
    Ok(Json(EntryResponse::from(entry)))
}

/// `GET /entries/stats` — Revenue/segmentation aggregation over entries.
///
/// # Errors
///
/// Returns [`GatewayError`] if the fetch fails.
#[utoipa::path(
    get,
    path = "/api/v1/entries/stats",
    tag = "Entries",
    summary = "Aggregate campaign entries",
    description = "Computes entry counts, revenue and fee averages over paid entries, tier/method/city/state breakdowns, and the monthly distinct-paying-user revenue series. Absent campaign_id means platform-wide.",
    params(CampaignScopeParams),
    responses(
        (status = 200, description = "Entry aggregation", body = EntryStatsResponse),
        (status = 500, description = "Fetch failed", body = ErrorResponse),
    )
)]
pub async fn entry_stats(
    State(state): State<AppState>,
    Query(params): Query<CampaignScopeParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let campaign = params.campaign_id.map(CampaignId::from_uuid);
    let stats = state.entry_service.entry_stats(campaign).await?;
    Ok(Json(EntryStatsResponse::from(stats)))
}

/// Campaign entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries", post(create_entry))
        .route("/entries/stats", get(entry_stats))
        .route("/entries/{id}/payment", patch(update_payment))
}
