//! Point ledger handlers: append and history reads.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    LimitParams, PointTransactionResponse, RecordPointsRequest, TransactionListResponse,
};
use crate::app_state::AppState;
use crate::domain::point_transaction::TransactionType;
use crate::domain::{CampaignId, UserId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /users/:id/points` — Append one point transaction.
///
/// The running balance is computed server-side; the response carries the
/// stored `balance_after`.
///
/// # Errors
///
/// Returns [`GatewayError`] on an unknown transaction type, a zero
/// amount, or a store failure.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/points",
    tag = "Ledger",
    summary = "Record a point transaction",
    description = "Appends one immutable ledger row. balance_after is computed atomically from the user's latest row; callers never supply it.",
    params(
        ("id" = uuid::Uuid, Path, description = "User UUID"),
    ),
    request_body = RecordPointsRequest,
    responses(
        (status = 201, description = "Stored transaction with running balance", body = PointTransactionResponse),
        (status = 400, description = "Invalid type or amount", body = ErrorResponse),
        (status = 403, description = "Write rejected by the store", body = ErrorResponse),
    )
)]
pub async fn record_points(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<RecordPointsRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let tx_type = TransactionType::parse(&req.tx_type)
        .ok_or_else(|| GatewayError::InvalidTransactionType(req.tx_type.clone()))?;

    let stored = state
        .ledger_service
        .record(
            UserId::from_uuid(id),
            tx_type,
            req.amount,
            &req.description,
            req.metadata,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PointTransactionResponse::from(stored)),
    ))
}

/// `GET /users/:id/points` — Recent transactions for a user, newest first.
///
/// # Errors
///
/// Returns [`GatewayError`] if the fetch fails.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/points",
    tag = "Ledger",
    summary = "List a user's recent transactions",
    description = "Returns the most recent ledger rows for the user, newest first. The limit falls back to the configured default and is clamped to the configured maximum.",
    params(
        ("id" = uuid::Uuid, Path, description = "User UUID"),
        LimitParams,
    ),
    responses(
        (status = 200, description = "Transactions, newest first", body = TransactionListResponse),
    )
)]
pub async fn user_points(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Query(params): Query<LimitParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let transactions = state
        .ledger_service
        .recent_for_user(UserId::from_uuid(id), params.limit)
        .await?;

    Ok(Json(TransactionListResponse {
        data: transactions
            .into_iter()
            .map(PointTransactionResponse::from)
            .collect(),
    }))
}

/// `GET /campaigns/:id/points` — All transactions tagged with a campaign.
///
/// # Errors
///
/// Returns [`GatewayError`] if the fetch fails.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns/{id}/points",
    tag = "Ledger",
    summary = "List a campaign's transactions",
    description = "Returns every ledger row whose metadata carries the campaign id, newest first.",
    params(
        ("id" = uuid::Uuid, Path, description = "Campaign UUID"),
    ),
    responses(
        (status = 200, description = "Transactions, newest first", body = TransactionListResponse),
    )
)]
pub async fn campaign_points(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let transactions = state
        .ledger_service
        .for_campaign(CampaignId::from_uuid(id))
        .await?;

    Ok(Json(TransactionListResponse {
        data: transactions
            .into_iter()
            .map(PointTransactionResponse::from)
            .collect(),
    }))
}

/// Point ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/{id}/points", get(user_points).post(record_points))
        .route("/campaigns/{id}/points", get(campaign_points))
}
