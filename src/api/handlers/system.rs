//! System endpoints: health check and the transaction type catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::point_transaction::TransactionType;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Point transaction type info.
#[derive(Debug, Serialize, ToSchema)]
struct TransactionTypeInfo {
    tx_type: &'static str,
    description: &'static str,
    typical_direction: &'static str,
}

/// `GET /config/transaction-types` — List the point transaction types.
#[utoipa::path(
    get,
    path = "/config/transaction-types",
    tag = "System",
    summary = "List point transaction types",
    description = "Returns metadata for every transaction type the ledger accepts.",
    responses(
        (status = 200, description = "Transaction type catalog", body = Vec<TransactionTypeInfo>),
    )
)]
pub async fn transaction_types_handler() -> impl IntoResponse {
    let types: Vec<TransactionTypeInfo> = TransactionType::ALL
        .into_iter()
        .map(|tx_type| TransactionTypeInfo {
            tx_type: tx_type.as_str(),
            description: describe(tx_type),
            typical_direction: direction(tx_type),
        })
        .collect();
    (StatusCode::OK, Json(types))
}

const fn describe(tx_type: TransactionType) -> &'static str {
    match tx_type {
        TransactionType::CampaignEarned => "Points earned from a fantasy campaign",
        TransactionType::QuizCompleted => "Points earned by completing a quiz",
        TransactionType::RatingSubmitted => "Points earned by submitting a rating",
        TransactionType::Redemption => "Points spent in the rewards center",
        TransactionType::AdminAdjustment => "Manual correction from the back-office",
        TransactionType::Refund => "Points returned after a refund",
        TransactionType::Bonus => "Promotional bonus points",
    }
}

const fn direction(tx_type: TransactionType) -> &'static str {
    match tx_type {
        TransactionType::Redemption => "debit",
        TransactionType::AdminAdjustment => "either",
        _ => "credit",
    }
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/transaction-types", get(transaction_types_handler))
}
