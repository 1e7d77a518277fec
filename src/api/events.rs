use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::{Decimal, FundId, InvestmentEvent};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub amount: Decimal,
    pub fund_id: FundId,
}

pub async fn post_deposit(
    State(state): State<AppState>,
    payload: Result<Json<DepositRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<InvestmentEvent>), AppError> {
    let Json(request) = payload?;
    let event = state.ledger.make_deposit(request.amount).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn post_allocation(
    State(state): State<AppState>,
    payload: Result<Json<AllocationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<InvestmentEvent>), AppError> {
    let Json(request) = payload?;
    let event = state
        .ledger
        .make_allocation(request.amount, request.fund_id)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn truncate_events(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.ledger.truncate_investment_events().await?;
    Ok(StatusCode::NO_CONTENT)
}
