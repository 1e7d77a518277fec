use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::domain::{HistoryEntry, IsaSnapshot};
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub event_count: usize,
    pub events: Vec<HistoryEntry>,
}

pub async fn get_isa(State(state): State<AppState>) -> Result<Json<IsaSnapshot>, AppError> {
    Ok(Json(state.ledger.get_isa().await?))
}

pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, AppError> {
    let events = state.ledger.get_transaction_history().await?;
    Ok(Json(HistoryResponse {
        event_count: events.len(),
        events,
    }))
}
