use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::domain::Fund;
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsResponse {
    pub funds: Vec<Fund>,
}

pub async fn get_funds(State(state): State<AppState>) -> Result<Json<FundsResponse>, AppError> {
    let funds = state.ledger.get_funds().await?;
    Ok(Json(FundsResponse { funds }))
}
