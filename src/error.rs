use crate::domain::{Decimal, EventKind, FundId};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of ledger operations.
///
/// `InsufficientFunds` is recoverable by the caller. Storage faults are
/// surfaced verbatim and never retried.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Insufficient unallocated funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),
    #[error("Amount overflows the ledger's decimal range")]
    AmountOverflow,
    #[error("Unknown fund: {0}")]
    UnknownFund(FundId),
    #[error("{kind} event has an invalid fund link: {fund_id:?}")]
    InvalidFundLink {
        kind: EventKind,
        fund_id: Option<FundId>,
    },
    #[error("Unsupported event kind in ledger: {0}")]
    UnsupportedEventKind(EventKind),
    #[error("Corrupt event row: {0}")]
    CorruptRow(String),
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds { .. } => AppError::Conflict(err.to_string()),
            LedgerError::InvalidAmount(_)
            | LedgerError::AmountOverflow
            | LedgerError::InvalidFundLink { .. } => AppError::BadRequest(err.to_string()),
            LedgerError::UnknownFund(_) => AppError::NotFound(err.to_string()),
            LedgerError::UnsupportedEventKind(_)
            | LedgerError::CorruptRow(_)
            | LedgerError::Storage(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
