pub mod events;
pub mod funds;
pub mod health;
pub mod isa;

use crate::service::LedgerService;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub ledger: LedgerService,
}

impl AppState {
    pub fn new(ledger: LedgerService) -> Self {
        Self { ledger }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/v1/funds", get(funds::get_funds))
        .route("/v1/history", get(isa::get_history))
        .route("/v1/isa", get(isa::get_isa))
        .route("/v1/deposits", post(events::post_deposit))
        .route("/v1/allocations", post(events::post_allocation))
        .route("/v1/events", delete(events::truncate_events))
        .layer(cors)
        .with_state(state)
}
