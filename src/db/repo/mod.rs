//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct, the SQLite-backed event
//! store. Methods are organized across submodules by table:
//! - `events.rs` - Investment event log operations
//! - `funds.rs` - Fund reference data

mod events;
mod funds;

use crate::domain::{Fund, FundId, InvestmentEvent, LedgerRow, NewInvestmentEvent};
use crate::error::LedgerError;
use crate::store::{AppendCheck, EventStore};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

/// Repository for database operations.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl EventStore for Repository {
    async fn list_funds(&self) -> Result<Vec<Fund>, LedgerError> {
        Ok(self.query_funds().await?)
    }

    async fn get_fund(&self, id: FundId) -> Result<Option<Fund>, LedgerError> {
        Ok(self.query_fund(id).await?)
    }

    async fn append(&self, event: NewInvestmentEvent) -> Result<InvestmentEvent, LedgerError> {
        self.insert_event(event).await
    }

    async fn append_checked(
        &self,
        event: NewInvestmentEvent,
        check: AppendCheck<'_>,
    ) -> Result<InvestmentEvent, LedgerError> {
        self.insert_event_checked(event, check).await
    }

    async fn scan_all(&self) -> Result<Vec<LedgerRow>, LedgerError> {
        self.query_ledger_rows().await
    }

    async fn truncate(&self) -> Result<u64, LedgerError> {
        Ok(self.delete_all_events().await?)
    }
}
