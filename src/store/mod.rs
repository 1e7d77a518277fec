//! Event store abstraction: the append-only log the ledger is folded from.

use crate::domain::{Fund, FundId, InvestmentEvent, LedgerRow, NewInvestmentEvent};
use crate::error::LedgerError;
use async_trait::async_trait;
use std::fmt;

pub mod memory;

pub use memory::MemoryEventStore;

/// Guard evaluated against the full log immediately before an append.
pub type AppendCheck<'a> = &'a (dyn Fn(&[LedgerRow]) -> Result<(), LedgerError> + Send + Sync);

/// Persistence contract required by the ledger.
///
/// Events are only ever appended. The one destructive operation is
/// `truncate`, which clears the whole log.
#[async_trait]
pub trait EventStore: Send + Sync + fmt::Debug {
    /// All reference funds, ordered by id.
    async fn list_funds(&self) -> Result<Vec<Fund>, LedgerError>;

    /// Look up one fund.
    async fn get_fund(&self, id: FundId) -> Result<Option<Fund>, LedgerError>;

    /// Append one event, assigning its id and creation time.
    ///
    /// Rejects events whose fund link does not match their kind.
    async fn append(&self, event: NewInvestmentEvent) -> Result<InvestmentEvent, LedgerError>;

    /// Append `event` only if `check` passes over every event logged before it.
    ///
    /// No other append can land between the scan and the write, and a
    /// cancelled call leaves nothing behind.
    async fn append_checked(
        &self,
        event: NewInvestmentEvent,
        check: AppendCheck<'_>,
    ) -> Result<InvestmentEvent, LedgerError>;

    /// Every event ever appended, in insertion order, joined with its fund name.
    async fn scan_all(&self) -> Result<Vec<LedgerRow>, LedgerError>;

    /// Delete all events. Returns the number removed.
    async fn truncate(&self) -> Result<u64, LedgerError>;
}
