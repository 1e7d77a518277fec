//! Ledger operations exposed to callers.
//!
//! Every read rescans the event store and refolds the log; no balance is
//! cached between calls.

use crate::domain::{
    Decimal, Fund, FundId, HistoryEntry, InvestmentEvent, IsaSnapshot, LedgerRow,
    NewInvestmentEvent,
};
use crate::engine;
use crate::error::LedgerError;
use crate::store::EventStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct LedgerService {
    store: Arc<dyn EventStore>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    pub async fn get_funds(&self) -> Result<Vec<Fund>, LedgerError> {
        self.store.list_funds().await
    }

    pub async fn get_transaction_history(&self) -> Result<Vec<HistoryEntry>, LedgerError> {
        let rows = self.store.scan_all().await?;
        debug!(events = rows.len(), "Building transaction history");
        Ok(engine::transaction_history(&rows))
    }

    pub async fn get_isa(&self) -> Result<IsaSnapshot, LedgerError> {
        let rows = self.store.scan_all().await?;
        debug!(events = rows.len(), "Computing ISA snapshot");
        engine::compute_isa(&rows)
    }

    /// Cash currently available for new allocations.
    pub async fn get_unallocated(&self) -> Result<Decimal, LedgerError> {
        let rows = self.store.scan_all().await?;
        engine::compute_unallocated(&rows)
    }

    /// Record a deposit.
    ///
    /// # Errors
    /// `InvalidAmount` if `amount` is not strictly positive, `AmountOverflow`
    /// if the ledger total would leave the decimal range.
    pub async fn make_deposit(&self, amount: Decimal) -> Result<InvestmentEvent, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let check = move |rows: &[LedgerRow]| engine::validate_deposit(rows, amount);
        match self
            .store
            .append_checked(NewInvestmentEvent::deposit(amount), &check)
            .await
        {
            Ok(event) => {
                info!(event_id = event.id.as_i64(), amount = %amount, "Deposit recorded");
                Ok(event)
            }
            Err(err @ LedgerError::AmountOverflow) => {
                warn!(amount = %amount, error = %err, "Deposit rejected");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Record an allocation of unallocated cash into a fund.
    ///
    /// The balance check and the append happen atomically in the store.
    ///
    /// # Errors
    /// `InvalidAmount`, `UnknownFund`, or `InsufficientFunds` when the amount
    /// exceeds unallocated cash. Nothing is appended on error.
    pub async fn make_allocation(
        &self,
        amount: Decimal,
        fund_id: FundId,
    ) -> Result<InvestmentEvent, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if self.store.get_fund(fund_id).await?.is_none() {
            return Err(LedgerError::UnknownFund(fund_id));
        }

        let check = move |rows: &[LedgerRow]| engine::validate_allocation(rows, amount);
        match self
            .store
            .append_checked(NewInvestmentEvent::allocation(amount, fund_id), &check)
            .await
        {
            Ok(event) => {
                info!(
                    event_id = event.id.as_i64(),
                    fund_id = fund_id.as_i64(),
                    amount = %amount,
                    "Allocation recorded"
                );
                Ok(event)
            }
            Err(err @ LedgerError::InsufficientFunds { .. }) => {
                warn!(fund_id = fund_id.as_i64(), error = %err, "Allocation rejected");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Clear the whole event log. Administrative reset only.
    pub async fn truncate_investment_events(&self) -> Result<u64, LedgerError> {
        let removed = self.store.truncate().await?;
        warn!(removed, "Investment event log truncated");
        Ok(removed)
    }
}
