//! In-process event store for tests and embedding.

use super::{AppendCheck, EventStore};
use crate::db::seed::REFERENCE_FUNDS;
use crate::domain::{EventId, Fund, FundId, InvestmentEvent, LedgerRow, NewInvestmentEvent, TimeMs};
use crate::error::LedgerError;
use async_trait::async_trait;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Log {
    events: Vec<InvestmentEvent>,
    last_id: i64,
}

/// Event store holding everything in memory behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    funds: Vec<Fund>,
    log: Mutex<Log>,
}

impl MemoryEventStore {
    /// Create an empty store with no funds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fund; ids are assigned sequentially from 1.
    pub fn with_fund(mut self, name: &str, description: Option<&str>) -> Self {
        let id = FundId::new(self.funds.len() as i64 + 1);
        self.funds.push(Fund {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: TimeMs::now(),
        });
        self
    }

    /// Add the standard reference funds.
    pub fn with_reference_funds(self) -> Self {
        REFERENCE_FUNDS
            .iter()
            .fold(self, |store, (name, description)| {
                store.with_fund(name, Some(description))
            })
    }

    fn fund_name(&self, id: Option<FundId>) -> Option<String> {
        id.and_then(|id| self.funds.iter().find(|f| f.id == id))
            .map(|f| f.name.clone())
    }

    fn rows(&self, log: &Log) -> Vec<LedgerRow> {
        log.events
            .iter()
            .map(|event| LedgerRow {
                event: event.clone(),
                fund_name: self.fund_name(event.fund_id),
            })
            .collect()
    }

    fn push(
        &self,
        log: &mut Log,
        event: NewInvestmentEvent,
    ) -> Result<InvestmentEvent, LedgerError> {
        event.check_fund_link()?;
        if let Some(fund_id) = event.fund_id {
            if !self.funds.iter().any(|f| f.id == fund_id) {
                return Err(LedgerError::UnknownFund(fund_id));
            }
        }

        log.last_id += 1;
        let stored = InvestmentEvent::from_new(EventId::new(log.last_id), event, TimeMs::now());
        log.events.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn list_funds(&self) -> Result<Vec<Fund>, LedgerError> {
        Ok(self.funds.clone())
    }

    async fn get_fund(&self, id: FundId) -> Result<Option<Fund>, LedgerError> {
        Ok(self.funds.iter().find(|f| f.id == id).cloned())
    }

    async fn append(&self, event: NewInvestmentEvent) -> Result<InvestmentEvent, LedgerError> {
        let mut log = self.log.lock().await;
        self.push(&mut log, event)
    }

    async fn append_checked(
        &self,
        event: NewInvestmentEvent,
        check: AppendCheck<'_>,
    ) -> Result<InvestmentEvent, LedgerError> {
        let mut log = self.log.lock().await;
        check(&self.rows(&log))?;
        self.push(&mut log, event)
    }

    async fn scan_all(&self) -> Result<Vec<LedgerRow>, LedgerError> {
        let log = self.log.lock().await;
        Ok(self.rows(&log))
    }

    async fn truncate(&self) -> Result<u64, LedgerError> {
        let mut log = self.log.lock().await;
        let removed = log.events.len() as u64;
        log.events.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Decimal, EventKind};

    #[tokio::test]
    async fn test_reference_funds_are_numbered_from_one() {
        let store = MemoryEventStore::new().with_reference_funds();
        let funds = store.list_funds().await.unwrap();
        assert_eq!(funds.len(), 7);
        assert_eq!(funds[0].id, FundId::new(1));
        assert_eq!(funds[0].name, "S&P 500 Index Fund");
        assert_eq!(funds[1].name, "Global Bond Fund");
    }

    #[tokio::test]
    async fn test_append_assigns_increasing_ids() {
        let store = MemoryEventStore::new().with_reference_funds();
        let a = store
            .append(NewInvestmentEvent::deposit(Decimal::from(10)))
            .await
            .unwrap();
        let b = store
            .append(NewInvestmentEvent::allocation(Decimal::from(5), FundId::new(2)))
            .await
            .unwrap();
        assert!(b.id > a.id);

        let rows = store.scan_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fund_name, None);
        assert_eq!(rows[1].event.event_type, EventKind::Allocation);
        assert_eq!(rows[1].fund_name.as_deref(), Some("Global Bond Fund"));
    }

    #[tokio::test]
    async fn test_append_rejects_missing_fund() {
        let store = MemoryEventStore::new();
        let result = store
            .append(NewInvestmentEvent::allocation(Decimal::from(5), FundId::new(1)))
            .await;
        assert!(matches!(result, Err(LedgerError::UnknownFund(_))));
        assert!(store.scan_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_rejects_broken_fund_link() {
        let store = MemoryEventStore::new().with_reference_funds();
        let unlinked = NewInvestmentEvent {
            amount: Decimal::from(5),
            kind: EventKind::Allocation,
            fund_id: None,
        };
        assert!(matches!(
            store.append(unlinked).await,
            Err(LedgerError::InvalidFundLink { .. })
        ));

        let linked_deposit = NewInvestmentEvent {
            amount: Decimal::from(5),
            kind: EventKind::Deposit,
            fund_id: Some(FundId::new(1)),
        };
        assert!(matches!(
            store.append(linked_deposit).await,
            Err(LedgerError::InvalidFundLink { .. })
        ));
        assert!(store.scan_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_check_appends_nothing() {
        let store = MemoryEventStore::new();
        let reject = |_rows: &[LedgerRow]| -> Result<(), LedgerError> {
            Err(LedgerError::InvalidAmount(Decimal::zero()))
        };
        let result = store
            .append_checked(NewInvestmentEvent::deposit(Decimal::from(1)), &reject)
            .await;
        assert!(result.is_err());
        assert!(store.scan_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_truncate_keeps_ids_monotonic() {
        let store = MemoryEventStore::new();
        let first = store
            .append(NewInvestmentEvent::deposit(Decimal::from(1)))
            .await
            .unwrap();
        assert_eq!(store.truncate().await.unwrap(), 1);
        let second = store
            .append(NewInvestmentEvent::deposit(Decimal::from(1)))
            .await
            .unwrap();
        assert!(second.id > first.id);
        assert_eq!(store.scan_all().await.unwrap().len(), 1);
    }
}
