//! Investment events: the immutable facts the ledger is folded from.

use crate::domain::{Decimal, EventId, FundId, TimeMs};
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of event kinds accepted by the store.
///
/// Only `Deposit` and `Allocation` take part in balance aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Deposit,
    Allocation,
    Withdrawal,
    Reallocation,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Deposit,
        EventKind::Allocation,
        EventKind::Withdrawal,
        EventKind::Reallocation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Deposit => "deposit",
            EventKind::Allocation => "allocation",
            EventKind::Withdrawal => "withdrawal",
            EventKind::Reallocation => "reallocation",
        }
    }

    /// Whether events of this kind must reference a fund.
    pub fn requires_fund(&self) -> bool {
        matches!(self, EventKind::Allocation | EventKind::Reallocation)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event kind: {0}")]
pub struct EventKindParseError(pub String);

impl FromStr for EventKind {
    type Err = EventKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| EventKindParseError(s.to_string()))
    }
}

/// An event as submitted to the store, before it has an id or timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvestmentEvent {
    pub amount: Decimal,
    pub kind: EventKind,
    pub fund_id: Option<FundId>,
}

impl NewInvestmentEvent {
    pub fn deposit(amount: Decimal) -> Self {
        Self {
            amount,
            kind: EventKind::Deposit,
            fund_id: None,
        }
    }

    pub fn allocation(amount: Decimal, fund_id: FundId) -> Self {
        Self {
            amount,
            kind: EventKind::Allocation,
            fund_id: Some(fund_id),
        }
    }

    /// A fund reference is required for fund-bound kinds and forbidden for the rest.
    pub fn check_fund_link(&self) -> Result<(), LedgerError> {
        if self.kind.requires_fund() == self.fund_id.is_some() {
            Ok(())
        } else {
            Err(LedgerError::InvalidFundLink {
                kind: self.kind,
                fund_id: self.fund_id,
            })
        }
    }
}

/// A persisted event. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentEvent {
    pub id: EventId,
    pub amount: Decimal,
    pub event_type: EventKind,
    pub fund_id: Option<FundId>,
    pub created_at: TimeMs,
}

impl InvestmentEvent {
    pub fn from_new(id: EventId, new: NewInvestmentEvent, created_at: TimeMs) -> Self {
        Self {
            id,
            amount: new.amount,
            event_type: new.kind,
            fund_id: new.fund_id,
            created_at,
        }
    }
}

/// An event left-joined with the name of the fund it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    pub event: InvestmentEvent,
    pub fund_name: Option<String>,
}
