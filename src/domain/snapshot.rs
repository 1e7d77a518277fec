//! Derived views over the event log. None of these are stored.

use crate::domain::{Decimal, EventKind, FundId};
use serde::Serialize;

/// Cumulative amount allocated to one fund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundPosition {
    pub fund_id: FundId,
    pub fund_name: Option<String>,
    pub value: Decimal,
}

/// Point-in-time balance sheet of the account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsaSnapshot {
    pub total_value: Decimal,
    pub available_funds: Decimal,
    pub investments: Vec<FundPosition>,
}

/// One line of the transaction history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub amount: Decimal,
    pub event_type: EventKind,
    pub fund_id: Option<FundId>,
    pub fund_name: Option<String>,
}
