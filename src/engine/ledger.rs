//! Balance and position folds over the event log.
//!
//! Every function here is a pure function of the rows it is given. Rows are
//! expected in store order (insertion order).

use crate::domain::{
    Decimal, EventKind, FundId, FundPosition, HistoryEntry, InvestmentEvent, IsaSnapshot,
    LedgerRow,
};
use crate::error::LedgerError;
use std::collections::HashMap;

/// Reject kinds that have no aggregation semantics.
fn aggregated_kind(event: &InvestmentEvent) -> Result<EventKind, LedgerError> {
    match event.event_type {
        EventKind::Deposit | EventKind::Allocation => Ok(event.event_type),
        other => Err(LedgerError::UnsupportedEventKind(other)),
    }
}

/// Cash deposited but not yet allocated: deposits minus allocations.
pub fn compute_unallocated(rows: &[LedgerRow]) -> Result<Decimal, LedgerError> {
    rows.iter().try_fold(Decimal::zero(), |unallocated, row| {
        let next = match aggregated_kind(&row.event)? {
            EventKind::Deposit => unallocated.checked_add(row.event.amount),
            _ => unallocated.checked_sub(row.event.amount),
        };
        next.ok_or(LedgerError::AmountOverflow)
    })
}

/// Check that a new deposit keeps the ledger's running totals representable.
///
/// Amounts are positive, so if the grand total of deposits fits, every
/// partial fold over the log fits too.
pub fn validate_deposit(rows: &[LedgerRow], amount: Decimal) -> Result<(), LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(amount));
    }

    let deposits = rows
        .iter()
        .filter(|row| row.event.event_type == EventKind::Deposit)
        .map(|row| row.event.amount);
    Decimal::checked_sum(deposits.chain(std::iter::once(amount)))
        .map(|_| ())
        .ok_or(LedgerError::AmountOverflow)
}

/// Check a proposed allocation against the cash currently unallocated.
///
/// Does not check that the fund exists; that needs the store.
pub fn validate_allocation(rows: &[LedgerRow], amount: Decimal) -> Result<(), LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(amount));
    }

    let available = compute_unallocated(rows)?;
    if available < amount {
        return Err(LedgerError::InsufficientFunds {
            requested: amount,
            available,
        });
    }
    Ok(())
}

/// Sum allocations per fund, in order of each fund's first allocation.
pub fn compute_fund_positions(rows: &[LedgerRow]) -> Result<Vec<FundPosition>, LedgerError> {
    let mut positions: Vec<FundPosition> = Vec::new();
    let mut index: HashMap<FundId, usize> = HashMap::new();

    for row in rows {
        if aggregated_kind(&row.event)? != EventKind::Allocation {
            continue;
        }

        let fund_id = row.event.fund_id.ok_or_else(|| {
            LedgerError::CorruptRow(format!("allocation {} has no fund", row.event.id.as_i64()))
        })?;

        match index.get(&fund_id) {
            Some(&i) => {
                positions[i].value = positions[i]
                    .value
                    .checked_add(row.event.amount)
                    .ok_or(LedgerError::AmountOverflow)?;
            }
            None => {
                index.insert(fund_id, positions.len());
                positions.push(FundPosition {
                    fund_id,
                    fund_name: row.fund_name.clone(),
                    value: row.event.amount,
                });
            }
        }
    }

    Ok(positions)
}

/// Build the account balance sheet from the full log.
pub fn compute_isa(rows: &[LedgerRow]) -> Result<IsaSnapshot, LedgerError> {
    let available_funds = compute_unallocated(rows)?;
    let investments = compute_fund_positions(rows)?;
    let total_value = Decimal::checked_sum(investments.iter().map(|p| p.value))
        .and_then(|invested| available_funds.checked_add(invested))
        .ok_or(LedgerError::AmountOverflow)?;

    Ok(IsaSnapshot {
        total_value,
        available_funds,
        investments,
    })
}

/// Project every event, whatever its kind, into a history line.
pub fn transaction_history(rows: &[LedgerRow]) -> Vec<HistoryEntry> {
    rows.iter()
        .map(|row| HistoryEntry {
            amount: row.event.amount,
            event_type: row.event.event_type,
            fund_id: row.event.fund_id,
            fund_name: row.fund_name.clone(),
        })
        .collect()
}
