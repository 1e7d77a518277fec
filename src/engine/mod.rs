//! Pure computation over the event log.

pub mod ledger;

pub use ledger::{
    compute_fund_positions, compute_isa, compute_unallocated, transaction_history,
    validate_allocation, validate_deposit,
};
