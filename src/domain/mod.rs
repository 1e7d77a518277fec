//! Domain types for the ISA ledger.
//!
//! This module provides:
//! - Exact amounts via the Decimal wrapper
//! - Identifier and time primitives
//! - Fund reference data and the investment event model
//! - Derived snapshot types returned to callers

pub mod decimal;
pub mod event;
pub mod fund;
pub mod primitives;
pub mod snapshot;

pub use decimal::Decimal;
pub use event::{EventKind, EventKindParseError, InvestmentEvent, LedgerRow, NewInvestmentEvent};
pub use fund::Fund;
pub use primitives::{EventId, FundId, TimeMs};
pub use snapshot::{FundPosition, HistoryEntry, IsaSnapshot};
