pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod service;
pub mod store;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    Decimal, EventKind, Fund, FundId, FundPosition, HistoryEntry, InvestmentEvent, IsaSnapshot,
};
pub use error::{AppError, LedgerError};
pub use service::LedgerService;
pub use store::{EventStore, MemoryEventStore};
