//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and migrations
//! - SQLite pragma configuration
//! - Reference fund seeding
//! - The SQLite-backed event store

pub mod migrations;
pub mod repo;
pub mod seed;

pub use migrations::{init_db, init_db_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repo::Repository;
pub use seed::seed_funds;
