//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and the unit of work
//! - The Redis-backed view cache and its invalidation signal

pub mod cache;
mod db;
pub mod migrations;
pub mod unit_of_work;

pub use cache::{get_view, set_view, RedisViewCache, ViewCache, ViewInvalidator};
pub use db::Database;
pub use migrations::Migrator;
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::{MockViewCache, MockViewInvalidator};
