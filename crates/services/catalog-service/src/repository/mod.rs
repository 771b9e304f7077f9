//! Repository layer for data access.
//!
//! Repositories borrow any SeaORM connection, so the same query code runs
//! against the pool or inside a [`crate::infra::TransactionContext`].

mod catalog_loader;
pub mod entities;
mod outbox_repository;
mod product_repository;
mod review_repository;
mod variant_repository;

pub use catalog_loader::CatalogLoader;
pub use outbox_repository::{OutboxCounts, OutboxRepository, OutboxRow};
pub use product_repository::ProductRepository;
pub use review_repository::ReviewRepository;
pub use variant_repository::VariantRepository;
