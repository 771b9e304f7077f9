//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the transaction lifecycle so that
//! a variant rewrite (row update, tag replace, image replace, outbox entry)
//! commits or rolls back as one unit.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};

use common::{AppError, AppResult};

use crate::repository::{
    CatalogLoader, OutboxRepository, ProductRepository, ReviewRepository, VariantRepository,
};

/// Boxed transactional body borrowing the transaction for `'a`.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait.
///
/// Not object safe because of the generic transaction method; services hold
/// the concrete [`Persistence`].
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Execute a closure within a ReadCommitted transaction.
    ///
    /// Committed on `Ok`, rolled back on `Err`. Dropping the returned future
    /// before completion drops the transaction, which also rolls it back.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access bound to one open transaction.
#[derive(Clone, Copy)]
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn products(&self) -> ProductRepository<'a, DatabaseTransaction> {
        ProductRepository::new(self.txn)
    }

    pub fn variants(&self) -> VariantRepository<'a, DatabaseTransaction> {
        VariantRepository::new(self.txn)
    }

    pub fn reviews(&self) -> ReviewRepository<'a, DatabaseTransaction> {
        ReviewRepository::new(self.txn)
    }

    pub fn outbox(&self) -> OutboxRepository<'a, DatabaseTransaction> {
        OutboxRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
#[derive(Clone)]
pub struct Persistence {
    db: DatabaseConnection,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Underlying pool, for reads outside a transaction.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn products(&self) -> ProductRepository<'_, DatabaseConnection> {
        ProductRepository::new(&self.db)
    }

    pub fn variants(&self) -> VariantRepository<'_, DatabaseConnection> {
        VariantRepository::new(&self.db)
    }

    pub fn reviews(&self) -> ReviewRepository<'_, DatabaseConnection> {
        ReviewRepository::new(&self.db)
    }

    pub fn outbox(&self) -> OutboxRepository<'_, DatabaseConnection> {
        OutboxRepository::new(&self.db)
    }

    pub fn catalog(&self) -> CatalogLoader<'_, DatabaseConnection> {
        CatalogLoader::new(&self.db)
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Run `$body` inside a ReadCommitted transaction with `$ctx` in scope.
///
/// The body is an `async move` block, so it may only capture owned values.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $crate::infra::unit_of_work::UnitOfWork::transaction(&$uow, |$ctx| {
            Box::pin(async move { $body })
        })
        .await
    };
}
