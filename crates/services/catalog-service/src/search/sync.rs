//! Outbox relay between the relational store and the search index.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use common::{AppError, AppResult, OutboxConfig};
use domain::Clock;

use super::{apply, IndexOperation, SearchIndex};
use crate::infra::{Persistence, TransactionContext};
use crate::repository::{OutboxCounts, OutboxRow};

/// Outcome of one relay pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub claimed: usize,
    pub delivered: usize,
    pub failed: usize,
    /// Left for a later pass: an older row for the same object is still
    /// open, or another relay holds the lease
    pub deferred: usize,
}

/// Result of trying one outbox row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Delivered,
    Failed,
    Deferred,
}

/// Writes index operations to the outbox and relays them to the index.
#[derive(Clone)]
pub struct SearchSync {
    persistence: Persistence,
    index: Arc<dyn SearchIndex>,
    clock: Arc<dyn Clock>,
    config: OutboxConfig,
}

impl SearchSync {
    pub fn new(
        persistence: Persistence,
        index: Arc<dyn SearchIndex>,
        clock: Arc<dyn Clock>,
        config: OutboxConfig,
    ) -> Self {
        Self {
            persistence,
            index,
            clock,
            config,
        }
    }

    /// Record an operation inside the caller's transaction. Returns the outbox id.
    pub async fn enqueue(
        ctx: &TransactionContext<'_>,
        operation: &IndexOperation,
        created: DateTime<Utc>,
    ) -> AppResult<i32> {
        let payload = serde_json::to_value(operation)
            .map_err(|e| AppError::internal(format!("Failed to encode index operation: {e}")))?;
        let row = ctx
            .outbox()
            .insert(operation.object_id().to_string(), payload, created)
            .await?;
        Ok(row.id)
    }

    /// Deliver one committed entry now. Failures are recorded on the row and
    /// logged; the relay worker retries them later.
    ///
    /// Returns `true` once the entry is delivered. An entry waiting behind an
    /// older operation on the same object stays queued for the relay.
    pub async fn deliver(&self, outbox_id: i32) -> bool {
        let row = match self.persistence.outbox().find_by_id(outbox_id).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                warn!(outbox_id, "Outbox entry vanished before delivery");
                return false;
            }
            Err(e) => {
                warn!(outbox_id, error = %e, "Failed to load outbox entry");
                return false;
            }
        };

        if row.delivered.is_some() {
            return true;
        }

        match self.attempt(&row).await {
            Ok(outcome) => outcome == Attempt::Delivered,
            Err(e) => {
                warn!(outbox_id, error = %e, "Failed to record outbox delivery outcome");
                false
            }
        }
    }

    /// Retry undelivered entries, oldest first, up to the configured batch size.
    pub async fn drain(&self) -> AppResult<DrainReport> {
        let rows = self
            .persistence
            .outbox()
            .pending(
                self.config.batch_size,
                self.config.max_attempts,
                self.clock.now(),
            )
            .await?;

        let mut report = DrainReport {
            claimed: rows.len(),
            ..Default::default()
        };
        for row in &rows {
            match self.attempt(row).await? {
                Attempt::Delivered => report.delivered += 1,
                Attempt::Failed => report.failed += 1,
                Attempt::Deferred => report.deferred += 1,
            }
        }

        if report.claimed > 0 {
            info!(
                claimed = report.claimed,
                delivered = report.delivered,
                failed = report.failed,
                deferred = report.deferred,
                "Search outbox drained"
            );
        }
        Ok(report)
    }

    /// Remove delivered entries older than `before`.
    pub async fn purge_delivered(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let removed = self.persistence.outbox().purge_delivered(before).await?;
        info!(removed, %before, "Purged delivered search outbox entries");
        Ok(removed)
    }

    pub async fn counts(&self) -> AppResult<OutboxCounts> {
        self.persistence
            .outbox()
            .counts(self.config.max_attempts)
            .await
    }

    async fn attempt(&self, row: &OutboxRow) -> AppResult<Attempt> {
        let outbox = self.persistence.outbox();

        if outbox
            .has_open_predecessor(row, self.config.max_attempts)
            .await?
        {
            debug!(
                outbox_id = row.id,
                object_id = %row.object_id,
                "Older operation on the same object still pending"
            );
            return Ok(Attempt::Deferred);
        }

        let now = self.clock.now();
        let lease = now + Duration::seconds(self.config.lease_seconds);
        if !outbox.claim(row.id, now, lease).await? {
            debug!(outbox_id = row.id, "Outbox entry claimed elsewhere");
            return Ok(Attempt::Deferred);
        }

        let operation: IndexOperation = match serde_json::from_value(row.operation.clone()) {
            Ok(operation) => operation,
            Err(e) => {
                warn!(outbox_id = row.id, error = %e, "Undecodable outbox operation");
                outbox
                    .record_failure(row.id, format!("undecodable operation: {e}"))
                    .await?;
                return Ok(Attempt::Failed);
            }
        };

        match apply(self.index.as_ref(), &operation).await {
            Ok(()) => {
                outbox.mark_delivered(row.id, self.clock.now()).await?;
                debug!(
                    outbox_id = row.id,
                    object_id = operation.object_id(),
                    op = operation.kind(),
                    "Search operation delivered"
                );
                Ok(Attempt::Delivered)
            }
            Err(e) => {
                warn!(
                    outbox_id = row.id,
                    object_id = operation.object_id(),
                    op = operation.kind(),
                    attempts = row.attempts + 1,
                    error = %e,
                    "Search operation failed"
                );
                outbox.record_failure(row.id, e.to_string()).await?;
                Ok(Attempt::Failed)
            }
        }
    }
}
