//! Search outbox persistence.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use common::{AppError, AppResult, OptionExt};

use super::entities::search_outbox;

/// Stored outbox entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboxRow {
    pub id: i32,
    pub object_id: String,
    pub operation: serde_json::Value,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub created: DateTime<Utc>,
    pub delivered: Option<DateTime<Utc>>,
    pub claimed_until: Option<DateTime<Utc>>,
}

impl From<search_outbox::Model> for OutboxRow {
    fn from(model: search_outbox::Model) -> Self {
        Self {
            id: model.id,
            object_id: model.object_id,
            operation: model.operation,
            attempts: model.attempts,
            last_error: model.last_error,
            created: model.created,
            delivered: model.delivered,
            claimed_until: model.claimed_until,
        }
    }
}

/// Queue depth summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutboxCounts {
    /// Undelivered and still eligible for retry
    pub pending: u64,
    /// Undelivered with attempts exhausted
    pub exhausted: u64,
    pub delivered: u64,
}

pub struct OutboxRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> OutboxRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn insert(
        &self,
        object_id: String,
        operation: serde_json::Value,
        created: DateTime<Utc>,
    ) -> AppResult<OutboxRow> {
        let active_model = search_outbox::ActiveModel {
            object_id: Set(object_id),
            operation: Set(operation),
            attempts: Set(0),
            last_error: Set(None),
            created: Set(created),
            delivered: Set(None),
            claimed_until: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(self.conn).await.map_err(AppError::from)?;
        Ok(OutboxRow::from(model))
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<OutboxRow>> {
        let result = search_outbox::Entity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(OutboxRow::from))
    }

    /// Unclaimed undelivered rows below the attempt limit, oldest first.
    pub async fn pending(
        &self,
        limit: u64,
        max_attempts: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<OutboxRow>> {
        let models = search_outbox::Entity::find()
            .filter(search_outbox::Column::Delivered.is_null())
            .filter(search_outbox::Column::Attempts.lt(max_attempts))
            .filter(lease_free(now))
            .order_by_asc(search_outbox::Column::Id)
            .limit(limit)
            .all(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(OutboxRow::from).collect())
    }

    /// Take the lease on an undelivered row until `until`.
    ///
    /// Returns `false` when the row was delivered or another relay holds a
    /// live lease.
    pub async fn claim(
        &self,
        id: i32,
        now: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = search_outbox::Entity::update_many()
            .col_expr(search_outbox::Column::ClaimedUntil, Expr::value(Some(until)))
            .filter(search_outbox::Column::Id.eq(id))
            .filter(search_outbox::Column::Delivered.is_null())
            .filter(lease_free(now))
            .exec(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected == 1)
    }

    /// Whether an older row for the same object still awaits delivery.
    ///
    /// Operations on one object are applied in id order; exhausted rows no
    /// longer hold back their successors.
    pub async fn has_open_predecessor(
        &self,
        row: &OutboxRow,
        max_attempts: i32,
    ) -> AppResult<bool> {
        let open = search_outbox::Entity::find()
            .filter(search_outbox::Column::ObjectId.eq(row.object_id.as_str()))
            .filter(search_outbox::Column::Id.lt(row.id))
            .filter(search_outbox::Column::Delivered.is_null())
            .filter(search_outbox::Column::Attempts.lt(max_attempts))
            .count(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(open > 0)
    }

    pub async fn mark_delivered(&self, id: i32, at: DateTime<Utc>) -> AppResult<()> {
        let row = search_outbox::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_not_found()?;

        let attempts = row.attempts;
        let mut active: search_outbox::ActiveModel = row.into();
        active.attempts = Set(attempts + 1);
        active.delivered = Set(Some(at));
        active.last_error = Set(None);
        active.claimed_until = Set(None);
        active.update(self.conn).await.map_err(AppError::from)?;
        Ok(())
    }

    pub async fn record_failure(&self, id: i32, error: String) -> AppResult<()> {
        let result = search_outbox::Entity::update_many()
            .col_expr(
                search_outbox::Column::Attempts,
                Expr::col(search_outbox::Column::Attempts).add(1),
            )
            .col_expr(search_outbox::Column::LastError, Expr::value(error))
            .col_expr(
                search_outbox::Column::ClaimedUntil,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .filter(search_outbox::Column::Id.eq(id))
            .exec(self.conn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Remove delivered rows older than `before`. Returns the number removed.
    pub async fn purge_delivered(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = search_outbox::Entity::delete_many()
            .filter(search_outbox::Column::Delivered.is_not_null())
            .filter(search_outbox::Column::Delivered.lt(before))
            .exec(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    pub async fn counts(&self, max_attempts: i32) -> AppResult<OutboxCounts> {
        let pending = search_outbox::Entity::find()
            .filter(search_outbox::Column::Delivered.is_null())
            .filter(search_outbox::Column::Attempts.lt(max_attempts))
            .count(self.conn)
            .await
            .map_err(AppError::from)?;
        let exhausted = search_outbox::Entity::find()
            .filter(search_outbox::Column::Delivered.is_null())
            .filter(search_outbox::Column::Attempts.gte(max_attempts))
            .count(self.conn)
            .await
            .map_err(AppError::from)?;
        let delivered = search_outbox::Entity::find()
            .filter(search_outbox::Column::Delivered.is_not_null())
            .count(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(OutboxCounts {
            pending,
            exhausted,
            delivered,
        })
    }
}

fn lease_free(now: DateTime<Utc>) -> Condition {
    Condition::any()
        .add(search_outbox::Column::ClaimedUntil.is_null())
        .add(search_outbox::Column::ClaimedUntil.lt(now))
}
