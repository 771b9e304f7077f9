//! Review persistence.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{NewReview, ProductId, Review};

use super::entities::review;

pub struct ReviewRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> ReviewRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn find_by_user_product(
        &self,
        user_id: Uuid,
        product_id: ProductId,
    ) -> AppResult<Option<Review>> {
        let result = review::Entity::find()
            .filter(review::Column::UserId.eq(user_id))
            .filter(review::Column::ProductId.eq(product_id))
            .one(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Review::from))
    }

    /// Insert a review. A second review for the same (user, product) pair
    /// fails with [`AppError::Conflict`].
    pub async fn insert(
        &self,
        user_id: Uuid,
        input: NewReview,
        created: DateTime<Utc>,
    ) -> AppResult<Review> {
        let active_model = review::ActiveModel {
            user_id: Set(user_id),
            product_id: Set(input.product_id),
            rating: Set(input.rating),
            comment: Set(input.comment),
            created: Set(created),
            ..Default::default()
        };

        let model = active_model.insert(self.conn).await.map_err(map_insert_error)?;
        Ok(Review::from(model))
    }

    /// Reviews of a product, newest first.
    pub async fn list_by_product(&self, product_id: ProductId) -> AppResult<Vec<Review>> {
        let models = review::Entity::find()
            .filter(review::Column::ProductId.eq(product_id))
            .order_by_desc(review::Column::Created)
            .order_by_desc(review::Column::Id)
            .all(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Review::from).collect())
    }
}

fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Review"),
        _ => AppError::from(err),
    }
}
