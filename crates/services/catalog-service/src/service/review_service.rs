//! Review service - one review per user per product.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use validator::Validate;

use common::{ActionResult, AppError, AppResult};
use domain::{
    product_path, Clock, CurrentUser, NewReview, ProductId, Review, MSG_ALREADY_REVIEWED,
    MSG_REVIEW_FAILED, MSG_SIGN_IN,
};

use crate::infra::{Persistence, ViewInvalidator};
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Record the caller's review of a product.
    ///
    /// Fails with [`AppError::Unauthorized`] without a user and with
    /// [`AppError::Conflict`] when the user already reviewed the product.
    async fn add_review(&self, input: NewReview, user: Option<CurrentUser>) -> AppResult<Review>;

    /// Reviews of a product, newest first.
    async fn list_reviews(&self, product_id: ProductId) -> AppResult<Vec<Review>>;
}

pub struct ReviewManager {
    persistence: Persistence,
    views: Arc<dyn ViewInvalidator>,
    clock: Arc<dyn Clock>,
}

impl ReviewManager {
    pub fn new(
        persistence: Persistence,
        views: Arc<dyn ViewInvalidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            persistence,
            views,
            clock,
        }
    }
}

#[async_trait]
impl ReviewService for ReviewManager {
    async fn add_review(&self, input: NewReview, user: Option<CurrentUser>) -> AppResult<Review> {
        input.validate()?;
        let user = user.ok_or(AppError::Unauthorized)?;
        let user_id = user.id;
        let now = self.clock.now();

        // The unique (user_id, product_id) index catches a concurrent insert
        // that slips past this check.
        let review = with_transaction!(self.persistence, |ctx| {
            let reviews = ctx.reviews();
            if reviews
                .find_by_user_product(user_id, input.product_id)
                .await?
                .is_some()
            {
                return Err(AppError::conflict("Review"));
            }
            reviews.insert(user_id, input, now).await
        })?;

        info!(review_id = review.id, product_id = review.product_id, %user_id, "Review added");
        self.views
            .revalidate_path(&product_path(review.product_id))
            .await;

        Ok(review)
    }

    async fn list_reviews(&self, product_id: ProductId) -> AppResult<Vec<Review>> {
        self.persistence.reviews().list_by_product(product_id).await
    }
}

/// `{success}`/`{error}` boundary for [`ReviewService::add_review`].
///
/// Only the fixed messages reach the caller; the underlying error is logged.
pub async fn add_review_action(
    service: &dyn ReviewService,
    input: NewReview,
    user: Option<CurrentUser>,
) -> ActionResult<Review> {
    ActionResult::from_result(service.add_review(input, user).await, |err| match err {
        AppError::Unauthorized => MSG_SIGN_IN.to_string(),
        AppError::Conflict(_) => MSG_ALREADY_REVIEWED.to_string(),
        AppError::Validation(msg) => msg.clone(),
        _ => MSG_REVIEW_FAILED.to_string(),
    })
}
