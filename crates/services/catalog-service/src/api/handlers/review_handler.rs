//! Review handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use common::{ActionResult, AppResult};
use domain::{CurrentUser, NewReview, ProductId, Review};

use crate::api::auth::identity;
use crate::api::AppState;
use crate::service::add_review_action;

/// Review body; the product comes from the path.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    #[schema(example = 5.0)]
    pub rating: f32,
    #[schema(example = "Fits well")]
    pub comment: String,
}

/// Create review routes
pub fn review_routes() -> Router<AppState> {
    Router::new().route(
        "/products/:id/reviews",
        get(list_reviews).post(add_review),
    )
}

/// Review a product (signed-in users)
#[utoipa::path(
    post,
    path = "/products/{id}/reviews",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "`{success: Review}` or `{error}` envelope")
    )
)]
pub async fn add_review(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(product_id): Path<ProductId>,
    Json(body): Json<ReviewRequest>,
) -> Json<ActionResult<Review>> {
    let input = NewReview {
        product_id,
        rating: body.rating,
        comment: body.comment,
    };

    Json(add_review_action(state.review_service.as_ref(), input, identity(user)).await)
}

/// Reviews of a product, newest first
#[utoipa::path(
    get,
    path = "/products/{id}/reviews",
    tag = "Reviews",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Reviews, newest first", body = Vec<Review>)
    )
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = state.review_service.list_reviews(product_id).await?;
    Ok(Json(reviews))
}
