//! Review write path: sign-in, one review per user and product, listing order.

mod support;

use chrono::Duration;
use sea_orm::{EntityTrait, PaginatorTrait};

use catalog_service_lib::infra::Persistence;
use catalog_service_lib::repository::entities::review;
use catalog_service_lib::service::{add_review_action, ServiceContainer};
use common::{ActionResult, AppError};
use domain::{NewReview, UserRole, MSG_ALREADY_REVIEWED, MSG_SIGN_IN};

use support::{seed_product, seed_user, setup};

fn new_review(product_id: i32, rating: f32, comment: &str) -> NewReview {
    NewReview {
        product_id,
        rating,
        comment: comment.to_string(),
    }
}

#[tokio::test]
async fn test_review_requires_sign_in() {
    let app = setup().await;
    let product_id = seed_product(&app.db, "Lamp", 40.0).await;

    let result = add_review_action(
        app.services.reviews().as_ref(),
        new_review(product_id, 4.0, "Bright"),
        None,
    )
    .await;

    assert_eq!(result, ActionResult::Error(MSG_SIGN_IN.to_string()));
    assert_eq!(review::Entity::find().count(&app.db).await.unwrap(), 0);
    assert!(app.views.invalidated().is_empty());
}

#[tokio::test]
async fn test_add_review_returns_row_and_invalidates_product_page() {
    let app = setup().await;
    let user = seed_user(&app.db, UserRole::User).await;
    let product_id = seed_product(&app.db, "Lamp", 40.0).await;

    let result = add_review_action(
        app.services.reviews().as_ref(),
        new_review(product_id, 5.0, "Lovely light"),
        Some(user.clone()),
    )
    .await;

    let review = result.success().expect("review created");
    assert_eq!(review.user_id, user.id);
    assert_eq!(review.product_id, product_id);
    assert_eq!(review.rating, 5.0);
    assert_eq!(review.comment, "Lovely light");
    assert_eq!(app.views.invalidated(), vec![format!("/products/{}", product_id)]);
}

#[tokio::test]
async fn test_second_review_is_rejected() {
    let app = setup().await;
    let user = seed_user(&app.db, UserRole::User).await;
    let product_id = seed_product(&app.db, "Lamp", 40.0).await;
    let reviews = app.services.reviews();

    reviews
        .add_review(new_review(product_id, 3.0, "Fine"), Some(user.clone()))
        .await
        .unwrap();

    let result = add_review_action(
        reviews.as_ref(),
        new_review(product_id, 1.0, "Changed my mind"),
        Some(user),
    )
    .await;

    assert_eq!(result, ActionResult::Error(MSG_ALREADY_REVIEWED.to_string()));
    assert_eq!(review::Entity::find().count(&app.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_unique_index_backs_the_duplicate_check() {
    let app = setup().await;
    let user = seed_user(&app.db, UserRole::User).await;
    let product_id = seed_product(&app.db, "Lamp", 40.0).await;
    let persistence = Persistence::new(app.db.clone());
    let now = chrono::Utc::now();

    persistence
        .reviews()
        .insert(user.id, new_review(product_id, 4.0, "First"), now)
        .await
        .unwrap();
    let err = persistence
        .reviews()
        .insert(user.id, new_review(product_id, 2.0, "Racing"), now)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_rating_out_of_range_is_rejected() {
    let app = setup().await;
    let user = seed_user(&app.db, UserRole::User).await;
    let product_id = seed_product(&app.db, "Lamp", 40.0).await;

    let result = add_review_action(
        app.services.reviews().as_ref(),
        new_review(product_id, 6.0, "Off the scale"),
        Some(user),
    )
    .await;

    assert_eq!(result.error(), Some("Rating must be between 1 and 5"));
    assert_eq!(review::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_reviews_listed_newest_first() {
    let app = setup().await;
    let product_id = seed_product(&app.db, "Lamp", 40.0).await;
    let reviews = app.services.reviews();

    for comment in ["oldest", "middle", "newest"] {
        let user = seed_user(&app.db, UserRole::User).await;
        reviews
            .add_review(new_review(product_id, 4.0, comment), Some(user))
            .await
            .unwrap();
        app.clock.advance(Duration::minutes(5));
    }

    let listed = reviews.list_reviews(product_id).await.unwrap();
    let comments: Vec<_> = listed.iter().map(|r| r.comment.as_str()).collect();
    assert_eq!(comments, vec!["newest", "middle", "oldest"]);
    assert!(listed[0].created > listed[2].created);
}

#[tokio::test]
async fn test_review_for_missing_product_fails() {
    let app = setup().await;
    let user = seed_user(&app.db, UserRole::User).await;

    let err = app
        .services
        .reviews()
        .add_review(new_review(999, 4.0, "Ghost"), Some(user))
        .await
        .unwrap_err();

    assert!(!matches!(err, AppError::Conflict(_)));
    assert_eq!(review::Entity::find().count(&app.db).await.unwrap(), 0);
}
