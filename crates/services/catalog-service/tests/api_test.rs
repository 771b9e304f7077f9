//! HTTP surface: identity, admin checks and the action envelope.
//!
//! Services are stubbed; the database is only used by the health check.

mod support;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use catalog_service_lib::api::{create_router, AppState, Claims, TokenVerifier};
use catalog_service_lib::service::{ProductService, ReviewService, VariantService};
use common::{AppError, AppResult};
use domain::{
    CurrentUser, DashboardProduct, NewProduct, NewReview, ProductId, ProductVariant, Review,
    UpsertVariant, VariantId, VariantWithChildren,
};

const SECRET: &str = "test-secret-key-for-testing-only-32chars";

// =============================================================================
// Stub Services
// =============================================================================

struct StubVariants;

#[async_trait]
impl VariantService for StubVariants {
    async fn upsert_variant(&self, input: UpsertVariant) -> AppResult<String> {
        Ok(format!("Added {}", input.product_type))
    }

    async fn get_variant(&self, id: VariantId) -> AppResult<VariantWithChildren> {
        if id != 1 {
            return Err(AppError::NotFound);
        }
        Ok(VariantWithChildren {
            variant: ProductVariant {
                id,
                product_id: 3,
                color: "#ffffff".to_string(),
                product_type: "White".to_string(),
                updated: Utc::now(),
            },
            images: vec![],
            tags: vec![],
        })
    }

    async fn delete_variant(&self, _id: VariantId) -> AppResult<String> {
        Err(AppError::NotFound)
    }
}

struct StubReviews;

#[async_trait]
impl ReviewService for StubReviews {
    async fn add_review(&self, input: NewReview, user: Option<CurrentUser>) -> AppResult<Review> {
        let user = user.ok_or(AppError::Unauthorized)?;
        Ok(Review {
            id: 10,
            user_id: user.id,
            product_id: input.product_id,
            rating: input.rating,
            comment: input.comment,
            created: Utc::now(),
        })
    }

    async fn list_reviews(&self, _product_id: ProductId) -> AppResult<Vec<Review>> {
        Ok(vec![])
    }
}

struct StubProducts;

#[async_trait]
impl ProductService for StubProducts {
    async fn create_product(&self, input: NewProduct) -> AppResult<String> {
        Ok(format!("Product {} has been created", input.title))
    }

    async fn delete_product(&self, _id: ProductId) -> AppResult<String> {
        Err(AppError::internal("boom"))
    }

    async fn dashboard_products(&self) -> AppResult<Vec<DashboardProduct>> {
        Ok(vec![])
    }
}

// =============================================================================
// Helpers
// =============================================================================

async fn app() -> Router {
    let state = AppState {
        variant_service: Arc::new(StubVariants),
        review_service: Arc::new(StubReviews),
        product_service: Arc::new(StubProducts),
        database: Arc::new(support::connect().await),
        tokens: Arc::new(TokenVerifier::new(SECRET)),
    };
    create_router(state, Duration::from_secs(5))
}

fn token(role: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        role: role.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn post_json(uri: &str, bearer: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn variant_body() -> Value {
    json!({
        "editMode": false,
        "productID": 3,
        "color": "#ffffff",
        "productType": "White",
        "tags": ["basic"],
        "variantImages": []
    })
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app().await, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_variant_write_requires_sign_in() {
    let (status, body) = send(app().await, post_json("/variants", None, variant_body())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_variant_write_requires_admin() {
    let user = token("user");
    let (status, _) = send(
        app().await,
        post_json("/variants", Some(&user), variant_body()),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_variant_write_returns_envelope() {
    let admin = token("admin");
    let (status, body) = send(
        app().await,
        post_json("/variants", Some(&admin), variant_body()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": "Added White" }));
}

#[tokio::test]
async fn test_failed_action_is_reported_in_envelope() {
    let admin = token("admin");
    let request = Request::builder()
        .method("DELETE")
        .uri("/variants/9")
        .header(header::AUTHORIZATION, format!("Bearer {}", admin))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app().await, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Failed to delete variant" }));
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let (status, _) = send(
        app().await,
        post_json("/products", Some("not-a-jwt"), json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_review_without_token_asks_to_sign_in() {
    let (status, body) = send(
        app().await,
        post_json(
            "/products/3/reviews",
            None,
            json!({ "rating": 4.0, "comment": "Nice" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Please sign in" }));
}

#[tokio::test]
async fn test_review_with_token_succeeds() {
    let user = token("user");
    let (status, body) = send(
        app().await,
        post_json(
            "/products/3/reviews",
            Some(&user),
            json!({ "rating": 4.0, "comment": "Nice" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"]["productId"], 3);
    assert_eq!(body["success"]["comment"], "Nice");
}

#[tokio::test]
async fn test_public_reads() {
    let request = Request::builder()
        .uri("/variants/1")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app().await, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["productType"], "White");
    assert_eq!(body["variantImages"], json!([]));

    let request = Request::builder()
        .uri("/variants/2")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app().await, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_requires_admin() {
    let user = token("user");
    let request = Request::builder()
        .uri("/dashboard/products")
        .header(header::AUTHORIZATION, format!("Bearer {}", user))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app().await, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = token("admin");
    let request = Request::builder()
        .uri("/dashboard/products")
        .header(header::AUTHORIZATION, format!("Bearer {}", admin))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app().await, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
