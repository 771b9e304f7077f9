//! Product lifecycle and the cached admin dashboard.

mod support;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use catalog_service_lib::infra::{ViewCache, ViewInvalidator};
use catalog_service_lib::repository::entities::{
    order, order_product, product, product_variant, review,
};
use catalog_service_lib::search::IndexOperation;
use catalog_service_lib::service::{create_product_action, delete_product_action, ServiceContainer};
use common::ActionResult;
use domain::{
    NewProduct, NewReview, UpsertVariant, UserRole, VariantImageInput, MSG_PRODUCT_FAILED,
    PATH_DASHBOARD_PRODUCTS,
};

use support::{
    seed_order_line, seed_product, seed_user, setup, setup_with_cache, MemoryViews, TestApp,
    PLACEHOLDER,
};

fn new_product(title: &str, price: f32) -> NewProduct {
    NewProduct {
        title: title.to_string(),
        description: format!("About {}", title),
        price,
    }
}

async fn add_variant(
    app: &TestApp,
    product_id: i32,
    product_type: &str,
    image: Option<&str>,
) -> i32 {
    let images = image
        .map(|url| {
            vec![VariantImageInput {
                name: "cover.jpg".to_string(),
                size: "512".to_string(),
                url: url.to_string(),
            }]
        })
        .unwrap_or_default();

    app.services
        .variants()
        .upsert_variant(UpsertVariant {
            edit_mode: false,
            id: None,
            product_id,
            color: "#000000".to_string(),
            product_type: product_type.to_string(),
            tags: vec![],
            images,
        })
        .await
        .unwrap();

    product_variant::Entity::find()
        .all(&app.db)
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.id)
        .max()
        .unwrap()
}

async fn product_id_by_title(app: &TestApp, title: &str) -> i32 {
    product::Entity::find()
        .all(&app.db)
        .await
        .unwrap()
        .into_iter()
        .find(|p| p.title == title)
        .unwrap()
        .id
}

#[tokio::test]
async fn test_create_product() {
    let app = setup().await;

    let products = app.services.products();
    let result = create_product_action(products.as_ref(), new_product("Desk", 120.0)).await;
    assert_eq!(
        result,
        ActionResult::Success("Product Desk has been created".to_string())
    );

    let stored = product::Entity::find().one(&app.db).await.unwrap().unwrap();
    assert_eq!(stored.title, "Desk");
    assert_eq!(stored.price, 120.0);
    assert_eq!(app.views.invalidated(), vec![PATH_DASHBOARD_PRODUCTS.to_string()]);
}

#[tokio::test]
async fn test_create_product_validation() {
    let app = setup().await;

    let products = app.services.products();
    let result = create_product_action(products.as_ref(), new_product("D", 1.0)).await;
    assert_eq!(result.error(), Some("Title must be at least 2 characters long"));
    assert_eq!(product::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_dashboard_lists_newest_first_with_cover_image() {
    let app = setup().await;
    let products = app.services.products();
    products.create_product(new_product("Chair", 60.0)).await.unwrap();
    products.create_product(new_product("Table", 200.0)).await.unwrap();

    let chair = product_id_by_title(&app, "Chair").await;
    add_variant(&app, chair, "Oak", Some("https://cdn.example.com/oak.jpg")).await;
    add_variant(&app, chair, "Walnut", None).await;

    let rows = products.dashboard_products().await.unwrap();
    let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Table", "Chair"]);

    assert_eq!(rows[0].image, PLACEHOLDER);
    assert!(rows[0].variants.is_empty());

    assert_eq!(rows[1].image, "https://cdn.example.com/oak.jpg");
    assert_eq!(rows[1].variants.len(), 2);
    assert_eq!(rows[1].variants[0].variant.product_type, "Oak");
}

#[tokio::test]
async fn test_dashboard_cache_is_invalidated_by_writes() {
    let app = setup().await;
    let products = app.services.products();
    products.create_product(new_product("Chair", 60.0)).await.unwrap();

    let first = products.dashboard_products().await.unwrap();
    assert_eq!(first.len(), 1);
    assert!(app.views.is_cached(PATH_DASHBOARD_PRODUCTS));

    let chair = product_id_by_title(&app, "Chair").await;
    add_variant(&app, chair, "Oak", Some("https://cdn.example.com/oak.jpg")).await;
    assert!(!app.views.is_cached(PATH_DASHBOARD_PRODUCTS));

    let second = products.dashboard_products().await.unwrap();
    assert_eq!(second[0].variants.len(), 1);
    assert_eq!(second[0].image, "https://cdn.example.com/oak.jpg");
}

/// Cache whose first store is preceded by a concurrent write and its
/// invalidation, as if another request committed while the dashboard loaded.
struct WriteDuringLoad {
    db: DatabaseConnection,
    views: Arc<MemoryViews>,
    fired: AtomicBool,
}

#[async_trait]
impl ViewCache for WriteDuringLoad {
    async fn get_json(&self, path: &str) -> Option<String> {
        self.views.get_json(path).await
    }

    async fn generation(&self, path: &str) -> Option<u64> {
        self.views.generation(path).await
    }

    async fn set_json_if(&self, path: &str, json: String, generation: u64) -> bool {
        if !self.fired.swap(true, Ordering::SeqCst) {
            seed_product(&self.db, "Lamp", 30.0).await;
            self.views.revalidate_path(PATH_DASHBOARD_PRODUCTS).await;
        }
        self.views.set_json_if(path, json, generation).await
    }
}

#[tokio::test]
async fn test_dashboard_snapshot_is_not_cached_over_newer_invalidation() {
    let app = setup_with_cache(|db, views| {
        Arc::new(WriteDuringLoad {
            db: db.clone(),
            views,
            fired: AtomicBool::new(false),
        }) as Arc<dyn ViewCache>
    })
    .await;
    let products = app.services.products();
    products.create_product(new_product("Chair", 60.0)).await.unwrap();

    let stale = products.dashboard_products().await.unwrap();
    assert_eq!(stale.len(), 1);
    assert!(!app.views.is_cached(PATH_DASHBOARD_PRODUCTS));

    let fresh = products.dashboard_products().await.unwrap();
    let titles: Vec<_> = fresh.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Lamp", "Chair"]);
    assert!(app.views.is_cached(PATH_DASHBOARD_PRODUCTS));
}

#[tokio::test]
async fn test_delete_product_cascades_everything_it_owns() {
    let app = setup().await;
    let products = app.services.products();
    products.create_product(new_product("Chair", 60.0)).await.unwrap();
    let chair = product_id_by_title(&app, "Chair").await;
    let oak = add_variant(&app, chair, "Oak", Some("https://cdn.example.com/oak.jpg")).await;
    let walnut = add_variant(&app, chair, "Walnut", None).await;

    let buyer = seed_user(&app.db, UserRole::User).await;
    seed_order_line(&app.db, buyer.id, chair, oak).await;
    app.services
        .reviews()
        .add_review(
            NewReview {
                product_id: chair,
                rating: 4.0,
                comment: "Sturdy".to_string(),
            },
            Some(buyer),
        )
        .await
        .unwrap();

    let result = delete_product_action(products.as_ref(), chair).await;
    assert_eq!(
        result,
        ActionResult::Success("Product Chair has been deleted".to_string())
    );

    assert_eq!(product::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(product_variant::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(review::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(order_product::Entity::find().count(&app.db).await.unwrap(), 0);
    // Orders belong to the buyer and survive.
    assert_eq!(order::Entity::find().count(&app.db).await.unwrap(), 1);

    let deletes: Vec<_> = app
        .index
        .operations()
        .into_iter()
        .filter_map(|op| match op {
            IndexOperation::Delete { object_id } => Some(object_id),
            _ => None,
        })
        .collect();
    assert_eq!(deletes, vec![oak.to_string(), walnut.to_string()]);
}

#[tokio::test]
async fn test_delete_missing_product() {
    let app = setup().await;

    let result = delete_product_action(app.services.products().as_ref(), 31).await;
    assert_eq!(result, ActionResult::Error(MSG_PRODUCT_FAILED.to_string()));
    assert!(app.index.operations().is_empty());
}
