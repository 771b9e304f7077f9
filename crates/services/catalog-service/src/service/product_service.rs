//! Product service - product lifecycle and the admin catalog listing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use validator::Validate;

use common::{ActionResult, AppError, AppResult, OptionExt};
use domain::{
    product_path, Clock, DashboardProduct, NewProduct, ProductId, MSG_PRODUCT_FAILED,
    PATH_DASHBOARD_PRODUCTS,
};

use crate::infra::{get_view, set_view, Persistence, ViewCache, ViewInvalidator};
use crate::search::{object_id, IndexOperation, SearchSync};
use crate::with_transaction;

use super::variant_service::validation_or;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Returns `"Product {title} has been created"`.
    async fn create_product(&self, input: NewProduct) -> AppResult<String>;

    /// Delete a product with all variants, images, tags, reviews and order
    /// lines. Returns `"Product {title} has been deleted"`.
    async fn delete_product(&self, id: ProductId) -> AppResult<String>;

    /// Admin catalog table, newest product first.
    async fn dashboard_products(&self) -> AppResult<Vec<DashboardProduct>>;
}

pub struct ProductManager {
    persistence: Persistence,
    sync: SearchSync,
    views: Arc<dyn ViewInvalidator>,
    cache: Arc<dyn ViewCache>,
    clock: Arc<dyn Clock>,
    placeholder_image: String,
}

impl ProductManager {
    pub fn new(
        persistence: Persistence,
        sync: SearchSync,
        views: Arc<dyn ViewInvalidator>,
        cache: Arc<dyn ViewCache>,
        clock: Arc<dyn Clock>,
        placeholder_image: String,
    ) -> Self {
        Self {
            persistence,
            sync,
            views,
            cache,
            clock,
            placeholder_image,
        }
    }
}

#[async_trait]
impl ProductService for ProductManager {
    async fn create_product(&self, input: NewProduct) -> AppResult<String> {
        input.validate()?;

        let product = self
            .persistence
            .products()
            .insert(input, self.clock.now())
            .await?;

        info!(product_id = product.id, "Product created");
        self.views.revalidate_path(PATH_DASHBOARD_PRODUCTS).await;

        Ok(format!("Product {} has been created", product.title))
    }

    async fn delete_product(&self, id: ProductId) -> AppResult<String> {
        let now = self.clock.now();

        let (title, outbox_ids) = with_transaction!(self.persistence, |ctx| {
            let products = ctx.products();
            let product = products.find_by_id(id).await?.ok_or_not_found()?;
            let variant_ids = products.variant_ids(id).await?;
            products.delete(id).await?;

            let mut outbox_ids = Vec::with_capacity(variant_ids.len());
            for variant_id in variant_ids {
                let operation = IndexOperation::Delete {
                    object_id: object_id(variant_id),
                };
                outbox_ids.push(SearchSync::enqueue(&ctx, &operation, now).await?);
            }
            Ok::<_, AppError>((product.title, outbox_ids))
        })?;

        info!(product_id = id, variants = outbox_ids.len(), "Product deleted");
        for outbox_id in outbox_ids {
            self.sync.deliver(outbox_id).await;
        }
        self.views.revalidate_path(PATH_DASHBOARD_PRODUCTS).await;
        self.views.revalidate_path(&product_path(id)).await;

        Ok(format!("Product {} has been deleted", title))
    }

    async fn dashboard_products(&self) -> AppResult<Vec<DashboardProduct>> {
        if let Some(rows) = get_view(self.cache.as_ref(), PATH_DASHBOARD_PRODUCTS).await {
            debug!("Dashboard products served from cache");
            return Ok(rows);
        }

        let generation = self.cache.generation(PATH_DASHBOARD_PRODUCTS).await;
        let rows: Vec<DashboardProduct> = self
            .persistence
            .catalog()
            .products_with_variants()
            .await?
            .into_iter()
            .map(|tree| DashboardProduct::from_tree(tree, &self.placeholder_image))
            .collect();

        if let Some(generation) = generation {
            set_view(self.cache.as_ref(), PATH_DASHBOARD_PRODUCTS, generation, &rows).await;
        }
        Ok(rows)
    }
}

/// `{success}`/`{error}` boundary for [`ProductService::create_product`].
pub async fn create_product_action(
    service: &dyn ProductService,
    input: NewProduct,
) -> ActionResult<String> {
    ActionResult::from_result(service.create_product(input).await, |err| {
        validation_or(err, MSG_PRODUCT_FAILED)
    })
}

/// `{success}`/`{error}` boundary for [`ProductService::delete_product`].
pub async fn delete_product_action(
    service: &dyn ProductService,
    id: ProductId,
) -> ActionResult<String> {
    ActionResult::from_result(service.delete_product(id).await, |err| {
        validation_or(err, MSG_PRODUCT_FAILED)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::OutboxConfig;
    use domain::FixedClock;
    use sea_orm::DatabaseConnection;

    use crate::infra::{MockViewCache, MockViewInvalidator};
    use crate::search::MockSearchIndex;

    fn manager(views: MockViewInvalidator, cache: MockViewCache) -> ProductManager {
        let persistence = Persistence::new(DatabaseConnection::Disconnected);
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(Utc::now()));
        let sync = SearchSync::new(
            persistence.clone(),
            Arc::new(MockSearchIndex::new()),
            clock.clone(),
            OutboxConfig::default(),
        );
        ProductManager::new(
            persistence,
            sync,
            Arc::new(views),
            Arc::new(cache),
            clock,
            "/placeholder.jpg".to_string(),
        )
    }

    #[tokio::test]
    async fn test_dashboard_served_from_cache() {
        let mut cache = MockViewCache::new();
        cache
            .expect_get_json()
            .withf(|path| path == PATH_DASHBOARD_PRODUCTS)
            .returning(|_| {
                let json = concat!(
                    r#"[{"id":4,"title":"Mug","price":9.5,"#,
                    r#""variants":[],"image":"/placeholder.jpg"}]"#
                );
                Some(json.to_string())
            });
        cache.expect_generation().never();
        cache.expect_set_json_if().never();

        let rows = manager(MockViewInvalidator::new(), cache)
            .dashboard_products()
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Mug");
    }

    #[tokio::test]
    async fn test_invalid_product_is_rejected_before_any_write() {
        let mut views = MockViewInvalidator::new();
        views.expect_revalidate_path().never();

        let input = NewProduct {
            title: "Mug".to_string(),
            description: String::new(),
            price: 9.5,
        };
        let result = create_product_action(&manager(views, MockViewCache::new()), input).await;
        assert_eq!(result.error(), Some("Description is required"));
    }
}
