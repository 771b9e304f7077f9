//! Variant service - create, edit and delete product variants.
//!
//! Every write runs in one transaction together with its search outbox
//! entry. The index is updated after commit and the affected views are
//! invalidated last.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use validator::Validate;

use common::{ActionResult, AppError, AppResult, OptionExt};
use domain::{
    product_path, Clock, ProductId, UpsertVariant, VariantId, VariantWithChildren,
    MSG_VARIANT_DELETE_FAILED, MSG_VARIANT_FAILED, PATH_DASHBOARD_PRODUCTS,
};

use crate::infra::{Persistence, ViewInvalidator};
use crate::search::{object_id, IndexOperation, SearchDocument, SearchPatch, SearchSync};
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait VariantService: Send + Sync {
    /// Create a variant, or rewrite one when `edit_mode` is set.
    /// Returns `"Added {productType}"` or `"Edited {productType}"`.
    async fn upsert_variant(&self, input: UpsertVariant) -> AppResult<String>;

    /// Variant with ordered images and tags.
    async fn get_variant(&self, id: VariantId) -> AppResult<VariantWithChildren>;

    /// Delete a variant and everything it owns. Returns `"Deleted {productType}"`.
    async fn delete_variant(&self, id: VariantId) -> AppResult<String>;
}

pub struct VariantManager {
    persistence: Persistence,
    sync: SearchSync,
    views: Arc<dyn ViewInvalidator>,
    clock: Arc<dyn Clock>,
}

impl VariantManager {
    pub fn new(
        persistence: Persistence,
        sync: SearchSync,
        views: Arc<dyn ViewInvalidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            persistence,
            sync,
            views,
            clock,
        }
    }

    async fn revalidate(&self, product_id: ProductId) {
        self.views.revalidate_path(PATH_DASHBOARD_PRODUCTS).await;
        self.views.revalidate_path(&product_path(product_id)).await;
    }

    async fn edit(&self, id: VariantId, input: UpsertVariant) -> AppResult<String> {
        let now = self.clock.now();
        let product_type = input.product_type.clone();

        let (product_id, outbox_id) = with_transaction!(self.persistence, |ctx| {
            let variants = ctx.variants();
            let variant = variants
                .update(id, input.color.clone(), input.product_type.clone(), now)
                .await?;
            variants.replace_tags(id, &input.tags).await?;
            variants.replace_images(id, &input.images).await?;

            let patch = SearchPatch::for_edit(&variant, &input);
            let outbox_id =
                SearchSync::enqueue(&ctx, &IndexOperation::PartialUpdate { patch }, now).await?;
            Ok::<_, AppError>((variant.product_id, outbox_id))
        })?;

        info!(variant_id = id, product_id, "Variant edited");
        self.sync.deliver(outbox_id).await;
        self.revalidate(product_id).await;

        Ok(format!("Edited {}", product_type))
    }

    async fn create(&self, input: UpsertVariant) -> AppResult<String> {
        let now = self.clock.now();
        let product_id = input.product_id;
        let product_type = input.product_type.clone();

        let (variant_id, outbox_id) = with_transaction!(self.persistence, |ctx| {
            let product = ctx
                .products()
                .find_by_id(input.product_id)
                .await?
                .ok_or_not_found()?;

            let variants = ctx.variants();
            let variant = variants
                .insert(product.id, input.color.clone(), input.product_type.clone(), now)
                .await?;
            variants.replace_tags(variant.id, &input.tags).await?;
            variants.replace_images(variant.id, &input.images).await?;

            let document = SearchDocument::for_variant(&product, &variant, input.first_image_url());
            let outbox_id =
                SearchSync::enqueue(&ctx, &IndexOperation::Save { document }, now).await?;
            Ok::<_, AppError>((variant.id, outbox_id))
        })?;

        info!(variant_id, product_id, "Variant created");
        self.sync.deliver(outbox_id).await;
        self.revalidate(product_id).await;

        Ok(format!("Added {}", product_type))
    }
}

#[async_trait]
impl VariantService for VariantManager {
    async fn upsert_variant(&self, input: UpsertVariant) -> AppResult<String> {
        input.validate()?;

        match input.edit_target()? {
            Some(id) => self.edit(id, input).await,
            None => self.create(input).await,
        }
    }

    async fn get_variant(&self, id: VariantId) -> AppResult<VariantWithChildren> {
        self.persistence
            .variants()
            .find_with_children(id)
            .await?
            .ok_or_not_found()
    }

    async fn delete_variant(&self, id: VariantId) -> AppResult<String> {
        let now = self.clock.now();

        let (product_id, product_type, outbox_id) = with_transaction!(self.persistence, |ctx| {
            let variants = ctx.variants();
            let variant = variants.find_by_id(id).await?.ok_or_not_found()?;
            variants.delete(id).await?;

            let operation = IndexOperation::Delete {
                object_id: object_id(id),
            };
            let outbox_id = SearchSync::enqueue(&ctx, &operation, now).await?;
            Ok::<_, AppError>((variant.product_id, variant.product_type, outbox_id))
        })?;

        info!(variant_id = id, product_id, "Variant deleted");
        self.sync.deliver(outbox_id).await;
        self.revalidate(product_id).await;

        Ok(format!("Deleted {}", product_type))
    }
}

/// `{success}`/`{error}` boundary for [`VariantService::upsert_variant`].
pub async fn upsert_variant_action(
    service: &dyn VariantService,
    input: UpsertVariant,
) -> ActionResult<String> {
    ActionResult::from_result(service.upsert_variant(input).await, |err| {
        validation_or(err, MSG_VARIANT_FAILED)
    })
}

/// `{success}`/`{error}` boundary for [`VariantService::delete_variant`].
pub async fn delete_variant_action(
    service: &dyn VariantService,
    id: VariantId,
) -> ActionResult<String> {
    ActionResult::from_result(service.delete_variant(id).await, |err| {
        validation_or(err, MSG_VARIANT_DELETE_FAILED)
    })
}

/// Validation messages pass through; everything else gets `fallback`.
pub(crate) fn validation_or(err: &AppError, fallback: &str) -> String {
    match err {
        AppError::Validation(msg) => msg.clone(),
        _ => fallback.to_string(),
    }
}
