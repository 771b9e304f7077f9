//! Batched loader for the admin catalog tree.
//!
//! Exactly four queries regardless of catalog size: products, then the
//! variants, images and tags of those products, stitched together in memory.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use common::{AppError, AppResult};
use domain::{
    Product, ProductVariant, ProductWithVariants, VariantId, VariantImage, VariantTag,
    VariantWithChildren,
};

use super::entities::{product, product_variant, variant_image, variant_tag};

pub struct CatalogLoader<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> CatalogLoader<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Every product, newest id first, with its variants (oldest first),
    /// their images in display order and their tags.
    pub async fn products_with_variants(&self) -> AppResult<Vec<ProductWithVariants>> {
        let products = product::Entity::find()
            .order_by_desc(product::Column::Id)
            .all(self.conn)
            .await
            .map_err(AppError::from)?;

        if products.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<i32> = products.iter().map(|p| p.id).collect();
        let variants = product_variant::Entity::find()
            .filter(product_variant::Column::ProductId.is_in(product_ids))
            .order_by_asc(product_variant::Column::Id)
            .all(self.conn)
            .await
            .map_err(AppError::from)?;

        let variant_ids: Vec<VariantId> = variants.iter().map(|v| v.id).collect();
        let (images, tags) = if variant_ids.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            let images = variant_image::Entity::find()
                .filter(variant_image::Column::VariantId.is_in(variant_ids.clone()))
                .order_by_asc(variant_image::Column::Order)
                .order_by_asc(variant_image::Column::Id)
                .all(self.conn)
                .await
                .map_err(AppError::from)?;
            let tags = variant_tag::Entity::find()
                .filter(variant_tag::Column::VariantId.is_in(variant_ids))
                .order_by_asc(variant_tag::Column::Id)
                .all(self.conn)
                .await
                .map_err(AppError::from)?;
            (images, tags)
        };

        let mut images_by_variant: HashMap<VariantId, Vec<VariantImage>> = HashMap::new();
        for image in images {
            images_by_variant
                .entry(image.variant_id)
                .or_default()
                .push(VariantImage::from(image));
        }

        let mut tags_by_variant: HashMap<VariantId, Vec<VariantTag>> = HashMap::new();
        for tag in tags {
            tags_by_variant
                .entry(tag.variant_id)
                .or_default()
                .push(VariantTag::from(tag));
        }

        let mut variants_by_product: HashMap<i32, Vec<VariantWithChildren>> = HashMap::new();
        for variant in variants {
            let id = variant.id;
            variants_by_product
                .entry(variant.product_id)
                .or_default()
                .push(VariantWithChildren {
                    variant: ProductVariant::from(variant),
                    images: images_by_variant.remove(&id).unwrap_or_default(),
                    tags: tags_by_variant.remove(&id).unwrap_or_default(),
                });
        }

        Ok(products
            .into_iter()
            .map(|model| {
                let variants = variants_by_product.remove(&model.id).unwrap_or_default();
                ProductWithVariants {
                    product: Product::from(model),
                    variants,
                }
            })
            .collect())
    }
}
