//! Variant persistence, including the owned tag and image sets.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use common::{AppError, AppResult, OptionExt};
use domain::{
    ProductId, ProductVariant, VariantId, VariantImage, VariantImageInput, VariantTag,
    VariantWithChildren,
};

use super::entities::{product_variant, variant_image, variant_tag};

pub struct VariantRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> VariantRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: VariantId) -> AppResult<Option<ProductVariant>> {
        let result = product_variant::Entity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ProductVariant::from))
    }

    pub async fn insert(
        &self,
        product_id: ProductId,
        color: String,
        product_type: String,
        updated: DateTime<Utc>,
    ) -> AppResult<ProductVariant> {
        let active_model = product_variant::ActiveModel {
            product_id: Set(product_id),
            color: Set(color),
            product_type: Set(product_type),
            updated: Set(updated),
            ..Default::default()
        };

        let model = active_model.insert(self.conn).await.map_err(AppError::from)?;
        Ok(ProductVariant::from(model))
    }

    /// Overwrite color and type. The owning product never changes.
    pub async fn update(
        &self,
        id: VariantId,
        color: String,
        product_type: String,
        updated: DateTime<Utc>,
    ) -> AppResult<ProductVariant> {
        let existing = product_variant::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_not_found()?;

        let mut active: product_variant::ActiveModel = existing.into();
        active.color = Set(color);
        active.product_type = Set(product_type);
        active.updated = Set(updated);

        let model = active.update(self.conn).await.map_err(AppError::from)?;
        Ok(ProductVariant::from(model))
    }

    /// Replace the tag set; one row per input value, duplicates kept.
    pub async fn replace_tags(&self, id: VariantId, tags: &[String]) -> AppResult<()> {
        variant_tag::Entity::delete_many()
            .filter(variant_tag::Column::VariantId.eq(id))
            .exec(self.conn)
            .await
            .map_err(AppError::from)?;

        if tags.is_empty() {
            return Ok(());
        }

        let rows = tags.iter().map(|tag| variant_tag::ActiveModel {
            variant_id: Set(id),
            tag: Set(tag.clone()),
            ..Default::default()
        });
        variant_tag::Entity::insert_many(rows)
            .exec(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    /// Replace the image set; `order` is the zero-based input position.
    pub async fn replace_images(
        &self,
        id: VariantId,
        images: &[VariantImageInput],
    ) -> AppResult<()> {
        variant_image::Entity::delete_many()
            .filter(variant_image::Column::VariantId.eq(id))
            .exec(self.conn)
            .await
            .map_err(AppError::from)?;

        if images.is_empty() {
            return Ok(());
        }

        let rows = images
            .iter()
            .enumerate()
            .map(|(index, image)| variant_image::ActiveModel {
                variant_id: Set(id),
                url: Set(image.url.clone()),
                size: Set(image.size.clone()),
                name: Set(image.name.clone()),
                order: Set(index as f32),
                ..Default::default()
            });
        variant_image::Entity::insert_many(rows)
            .exec(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    /// Delete a variant together with its images, tags and order lines.
    pub async fn delete(&self, id: VariantId) -> AppResult<()> {
        let result = product_variant::Entity::delete_by_id(id)
            .exec(self.conn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    /// Variant with images in display order and tags in insertion order.
    pub async fn find_with_children(
        &self,
        id: VariantId,
    ) -> AppResult<Option<VariantWithChildren>> {
        let Some(variant) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let images = variant_image::Entity::find()
            .filter(variant_image::Column::VariantId.eq(id))
            .order_by_asc(variant_image::Column::Order)
            .order_by_asc(variant_image::Column::Id)
            .all(self.conn)
            .await
            .map_err(AppError::from)?;

        let tags = variant_tag::Entity::find()
            .filter(variant_tag::Column::VariantId.eq(id))
            .order_by_asc(variant_tag::Column::Id)
            .all(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(Some(VariantWithChildren {
            variant,
            images: images.into_iter().map(VariantImage::from).collect(),
            tags: tags.into_iter().map(VariantTag::from).collect(),
        }))
    }
}
