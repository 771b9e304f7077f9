//! Product persistence.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use common::{AppError, AppResult};
use domain::{NewProduct, Product, ProductId, VariantId};

use super::entities::{product, product_variant};

pub struct ProductRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> ProductRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        let result = product::Entity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    pub async fn insert(&self, input: NewProduct, created: DateTime<Utc>) -> AppResult<Product> {
        let active_model = product::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            price: Set(input.price),
            created: Set(created),
            ..Default::default()
        };

        let model = active_model.insert(self.conn).await.map_err(AppError::from)?;
        Ok(Product::from(model))
    }

    /// Delete a product. Variants, images, tags, reviews and order lines go
    /// with it through the foreign keys.
    pub async fn delete(&self, id: ProductId) -> AppResult<()> {
        let result = product::Entity::delete_by_id(id)
            .exec(self.conn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    /// Ids of the product's variants, oldest first.
    pub async fn variant_ids(&self, id: ProductId) -> AppResult<Vec<VariantId>> {
        let ids = product_variant::Entity::find()
            .select_only()
            .column(product_variant::Column::Id)
            .filter(product_variant::Column::ProductId.eq(id))
            .order_by_asc(product_variant::Column::Id)
            .into_tuple::<VariantId>()
            .all(self.conn)
            .await
            .map_err(AppError::from)?;

        Ok(ids)
    }
}
