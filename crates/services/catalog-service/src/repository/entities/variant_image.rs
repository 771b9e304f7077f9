//! Variant image database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::VariantImage;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "variant_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub variant_id: i32,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    #[sea_orm(column_type = "Text")]
    pub size: String,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    /// Display position; lower sorts first
    pub order: f32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product_variant::Entity",
        from = "Column::VariantId",
        to = "super::product_variant::Column::Id",
        on_delete = "Cascade"
    )]
    ProductVariant,
}

impl Related<super::product_variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductVariant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for VariantImage {
    fn from(model: Model) -> Self {
        VariantImage {
            id: model.id,
            variant_id: model.variant_id,
            url: model.url,
            size: model.size,
            name: model.name,
            order: model.order,
        }
    }
}
