//! Product variant database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::ProductVariant;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product_variants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    #[sea_orm(column_type = "Text")]
    pub color: String,
    #[sea_orm(column_type = "Text")]
    pub product_type: String,
    pub updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
    #[sea_orm(has_many = "super::variant_image::Entity")]
    VariantImages,
    #[sea_orm(has_many = "super::variant_tag::Entity")]
    VariantTags,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::variant_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VariantImages.def()
    }
}

impl Related<super::variant_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VariantTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProductVariant {
    fn from(model: Model) -> Self {
        ProductVariant {
            id: model.id,
            product_id: model.product_id,
            color: model.color,
            product_type: model.product_type,
            updated: model.updated,
        }
    }
}
