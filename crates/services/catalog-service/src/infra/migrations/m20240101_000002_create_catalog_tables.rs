//! Migration: Create products, variants and the variant-owned image/tag tables.
//!
//! Every child row cascades from its parent so deleting a product removes
//! the whole variant tree.

use sea_orm_migration::prelude::*;

use super::{ProductVariants, Products};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Title).text().not_null())
                    .col(ColumnDef::new(Products::Description).text().not_null())
                    .col(ColumnDef::new(Products::Price).float().not_null())
                    .col(
                        ColumnDef::new(Products::Created)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductVariants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductVariants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductVariants::ProductId).integer().not_null())
                    .col(ColumnDef::new(ProductVariants::Color).text().not_null())
                    .col(ColumnDef::new(ProductVariants::ProductType).text().not_null())
                    .col(
                        ColumnDef::new(ProductVariants::Updated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_variants_product_id")
                            .from(ProductVariants::Table, ProductVariants::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_variants_product_id")
                    .table(ProductVariants::Table)
                    .col(ProductVariants::ProductId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VariantImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VariantImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VariantImages::VariantId).integer().not_null())
                    .col(ColumnDef::new(VariantImages::Url).text().not_null())
                    .col(ColumnDef::new(VariantImages::Size).text().not_null())
                    .col(ColumnDef::new(VariantImages::Name).text().not_null())
                    .col(ColumnDef::new(VariantImages::Order).float().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_variant_images_variant_id")
                            .from(VariantImages::Table, VariantImages::VariantId)
                            .to(ProductVariants::Table, ProductVariants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_variant_images_variant_id")
                    .table(VariantImages::Table)
                    .col(VariantImages::VariantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VariantTags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VariantTags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VariantTags::VariantId).integer().not_null())
                    .col(ColumnDef::new(VariantTags::Tag).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_variant_tags_variant_id")
                            .from(VariantTags::Table, VariantTags::VariantId)
                            .to(ProductVariants::Table, ProductVariants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_variant_tags_variant_id")
                    .table(VariantTags::Table)
                    .col(VariantTags::VariantId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VariantTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VariantImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductVariants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VariantImages {
    Table,
    Id,
    VariantId,
    Url,
    Size,
    Name,
    Order,
}

#[derive(DeriveIden)]
enum VariantTags {
    Table,
    Id,
    VariantId,
    Tag,
}
